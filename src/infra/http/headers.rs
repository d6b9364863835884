use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::RequestBuilder;

pub const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
pub const GITHUB_API_VERSION: &str = "2022-11-28";

/// Request id for log correlation: `gat-<secs>-<nanos>`.
pub fn generate_request_id() -> String {
    let now = chrono::Utc::now();
    format!("gat-{}-{}", now.timestamp(), now.timestamp_subsec_nanos())
}

/// Attach the headers every GitHub call carries. Returns the updated builder
/// and the request id used.
pub fn add_standard_headers(
    builder: RequestBuilder,
    request_id: Option<String>,
    token: Option<&str>,
) -> (RequestBuilder, String) {
    let rid = request_id.unwrap_or_else(generate_request_id);
    let mut b = builder
        .header("x-request-id", rid.as_str())
        .header(USER_AGENT, format!("github-agent-tools/{}", env!("CARGO_PKG_VERSION")))
        .header(ACCEPT, GITHUB_MEDIA_TYPE)
        .header("X-GitHub-Api-Version", GITHUB_API_VERSION);
    if let Some(token) = token {
        b = b.bearer_auth(token);
    }
    (b, rid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::AUTHORIZATION;

    #[test]
    fn attaches_auth_only_with_token() {
        let client = reqwest::Client::new();
        let (b, rid) = add_standard_headers(client.get("http://localhost/x"), Some("rid-1".into()), Some("s3cret"));
        let req = b.build().unwrap();
        assert_eq!(rid, "rid-1");
        assert_eq!(req.headers()["x-request-id"], "rid-1");
        assert_eq!(req.headers()[ACCEPT], GITHUB_MEDIA_TYPE);
        assert_eq!(req.headers()[AUTHORIZATION], "Bearer s3cret");

        let (b, rid) = add_standard_headers(client.get("http://localhost/x"), None, None);
        let req = b.build().unwrap();
        assert!(rid.starts_with("gat-"));
        assert!(req.headers().get(AUTHORIZATION).is_none());
        assert!(req.headers()[USER_AGENT].to_str().unwrap().starts_with("github-agent-tools/"));
    }
}
