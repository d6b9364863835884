use axum::{
    routing::{any_service, get},
    Router,
};
use std::sync::Arc;

use crate::infra::mcp::{self, LocalSessionManager};
use crate::tools::github::GithubTools;

/// `/healthz` + Streamable HTTP MCP at `/mcp`.
pub fn build_app(tools: Arc<GithubTools>) -> Router {
    let session_mgr = Arc::new(LocalSessionManager::default());
    let mcp_service = mcp::make_streamable_http_service(mcp::make_factory(tools), session_mgr);

    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route_service("/mcp", any_service(mcp_service))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::github::fake::FakeGithub;
    use crate::infra::config::ToolDefaults;
    use axum::body::{to_bytes, Body};
    use hyper::Request;
    use tower::ServiceExt;

    #[tokio::test]
    async fn healthz_answers_ok() {
        let fake = Arc::new(FakeGithub::new("", serde_json::json!(null)));
        let app = build_app(Arc::new(GithubTools::from_client(fake, ToolDefaults::default())));

        let req = Request::builder().uri("/healthz").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert!(resp.status().is_success());
        let bytes = to_bytes(resp.into_body(), 1024).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }
}
