use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use async_trait::async_trait;
use base64::Engine as _;
use reqwest::{Client, Method, StatusCode, Url};
use serde_json::{json, Value as JsonValue};

use crate::core::error::ClientError;
use crate::core::github::{GithubApi, ReadmeGenerator};
use crate::domain::{audit, readme, CommunityProfile, RepoInfo};
use crate::infra::config::{GithubConfig, DEFAULT_GITHUB_API};
use crate::infra::http::headers::{add_standard_headers, generate_request_id};
use crate::infra::logging::{count_error, log_metric};
use crate::infra::runtime::limits::{make_http_client, make_http_client_with, retry_async};

/// GitHub REST client backing every tool.
#[derive(Clone)]
pub struct GithubRemote {
    base: String,
    http: Client,
    token: Option<String>,
    retries: u32,
}

/// A reply GitHub actually sent, successful or not.
#[derive(Debug, Clone)]
pub struct ApiReply {
    pub status: StatusCode,
    pub body: JsonValue,
}

impl ApiReply {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// GitHub's `message` field, falling back to the status line.
    pub fn message(&self) -> String {
        match self.body.get("message").and_then(|m| m.as_str()) {
            Some(m) => m.to_string(),
            None => self.status.to_string(),
        }
    }

    fn into_status_error(self) -> ClientError {
        let message = self.message();
        ClientError::Status { status: self.status.as_u16(), message }
    }
}

impl GithubRemote {
    pub fn new(base: impl Into<String>) -> Result<Self, ClientError> {
        Ok(Self {
            base: base.into(),
            http: make_http_client()?,
            token: None,
            retries: 2,
        })
    }

    pub fn from_config(cfg: &GithubConfig) -> Result<Self, ClientError> {
        let base = if cfg.base_url.trim().is_empty() {
            DEFAULT_GITHUB_API.to_string()
        } else {
            cfg.base_url.clone()
        };
        Ok(Self {
            base,
            http: make_http_client_with(cfg)?,
            token: cfg.token.clone(),
            retries: cfg.retries.unwrap_or(2),
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// Endpoint URL for a `/`-separated API path. Each segment is
    /// percent-encoded, so `#` and `?` in file names stay in the path.
    fn url(&self, path: &str) -> Result<Url, ClientError> {
        let invalid = || ClientError::InvalidUrl(self.base.clone());
        let mut url = Url::parse(&self.base).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(path.split('/').filter(|s| !s.is_empty()));
        Ok(url)
    }

    /// `true` when the API root answers at all.
    pub async fn health(&self) -> bool {
        let Ok(url) = self.url("/") else {
            return false;
        };
        let (builder, _rid) = add_standard_headers(self.http.get(url), None, self.token.as_deref());
        match builder.send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    /// Idempotent read, retried on transport errors and 5xx replies.
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<ApiReply, ClientError> {
        let url = self.url(path)?;
        let req_id = generate_request_id();
        tracing::debug!(endpoint = %url, request_id = %req_id, "github GET");
        let start = Instant::now();
        let res: Result<ApiReply, ClientError> = retry_async(
            self.retries,
            |_| {
                let (builder, _rid) = add_standard_headers(
                    self.http.get(url.clone()).query(query),
                    Some(req_id.clone()),
                    self.token.as_deref(),
                );
                async move {
                    let reply = read_reply(builder.send().await?).await?;
                    if reply.status.is_server_error() {
                        return Err(reply.into_status_error());
                    }
                    Ok::<ApiReply, ClientError>(reply)
                }
            },
            |e| matches!(e, ClientError::Transport(_) | ClientError::Status { .. }),
        )
        .await;
        self.observe("github.get", start, res.is_ok());
        res
    }

    /// Single-shot write. Writes are never retried.
    async fn send(&self, method: Method, path: &str, body: &JsonValue) -> Result<ApiReply, ClientError> {
        let url = self.url(path)?;
        let (builder, rid) = add_standard_headers(
            self.http.request(method.clone(), url.clone()),
            None,
            self.token.as_deref(),
        );
        tracing::debug!(endpoint = %url, method = %method, request_id = %rid, "github write");
        let start = Instant::now();
        let res = match builder.json(body).send().await {
            Ok(resp) => read_reply(resp).await,
            Err(e) => Err(e.into()),
        };
        self.observe("github.write", start, res.is_ok());
        res
    }

    fn observe(&self, op: &str, start: Instant, ok: bool) {
        if ok {
            log_metric(op, "github_latency_ms", start.elapsed().as_millis() as f64);
        } else {
            count_error(op, "github_error_total");
        }
    }

    async fn repo_info(&self, repo: &str) -> Result<Result<RepoInfo, ApiReply>, ClientError> {
        let reply = self.get(&format!("repos/{repo}"), &[]).await?;
        if !reply.is_success() {
            return Ok(Err(reply));
        }
        Ok(Ok(serde_json::from_value(reply.body)?))
    }

    /// Blob sha of `path` on `branch`, if the file already exists there.
    async fn existing_sha(&self, repo: &str, path: &str, branch: &str) -> Result<Option<String>, ClientError> {
        let reply = self
            .get(&format!("repos/{repo}/contents/{path}"), &[("ref", branch)])
            .await?;
        if !reply.is_success() {
            return Ok(None);
        }
        Ok(reply.body.get("sha").and_then(|s| s.as_str()).map(str::to_owned))
    }
}

async fn read_reply(resp: reqwest::Response) -> Result<ApiReply, ClientError> {
    let status = resp.status();
    let bytes = resp.bytes().await?;
    Ok(ApiReply { status, body: parse_body(&bytes) })
}

fn parse_body(bytes: &[u8]) -> JsonValue {
    if bytes.is_empty() {
        return JsonValue::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| JsonValue::String(String::from_utf8_lossy(bytes).into_owned()))
}

/// Path inside the repository for a local file path. Absolute paths are
/// taken relative to `cwd`; paths that climb out of it are refused.
fn repo_path(file_path: &str, cwd: &Path) -> Result<String, String> {
    let local = Path::new(file_path);
    let relative = if local.is_absolute() {
        local
            .strip_prefix(cwd)
            .map_err(|_| format!("'{file_path}' is outside the working directory"))?
    } else {
        local
    };
    let unified = relative.to_string_lossy().replace('\\', "/");
    let mut segments = Vec::new();
    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." => return Err(format!("'{file_path}' escapes the repository root")),
            s => segments.push(s),
        }
    }
    if segments.is_empty() {
        return Err(format!("'{file_path}' does not name a file"));
    }
    Ok(segments.join("/"))
}

#[async_trait]
impl GithubApi for GithubRemote {
    async fn create_repository(
        &self,
        name: &str,
        description: &str,
        private: bool,
    ) -> Result<String, ClientError> {
        let body = json!({ "name": name, "description": description, "private": private });
        let reply = self.send(Method::POST, "user/repos", &body).await?;
        if !reply.is_success() {
            return Ok(format!("Failed to create repository '{name}': {}", reply.message()));
        }
        let full_name = reply.body.get("full_name").and_then(|v| v.as_str()).unwrap_or(name);
        let url = reply.body.get("html_url").and_then(|v| v.as_str()).unwrap_or_default();
        let visibility = if private { "private" } else { "public" };
        Ok(format!("Repository '{full_name}' created ({visibility}): {url}"))
    }

    async fn commit_and_push_file(
        &self,
        repo: &str,
        branch: &str,
        file_path: &str,
        commit_message: &str,
    ) -> Result<JsonValue, ClientError> {
        let cwd = std::env::current_dir()?;
        let path = match repo_path(file_path, &cwd) {
            Ok(p) => p,
            Err(reason) => return Ok(json!({ "error": format!("Invalid file path: {reason}") })),
        };
        let bytes = match tokio::fs::read(file_path).await {
            Ok(b) => b,
            Err(e) => return Ok(json!({ "error": format!("Could not read '{file_path}': {e}") })),
        };
        let mut body = json!({
            "message": commit_message,
            "content": base64::engine::general_purpose::STANDARD.encode(&bytes),
            "branch": branch,
        });
        if let Some(sha) = self.existing_sha(repo, &path, branch).await? {
            body["sha"] = JsonValue::String(sha);
        }
        let reply = self
            .send(Method::PUT, &format!("repos/{repo}/contents/{path}"), &body)
            .await?;
        if reply.is_success() {
            return Ok(reply.body);
        }
        Ok(json!({ "error": format!("GitHub API Error {}: {}", reply.status.as_u16(), reply.message()) }))
    }

    async fn create_issue(&self, repo: &str, title: &str, body: &str) -> Result<JsonValue, ClientError> {
        let payload = json!({ "title": title, "body": body });
        let reply = self.send(Method::POST, &format!("repos/{repo}/issues"), &payload).await?;
        Ok(JsonValue::String(created_or_failed(&reply, "Issue", "issue")))
    }

    async fn create_pull_request(
        &self,
        repo: &str,
        title: &str,
        body: &str,
        head: &str,
        base: &str,
    ) -> Result<JsonValue, ClientError> {
        let payload = json!({ "title": title, "body": body, "head": head, "base": base });
        let reply = self.send(Method::POST, &format!("repos/{repo}/pulls"), &payload).await?;
        Ok(JsonValue::String(created_or_failed(&reply, "Pull request", "pull request")))
    }

    async fn audit_repository(&self, repo: &str) -> Result<String, ClientError> {
        let info = match self.repo_info(repo).await? {
            Ok(info) => info,
            Err(reply) => return Ok(format!("Could not audit '{repo}': {}", reply.message())),
        };
        let profile = match self.get(&format!("repos/{repo}/community/profile"), &[]).await {
            Ok(reply) if reply.is_success() => serde_json::from_value::<CommunityProfile>(reply.body).ok(),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(repo, error = %e, "community profile unavailable");
                None
            }
        };
        let suggestions = audit::suggest(&info, profile.as_ref(), chrono::Utc::now());
        Ok(audit::render(repo, &suggestions))
    }
}

fn created_or_failed(reply: &ApiReply, label: &str, noun: &str) -> String {
    if !reply.is_success() {
        return format!("Failed to create {noun}: {}", reply.message());
    }
    let number = reply.body.get("number").and_then(|v| v.as_u64()).unwrap_or_default();
    let url = reply.body.get("html_url").and_then(|v| v.as_str()).unwrap_or_default();
    format!("{label} #{number} created: {url}")
}

#[async_trait]
impl ReadmeGenerator for GithubRemote {
    async fn generate_readme(&self, repo: &str) -> Result<String, ClientError> {
        let info = self.repo_info(repo).await?.map_err(ApiReply::into_status_error)?;
        let languages = match self.get(&format!("repos/{repo}/languages"), &[]).await {
            Ok(reply) if reply.is_success() => match serde_json::from_value::<BTreeMap<String, u64>>(reply.body) {
                Ok(languages) => languages,
                Err(e) => {
                    tracing::warn!(repo, error = %e, "language breakdown undecodable");
                    BTreeMap::new()
                }
            },
            Ok(reply) => {
                tracing::warn!(repo, status = reply.status.as_u16(), "language breakdown unavailable");
                BTreeMap::new()
            }
            Err(e) => {
                tracing::warn!(repo, error = %e, "language breakdown unavailable");
                BTreeMap::new()
            }
        };
        Ok(readme::render(&info, &languages))
    }
}
