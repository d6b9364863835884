use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::core::error::ClientError;

/// GitHub operations the tools delegate to.
///
/// Results that GitHub itself reports (validation failures, missing repos)
/// come back as values so the tool layer can render them. `Err` is reserved
/// for failures that never produced a reply.
#[async_trait]
pub trait GithubApi: Send + Sync + 'static {
    /// Returns a display string describing the created repository.
    async fn create_repository(
        &self,
        name: &str,
        description: &str,
        private: bool,
    ) -> Result<String, ClientError>;

    /// Returns the raw reply. Success replies carry `content`, reported
    /// failures carry `error`.
    async fn commit_and_push_file(
        &self,
        repo: &str,
        branch: &str,
        file_path: &str,
        commit_message: &str,
    ) -> Result<JsonValue, ClientError>;

    async fn create_issue(&self, repo: &str, title: &str, body: &str)
        -> Result<JsonValue, ClientError>;

    async fn create_pull_request(
        &self,
        repo: &str,
        title: &str,
        body: &str,
        head: &str,
        base: &str,
    ) -> Result<JsonValue, ClientError>;

    /// Returns human-readable best-practice suggestions.
    async fn audit_repository(&self, repo: &str) -> Result<String, ClientError>;
}

#[async_trait]
pub trait ReadmeGenerator: Send + Sync + 'static {
    async fn generate_readme(&self, repo: &str) -> Result<String, ClientError>;
}
