//! Tool adapters: one method per tool, one collaborator call per method,
//! one string out.

use std::sync::Arc;

use serde::Deserialize;

use crate::core::github::{GithubApi, ReadmeGenerator};
use crate::domain::{display_value, CommitOutcome, ToolError};
use crate::infra::config::ToolDefaults;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRepositoryArgs {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub private: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitFileArgs {
    pub repo: String,
    pub file_path: String,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub commit_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssueArgs {
    pub repo: String,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestArgs {
    pub repo: String,
    pub title: String,
    pub body: String,
    pub head: String,
    #[serde(default)]
    pub base: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepoArgs {
    pub repo: String,
}

#[derive(Clone)]
pub struct GithubTools {
    api: Arc<dyn GithubApi>,
    readme: Arc<dyn ReadmeGenerator>,
    defaults: ToolDefaults,
}

impl GithubTools {
    pub fn new(api: Arc<dyn GithubApi>, readme: Arc<dyn ReadmeGenerator>, defaults: ToolDefaults) -> Self {
        Self { api, readme, defaults }
    }

    /// Both ports served by one client.
    pub fn from_client<C>(client: Arc<C>, defaults: ToolDefaults) -> Self
    where
        C: GithubApi + ReadmeGenerator,
    {
        Self::new(client.clone(), client, defaults)
    }

    pub fn defaults(&self) -> &ToolDefaults {
        &self.defaults
    }

    /// Returns the collaborator's text unchanged.
    pub async fn create_github_repository(&self, args: CreateRepositoryArgs) -> Result<String, ToolError> {
        tracing::info!(tool = "create_github_repository", name = %args.name, private = args.private, "invoking");
        let out = self
            .api
            .create_repository(&args.name, &args.description, args.private)
            .await?;
        Ok(out)
    }

    pub async fn commit_and_push_file(&self, args: CommitFileArgs) -> Result<String, ToolError> {
        let branch = args.branch.unwrap_or_else(|| self.defaults.branch.clone());
        let message = args
            .commit_message
            .unwrap_or_else(|| self.defaults.commit_message.clone());
        tracing::info!(tool = "commit_and_push_file", repo = %args.repo, file = %args.file_path, branch = %branch, "invoking");
        let result = self
            .api
            .commit_and_push_file(&args.repo, &branch, &args.file_path, &message)
            .await?;
        let outcome = CommitOutcome::from(result);
        if !matches!(outcome, CommitOutcome::Success { .. }) {
            tracing::warn!(tool = "commit_and_push_file", outcome = ?outcome, "commit not confirmed");
        }
        Ok(outcome.describe(&args.file_path, &branch))
    }

    pub async fn create_issue(&self, args: IssueArgs) -> Result<String, ToolError> {
        tracing::info!(tool = "create_issue", repo = %args.repo, "invoking");
        let result = self.api.create_issue(&args.repo, &args.title, &args.body).await?;
        Ok(display_value(&result))
    }

    pub async fn create_pr(&self, args: PullRequestArgs) -> Result<String, ToolError> {
        let base = args.base.unwrap_or_else(|| self.defaults.branch.clone());
        tracing::info!(tool = "create_pr", repo = %args.repo, head = %args.head, base = %base, "invoking");
        let result = self
            .api
            .create_pull_request(&args.repo, &args.title, &args.body, &args.head, &base)
            .await?;
        Ok(display_value(&result))
    }

    pub async fn audit_repo(&self, args: RepoArgs) -> Result<String, ToolError> {
        tracing::info!(tool = "audit_repo", repo = %args.repo, "invoking");
        Ok(self.api.audit_repository(&args.repo).await?)
    }

    /// Writes the generated text to the configured README path, replacing
    /// any existing file, and returns it.
    pub async fn create_readme_file(&self, args: RepoArgs) -> Result<String, ToolError> {
        tracing::info!(tool = "create_readme_file", repo = %args.repo, "invoking");
        let content = self.readme.generate_readme(&args.repo).await?;
        let path = &self.defaults.readme_path;
        tokio::fs::write(path, content.as_bytes())
            .await
            .map_err(|source| ToolError::Write { path: path.display().to_string(), source })?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "README written");
        Ok(content)
    }
}
