use std::future::Future;
use std::sync::Arc;

use rmcp::handler::server::tool::{Parameters, ToolRouter};
use rmcp::model::{CallToolResult, Content, JsonObject, ServerCapabilities, ServerInfo};
use rmcp::ErrorData as McpError;
use serde::de::DeserializeOwned;

use crate::domain::ToolError;
use crate::infra::mcp::ServerHandler;
use crate::tools::github::GithubTools;
use crate::tools::intents;

/// MCP handler exposing the GitHub tools by name.
#[derive(Clone)]
pub struct GithubSvc {
    tools: Arc<GithubTools>,
}

impl GithubSvc {
    pub fn new(tools: Arc<GithubTools>) -> Self {
        Self { tools }
    }
}

impl ServerHandler for GithubSvc {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(intents::agent_instructions()),
            ..Default::default()
        }
    }
}

fn parse_args<T: DeserializeOwned>(params: Parameters<JsonObject>) -> Result<T, McpError> {
    serde_json::from_value(serde_json::Value::Object(params.0))
        .map_err(|e| McpError::invalid_params(format!("invalid arguments: {e}"), None))
}

fn text(out: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(out)])
}

fn failed(tool: &'static str) -> impl FnOnce(ToolError) -> McpError {
    move |e| {
        tracing::warn!(tool, error = %e, "tool failed");
        McpError::internal_error(e.to_string(), None)
    }
}

#[rmcp::tool_router]
impl GithubSvc {
    #[rmcp::tool(
        name = "create_github_repository",
        description = "Create a GitHub repository. STRICT TOOL: use ONLY when the user explicitly wants to CREATE a new GitHub repository. Triggers: \"create repo\", \"create repository\", \"create private repo\", \"create public repo\". Do NOT use for README generation, auditing or file creation. Arguments: name (required), description (default \"\"), private (default false)."
    )]
    async fn create_github_repository(&self, params: Parameters<JsonObject>) -> Result<CallToolResult, McpError> {
        let args = parse_args(params)?;
        let out = self
            .tools
            .create_github_repository(args)
            .await
            .map_err(failed("create_github_repository"))?;
        Ok(text(out))
    }

    #[rmcp::tool(
        name = "commit_and_push_file",
        description = "Create or update a file in a GitHub repository and commit it. Triggers: \"commit file\", \"push file\", \"upload file to repo\". Arguments: repo (owner/name), file_path, branch (default \"main\"), commit_message (default \"Update file\")."
    )]
    async fn commit_and_push_file(&self, params: Parameters<JsonObject>) -> Result<CallToolResult, McpError> {
        let args = parse_args(params)?;
        let out = self
            .tools
            .commit_and_push_file(args)
            .await
            .map_err(failed("commit_and_push_file"))?;
        Ok(text(out))
    }

    #[rmcp::tool(
        name = "create_issue",
        description = "Create a GitHub issue. Triggers: \"create issue\", \"open issue\", \"report bug\". Arguments: repo, title, body."
    )]
    async fn create_issue(&self, params: Parameters<JsonObject>) -> Result<CallToolResult, McpError> {
        let args = parse_args(params)?;
        let out = self.tools.create_issue(args).await.map_err(failed("create_issue"))?;
        Ok(text(out))
    }

    #[rmcp::tool(
        name = "create_pr",
        description = "Create a pull request. Triggers: \"create pr\", \"open pull request\". Arguments: repo, title, body, head, base (default \"main\")."
    )]
    async fn create_pr(&self, params: Parameters<JsonObject>) -> Result<CallToolResult, McpError> {
        let args = parse_args(params)?;
        let out = self.tools.create_pr(args).await.map_err(failed("create_pr"))?;
        Ok(text(out))
    }

    #[rmcp::tool(
        name = "audit_repo",
        description = "Suggest GitHub best practices for the given repository. Triggers: \"audit repo\", \"best practices\", \"review repository setup\". Arguments: repo."
    )]
    async fn audit_repo(&self, params: Parameters<JsonObject>) -> Result<CallToolResult, McpError> {
        let args = parse_args(params)?;
        let out = self.tools.audit_repo(args).await.map_err(failed("audit_repo"))?;
        Ok(text(out))
    }

    #[rmcp::tool(
        name = "create_readme_file",
        description = "Generate a professional README for a GitHub repository and save it as README.md. STRICT TOOL: use ONLY when the user wants to GENERATE or UPDATE a README.md file. Triggers: \"generate readme\", \"create readme\", \"update readme\". Do NOT use for creating repositories or auditing repositories. Arguments: repo."
    )]
    async fn create_readme_file(&self, params: Parameters<JsonObject>) -> Result<CallToolResult, McpError> {
        let args = parse_args(params)?;
        let out = self
            .tools
            .create_readme_file(args)
            .await
            .map_err(failed("create_readme_file"))?;
        Ok(text(out))
    }
}

pub type GithubRouter = ToolRouter<GithubSvc>;

impl GithubSvc {
    pub fn router() -> GithubRouter {
        // Expose the macro-generated private tool_router
        Self::tool_router()
    }
}
