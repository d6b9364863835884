use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;

use crate::clients::github::GithubRemote;
use crate::infra::config::{AppConfig, Config};
use crate::tools::github::GithubTools;

/// Wire the GitHub client into the tool layer from configuration.
pub fn build_tools(app_cfg: &AppConfig) -> anyhow::Result<Arc<GithubTools>> {
    let remote = GithubRemote::from_config(&app_cfg.github).context("building GitHub client")?;
    if app_cfg.github.token.is_none() {
        tracing::warn!("GITHUB_TOKEN not set; write operations will be rejected by GitHub");
    }
    Ok(Arc::new(GithubTools::from_client(Arc::new(remote), app_cfg.defaults.clone())))
}

pub async fn run_server() -> anyhow::Result<()> {
    let cfg = Config::from_env();
    let app_cfg = AppConfig::load()?;
    tracing::info!(
        mode = %cfg.mode,
        port = cfg.port,
        github_api = %app_cfg.github.base_url,
        "BOOT github-agent-tools"
    );
    let tools = build_tools(&app_cfg)?;

    // Stdio mode: MCP over stdio only, no HTTP.
    if cfg.mode == "stdio" {
        crate::infra::mcp::serve_stdio(crate::infra::mcp::make_factory(tools))
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
        return Ok(());
    }

    let app = crate::infra::http_app::build_app(tools);
    let addr: SocketAddr = ([0, 0, 0, 0], cfg.port).into();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
