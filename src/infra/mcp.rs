//! MCP transports (stdio + Streamable HTTP) for the GitHub tool router.

use std::sync::Arc;

use rmcp::handler::server::router::Router;
use rmcp::serve_server;
use rmcp::transport::streamable_http_server::tower::{StreamableHttpServerConfig, StreamableHttpService};

pub use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
pub use rmcp::ServerHandler;

use crate::tools::github::GithubTools;
use crate::tools::mcp_router::{GithubRouter, GithubSvc};

pub type GithubService = Router<GithubSvc>;

/// Factory shape rmcp transports expect: a fresh `(handler, tools)` pair per
/// session. All pairs share the same `GithubTools`.
pub fn make_factory(tools: Arc<GithubTools>) -> impl Fn() -> (GithubSvc, GithubRouter) + Clone + Send + Sync + 'static {
    move || (GithubSvc::new(tools.clone()), GithubSvc::router())
}

/// Speak MCP over stdin/stdout until the peer disconnects.
pub async fn serve_stdio(
    factory: impl FnOnce() -> (GithubSvc, GithubRouter),
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let (handler, tools) = factory();
    let service = Router::new(handler).with_tools(tools);
    tracing::info!("serving MCP over stdio");
    let running = serve_server(service, (tokio::io::stdin(), tokio::io::stdout())).await?;
    running.waiting().await?;
    Ok(())
}

pub fn make_streamable_http_service(
    factory: impl Fn() -> (GithubSvc, GithubRouter) + Send + Sync + Clone + 'static,
    session_mgr: Arc<LocalSessionManager>,
) -> StreamableHttpService<GithubService, LocalSessionManager> {
    let cfg = StreamableHttpServerConfig::default();
    tracing::debug!(stateful_mode = %cfg.stateful_mode, keep_alive = ?cfg.sse_keep_alive, "StreamableHttpServerConfig");
    let service_factory = move || {
        let (handler, tools) = factory();
        Ok(Router::new(handler).with_tools(tools))
    };
    StreamableHttpService::new(service_factory, session_mgr, cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::github::fake::FakeGithub;
    use crate::infra::config::ToolDefaults;

    fn tools() -> Arc<GithubTools> {
        let fake = Arc::new(FakeGithub::new("ok", serde_json::json!(null)));
        Arc::new(GithubTools::from_client(fake, ToolDefaults::default()))
    }

    #[test]
    fn factory_yields_full_router_each_time() {
        let factory = make_factory(tools());
        for _ in 0..2 {
            let (_svc, router) = factory();
            assert_eq!(router.list_all().len(), 6);
        }
    }

    #[tokio::test]
    async fn streamable_http_service_builds() {
        // Construction only: ensures the factory produces a Service<RoleServer>.
        let session_mgr = Arc::new(LocalSessionManager::default());
        let _svc = make_streamable_http_service(make_factory(tools()), session_mgr);
    }
}
