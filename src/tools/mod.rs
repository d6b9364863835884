pub mod github;
pub mod intents;
pub mod mcp_router;
