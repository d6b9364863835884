use std::process::ExitCode;

use github_agent_tools::{cli, infra};

#[tokio::main]
async fn main() -> ExitCode {
    infra::logging::init();
    cli::run().await
}
