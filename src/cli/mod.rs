use clap::{Parser, Subcommand};
use std::process::ExitCode;

use crate::core::github::GithubApi;
use crate::infra::config::{AppConfig, Config};
use crate::tools::intents::TOOL_INTENTS;

#[derive(Parser)]
#[command(name = "github-agent-tools")]
#[command(about = "GitHub tools for LLM agents, served over MCP")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the MCP server (stdio or HTTP per MODE); the default
    Serve,
    /// Health check a running server
    Health {
        /// Service URL to check
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
    /// Validate and print the effective configuration
    Config {
        /// Only validate; do not print the configuration
        #[arg(long)]
        validate: bool,
    },
    /// Show service status and configuration
    Status {
        /// Service URL to check
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
    /// List the tools and the phrases that should select them
    Tools,
    /// Audit a repository directly, without going through MCP
    Audit {
        /// Repository as owner/name
        repo: String,
    },
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();

    run_commands(cli.command.unwrap_or(Commands::Serve)).await
}

pub async fn run_commands(command: Commands) -> ExitCode {
    match command {
        Commands::Serve => match crate::infra::boot::run_server().await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!(error = %format!("{e:#}"), "server exited");
                ExitCode::FAILURE
            }
        },
        Commands::Health { url } => match health_check(&url).await {
            Ok(_) => {
                println!("✅ Service is healthy");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Health check failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Config { validate } => match validate_config() {
            Ok(app_cfg) => {
                if !validate {
                    print!("{}", render_config(&app_cfg));
                }
                println!("✅ Configuration is valid");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Configuration validation failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Status { url } => match show_status(&url).await {
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("❌ Status check failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Tools => {
            print!("{}", render_tool_table());
            ExitCode::SUCCESS
        }
        Commands::Audit { repo } => match audit(&repo).await {
            Ok(report) => {
                println!("{report}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Audit failed: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}

async fn health_check(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/healthz", url))
        .timeout(std::time::Duration::from_millis(500))
        .send()
        .await?;

    if response.status().is_success() {
        Ok(())
    } else {
        Err(format!("HTTP {}", response.status()).into())
    }
}

fn validate_config() -> Result<AppConfig, Box<dyn std::error::Error>> {
    let cfg = Config::from_env();
    if !matches!(cfg.mode.as_str(), "server" | "stdio") {
        return Err(format!("Invalid MODE: {}. Must be 'server' or 'stdio'", cfg.mode).into());
    }
    if cfg.mode == "server" && cfg.port == 0 {
        return Err("PORT cannot be 0".into());
    }

    let app_cfg = AppConfig::load()?;
    let base = app_cfg.github.base_url.as_str();
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(format!("Invalid GitHub API URL: {base}").into());
    }
    if app_cfg.defaults.branch.trim().is_empty() {
        return Err("Default branch cannot be empty".into());
    }
    Ok(app_cfg)
}

async fn show_status(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();

    let health_response = client
        .get(format!("{}/healthz", url))
        .timeout(std::time::Duration::from_secs(5))
        .send()
        .await?;

    println!(
        "🏥 Health Status: {}",
        if health_response.status().is_success() {
            "✅ Healthy"
        } else {
            "❌ Unhealthy"
        }
    );

    let app_cfg = AppConfig::load()?;
    let github = crate::clients::github::GithubRemote::from_config(&app_cfg.github)?;
    println!(
        "🐙 GitHub API ({}): {}",
        github.base_url(),
        if github.health().await { "✅ Reachable" } else { "❌ Unreachable" }
    );

    println!("\n📋 Configuration:");
    println!(
        "  Mode: {}",
        std::env::var("MODE").unwrap_or_else(|_| "server".into())
    );
    println!(
        "  Port: {}",
        std::env::var("PORT").unwrap_or_else(|_| "8080".into())
    );
    println!(
        "  Log Level: {}",
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into())
    );
    println!(
        "  GitHub Token: {}",
        if app_cfg.github.token.is_some() { "configured" } else { "Not configured" }
    );
    println!("  Default Branch: {}", app_cfg.defaults.branch);
    println!("  README Path: {}", app_cfg.defaults.readme_path.display());

    Ok(())
}

fn render_config(app_cfg: &AppConfig) -> String {
    let github = &app_cfg.github;
    let defaults = &app_cfg.defaults;
    let mut out = String::from("[github]\n");
    out.push_str(&format!("  base_url = {}\n", github.base_url));
    out.push_str(&format!(
        "  token = {}\n",
        if github.token.is_some() { "<set>" } else { "<unset>" }
    ));
    out.push_str(&format!("  retries = {}\n", github.retries.unwrap_or(2)));
    if let Some(ms) = github.connect_timeout_ms {
        out.push_str(&format!("  connect_timeout_ms = {ms}\n"));
    }
    if let Some(ms) = github.timeout_ms {
        out.push_str(&format!("  timeout_ms = {ms}\n"));
    }
    out.push_str("[defaults]\n");
    out.push_str(&format!("  branch = {}\n", defaults.branch));
    out.push_str(&format!("  commit_message = {}\n", defaults.commit_message));
    out.push_str(&format!("  readme_path = {}\n", defaults.readme_path.display()));
    out
}

fn render_tool_table() -> String {
    let mut out = String::new();
    for intent in TOOL_INTENTS {
        out.push_str(&format!("{}\n  {}\n", intent.name, intent.summary));
        if !intent.triggers.is_empty() {
            out.push_str(&format!("  triggers: {}\n", intent.triggers.join(" | ")));
        }
        if !intent.avoid.is_empty() {
            out.push_str(&format!("  not for:  {}\n", intent.avoid.join(" | ")));
        }
    }
    out
}

async fn audit(repo: &str) -> Result<String, Box<dyn std::error::Error>> {
    let app_cfg = AppConfig::load()?;
    let github = crate::clients::github::GithubRemote::from_config(&app_cfg.github)?;
    Ok(github.audit_repository(repo).await?)
}
