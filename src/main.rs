use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bedrock_mcp::api::ApiClient;
use bedrock_mcp::config::{AppConfig, EnvConfig, FileConfig};
use bedrock_mcp::mcp::context::ToolContext;
use bedrock_mcp::mcp::handler::run_stdio_server;
use bedrock_mcp::mcp::registry::McpRegistry;
use bedrock_mcp::tools::register_all_tools;

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to a TOML config file; values there override environment variables.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Log request and response bodies exchanged with the remote manager.
    #[clap(long)]
    pub debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    // Stdout carries the protocol, so all diagnostics go to stderr.
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let config = AppConfig::resolve(cli_args.debug, &EnvConfig::from_env(), file_config)
        .context("configuration error")?;

    info!("Remote manager at {}", config.base_url);

    let client = ApiClient::new(
        config.base_url,
        config.username,
        config.password,
        config.request_timeout_sec,
        config.debug,
    )
    .context("failed to create API client")?;

    let mut registry = McpRegistry::new();
    register_all_tools(&mut registry);
    info!("Serving {} tools over stdio", registry.tool_count());

    let ctx = ToolContext::new(Arc::new(client));
    run_stdio_server(Arc::new(registry), ctx).await
}
