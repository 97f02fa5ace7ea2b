use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod api;
mod config;
mod middleware;
mod session;
mod sse;

use config::{Overrides, ServerConfig};

#[derive(Parser, Debug)]
#[command(name = "sumble-mcp-server")]
#[command(about = "MCP gateway for the Sumble data API over HTTP + Server-Sent Events", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "sumble-mcp.toml")]
    config: PathBuf,

    #[command(flatten)]
    overrides: Overrides,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "sumble_server=info,sumble_mcp=info,sumble_sdk=info,tower_http=debug".into()
            }),
        )
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let args = Args::parse();

    tracing::info!("Starting Sumble MCP server");

    // Load configuration
    let config = ServerConfig::load(&args.config, args.overrides)?;
    tracing::info!("Upstream API: {}", config.upstream.base_url);

    api::serve(config).await?;

    Ok(())
}
