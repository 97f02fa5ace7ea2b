// Standalone MCP server binary (stdio transport)

use anyhow::{Context, Result};
use std::time::Duration;
use sumble_mcp::server::McpServer;
use sumble_mcp::tools::ToolRegistry;
use sumble_sdk::{SumbleClient, DEFAULT_BASE_URL};

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the protocol; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sumble_mcp=info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let api_key = std::env::var("SUMBLE_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty())
        .context("SUMBLE_API_KEY must be set to your Sumble API key")?;

    let base_url = std::env::var("SUMBLE_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

    let timeout_secs = match std::env::var("SUMBLE_TIMEOUT_SECS") {
        Ok(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("SUMBLE_TIMEOUT_SECS is not a number: {}", raw))?,
        Err(_) => 30,
    };

    let client = SumbleClient::builder()
        .api_key(api_key)
        .base_url(base_url)
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .context("Failed to create Sumble API client")?;

    let registry = ToolRegistry::sumble();
    tracing::info!("Sumble MCP server starting on stdio with {} tools", registry.len());

    let server = McpServer::new(registry, client);
    server.serve_stdio().await?;

    Ok(())
}
