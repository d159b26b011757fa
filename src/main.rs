//! MCP Server Entry Point
//!
//! Loads configuration, initializes logging, and starts the time filter
//! server with the configured transport.

use anyhow::Result;
use tracing::{info, warn};

use timefilter_mcp_server::core::{Config, McpServer, TransportService, init_logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment (and .env, if present)
    let config = Config::from_env()?;

    init_logging(&config.logging);

    info!("Starting {} v{}", config.server.name, config.server.version);
    info!("Transport: {}", config.transport.description());

    if config.auth.api_key.is_some() {
        info!("API key authentication enabled");
    } else if !config.transport.is_stdio() {
        warn!("MCP_API_KEY not set - HTTP endpoints accept unauthenticated requests");
    }

    let server = McpServer::new(config.clone())?;

    info!("Server initialized");

    let transport = TransportService::new(config.transport);
    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}
