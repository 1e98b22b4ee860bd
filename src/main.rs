// Notion MCP Server - Main entry point

use anyhow::Context;
use tracing::{info, warn};

use mcp_notion::{Config, McpServer, NotionAdapter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries the MCP protocol
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Notion MCP Server v{}", mcp_notion::VERSION);

    let config = Config::load().context("Failed to load configuration")?;

    if config.notion_token.is_none() {
        warn!("NOTION_API_KEY is not set; queries will fail until a token is configured");
    }
    if config.default_database_id.is_none() {
        warn!("NOTION_DATABASE_ID is not set; callers must supply database_id");
    }
    // The configured endpoint is reported but never bound; transport is stdio
    info!("Configured for {}:{}, serving MCP over stdio", config.host, config.port);

    let adapter = NotionAdapter::new(config);
    let server = McpServer::new(adapter);
    server.run().await.context("Server error")?;

    Ok(())
}
