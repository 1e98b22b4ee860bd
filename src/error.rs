//! Error types for the Notion MCP server

use thiserror::Error;

/// MCP Server Error
#[derive(Debug, Error)]
pub enum McpError {
    /// Missing or invalid process configuration (token, database id)
    #[error("Configuration error: {0}")]
    Config(String),
    /// Failure raised by the Notion API call
    #[error("Notion API error: {0}")]
    Service(String),
    /// Invalid tool parameters
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),
    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, McpError>;
