//! Notion MCP Server - Model Context Protocol server for querying Notion databases

pub mod adapter;
pub mod config;
pub mod error;
pub mod notion;
pub mod record;
pub mod server;
pub mod tools;

// Re-export main types
pub use adapter::{NotionAdapter, QueryRequest};
pub use config::Config;
pub use error::{McpError, Result};
pub use notion::{NotionClient, QueryPage};
pub use record::{NormalizedRecord, Property, RawPage};
pub use server::{McpRequest, McpResponse, McpServer};
pub use tools::{dispatch_tool, get_tools_list};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = "mcp-notion-server";
