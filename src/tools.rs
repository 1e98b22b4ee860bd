//! MCP tool definitions and dispatch.

use serde_json::{json, Value};
use tracing::error;

use crate::adapter::{NotionAdapter, QueryRequest};
use crate::error::{McpError, Result};

/// Get the list of all available tools for MCP tools/list
pub fn get_tools_list() -> Value {
    json!({
        "tools": [
            {
                "name": "notionSelect",
                "description": "Query items from a Notion database. filter_conditions and sort_conditions must follow the Notion API query format.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "database_id": {
                            "type": "string",
                            "description": "ID of the Notion database to query (falls back to the configured default)"
                        },
                        "filter_conditions": {
                            "type": "object",
                            "description": "Filter, e.g. {\"property\": \"Status\", \"select\": {\"equals\": \"In progress\"}}"
                        },
                        "sort_conditions": {
                            "type": "array",
                            "items": { "type": "object" },
                            "description": "Sorts, e.g. [{\"property\": \"Created\", \"direction\": \"descending\"}]"
                        },
                        "page_size": {
                            "type": "integer",
                            "description": "Maximum number of items to return (1-100)",
                            "minimum": 1,
                            "maximum": 100,
                            "default": 100
                        }
                    },
                    "required": []
                }
            }
        ]
    })
}

/// Dispatch a tool call to the appropriate handler.
///
/// Configuration and service failures are folded into the tool's own
/// `{"error": ...}` payload so callers always receive a well-formed result
/// object; only malformed arguments or an unknown tool surface as `Err`.
pub async fn dispatch_tool(name: &str, params: Value, adapter: &NotionAdapter) -> Result<Value> {
    match name {
        "notionSelect" => {
            let request: QueryRequest = serde_json::from_value(params)
                .map_err(|e| McpError::InvalidParams(format!("Invalid query parameters: {}", e)))?;
            match adapter.query(request).await {
                Ok(payload) => Ok(payload),
                Err(e) => {
                    error!("Notion query failed: {}", e);
                    Ok(json!({ "error": e.to_string() }))
                }
            }
        }
        _ => Err(McpError::InvalidParams(format!("Unknown tool: {}", name))),
    }
}
