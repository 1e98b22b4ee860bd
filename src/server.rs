//! MCP protocol host: JSON-RPC 2.0 over stdin/stdout.
//!
//! One request is handled at a time; diagnostics go to stderr via `tracing`
//! so stdout stays a clean protocol channel.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use crate::adapter::NotionAdapter;
use crate::tools::{dispatch_tool, get_tools_list};

/// JSON-RPC error codes used by the server.
pub const PARSE_ERROR: i64 = -32700;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;

/// MCP JSON-RPC request
#[derive(Debug, Deserialize)]
pub struct McpRequest {
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

/// Tools/call wrapper params (MCP protocol)
#[derive(Debug, Deserialize)]
struct ToolsCallParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

/// MCP JSON-RPC response
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum McpResponse {
    Success {
        jsonrpc: &'static str,
        id: Option<Value>,
        result: Value,
    },
    Error {
        jsonrpc: &'static str,
        id: Option<Value>,
        error: RpcError,
    },
}

#[derive(Debug, Serialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl McpResponse {
    fn success(id: Option<Value>, result: Value) -> Self {
        McpResponse::Success {
            jsonrpc: "2.0",
            id,
            result,
        }
    }

    fn error(id: Option<Value>, code: i64, message: String) -> Self {
        McpResponse::Error {
            jsonrpc: "2.0",
            id,
            error: RpcError { code, message },
        }
    }
}

/// MCP server over a line-delimited JSON-RPC transport.
pub struct McpServer {
    adapter: NotionAdapter,
}

impl McpServer {
    pub fn new(adapter: NotionAdapter) -> Self {
        McpServer { adapter }
    }

    /// Read requests from stdin and write responses to stdout until EOF.
    pub async fn run(&self) -> std::io::Result<()> {
        let stdin = tokio::io::stdin();
        let mut stdout = tokio::io::stdout();
        let mut lines = BufReader::new(stdin).lines();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(response) = self.handle_line(&line).await {
                let serialized = serde_json::to_string(&response)
                    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
                stdout.write_all(serialized.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
        }

        info!("stdin closed, shutting down");
        Ok(())
    }

    /// Parse one input line and handle it. Returns `None` for notifications.
    pub async fn handle_line(&self, line: &str) -> Option<McpResponse> {
        let request: McpRequest = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                return Some(McpResponse::error(
                    None,
                    PARSE_ERROR,
                    format!("Parse error: {}", e),
                ));
            }
        };
        self.handle_request(request).await
    }

    /// Handle a single MCP request.
    pub async fn handle_request(&self, request: McpRequest) -> Option<McpResponse> {
        debug!("Handling MCP method: {}", request.method);

        // Notifications carry no id and get no response
        if request.method.starts_with("notifications/") || request.method == "initialized" {
            return None;
        }

        let response = match request.method.as_str() {
            "initialize" => McpResponse::success(
                request.id,
                json!({
                    "protocolVersion": "2024-11-05",
                    "capabilities": { "tools": {} },
                    "serverInfo": {
                        "name": crate::NAME,
                        "version": crate::VERSION,
                    }
                }),
            ),
            "ping" => McpResponse::success(request.id, json!({})),
            "tools/list" => McpResponse::success(request.id, get_tools_list()),
            "tools/call" => self.handle_tools_call(request.id, request.params).await,
            other => McpResponse::error(
                request.id,
                METHOD_NOT_FOUND,
                format!("Method not found: {}", other),
            ),
        };
        Some(response)
    }

    async fn handle_tools_call(&self, id: Option<Value>, params: Value) -> McpResponse {
        let call: ToolsCallParams = match serde_json::from_value(params) {
            Ok(call) => call,
            Err(e) => {
                return McpResponse::error(
                    id,
                    INVALID_PARAMS,
                    format!("Invalid tools/call params: {}", e),
                );
            }
        };
        let arguments = call.arguments.unwrap_or_else(|| json!({}));

        match dispatch_tool(&call.name, arguments, &self.adapter).await {
            Ok(payload) => {
                let is_error = payload.get("error").is_some();
                let text = serde_json::to_string_pretty(&payload)
                    .unwrap_or_else(|_| "{}".to_string());
                let mut result = json!({
                    "content": [{ "type": "text", "text": text }]
                });
                if is_error {
                    result["isError"] = json!(true);
                }
                McpResponse::success(id, result)
            }
            Err(e) => McpResponse::error(id, INVALID_PARAMS, e.to_string()),
        }
    }
}
