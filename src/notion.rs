//! HTTP client for the Notion database query endpoint.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{McpError, Result};
use crate::record::RawPage;

/// Notion API version sent with every request.
pub const NOTION_VERSION: &str = "2022-06-28";

/// One page of query results with its continuation signal.
#[derive(Debug, Deserialize)]
pub struct QueryPage {
    #[serde(default)]
    pub results: Vec<RawPage>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Thin client over the "query a database" endpoint.
pub struct NotionClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl NotionClient {
    /// Create a client for the given base URL (no trailing slash).
    pub fn new(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        NotionClient {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// Fetch a single page of results.
    ///
    /// `page_size` must be <= 100 (the service caps any single page there).
    /// The cursor, filter and sorts are omitted from the request body when
    /// absent, per the Notion query contract.
    pub async fn query_page(
        &self,
        database_id: &str,
        page_size: u32,
        cursor: Option<&str>,
        filter: Option<&Value>,
        sorts: Option<&[Value]>,
    ) -> Result<QueryPage> {
        let mut body = serde_json::json!({ "page_size": page_size });
        if let Some(cursor) = cursor {
            body["start_cursor"] = serde_json::json!(cursor);
        }
        if let Some(filter) = filter {
            body["filter"] = filter.clone();
        }
        if let Some(sorts) = sorts {
            body["sorts"] = serde_json::json!(sorts);
        }

        let url = format!("{}/v1/databases/{}/query", self.base_url, database_id);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| McpError::Service(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(McpError::Service(format!("{}: {}", status, detail)));
        }

        response
            .json::<QueryPage>()
            .await
            .map_err(|e| McpError::Service(format!("Malformed response: {}", e)))
    }
}
