//! Query adapter: validation, pagination and normalization.

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{McpError, Result};
use crate::notion::NotionClient;
use crate::record::{NormalizedRecord, RawPage};

/// Hard cap the service places on a single page of results.
const MAX_PAGE_SIZE: u32 = 100;

/// Parameters for the `notionSelect` tool.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    /// Database to query; falls back to the configured default.
    #[serde(default)]
    pub database_id: Option<String>,
    /// Notion-format filter, passed through verbatim.
    #[serde(default)]
    pub filter_conditions: Option<Value>,
    /// Notion-format sorts, passed through verbatim.
    #[serde(default)]
    pub sort_conditions: Option<Vec<Value>>,
    /// Total cap on items returned (1-100), not the per-call page size.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_size() -> u32 {
    MAX_PAGE_SIZE
}

impl Default for QueryRequest {
    fn default() -> Self {
        QueryRequest {
            database_id: None,
            filter_conditions: None,
            sort_conditions: None,
            page_size: default_page_size(),
        }
    }
}

/// Notion query adapter. Request-scoped: holds configuration only, no
/// cross-request state.
pub struct NotionAdapter {
    config: Config,
}

impl NotionAdapter {
    /// Create an adapter over the given configuration.
    pub fn new(config: Config) -> Self {
        NotionAdapter { config }
    }

    /// Run one query: validate, paginate until the requested count is
    /// satisfied or the service is exhausted, then normalize.
    ///
    /// Any failure discards accumulated items; there is no partial-success
    /// shape and no retry.
    pub async fn query(&self, request: QueryRequest) -> Result<Value> {
        let token = self
            .config
            .notion_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| McpError::Config("Notion API token is not configured".to_string()))?;

        let database_id = request
            .database_id
            .clone()
            .filter(|id| !id.is_empty())
            .or_else(|| self.config.default_database_id.clone())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| McpError::Config("No database ID provided".to_string()))?;

        let page_size = request.page_size.clamp(1, MAX_PAGE_SIZE);

        info!("Querying Notion database '{}'", database_id);
        info!("Filter conditions: {:?}", request.filter_conditions);
        info!("Sort conditions: {:?}", request.sort_conditions);

        let client = NotionClient::new(token, self.config.api_url.trim_end_matches('/'));
        let items = self.collect_pages(&client, &database_id, page_size, &request).await?;

        let data: Vec<NormalizedRecord> = items.into_iter().map(NormalizedRecord::from).collect();

        Ok(serde_json::json!({
            "status": "success",
            "count": data.len(),
            "data": data,
        }))
    }

    /// Drive the pagination loop. The next page is never requested before
    /// the previous one resolves; the cursor is only known afterwards.
    async fn collect_pages(
        &self,
        client: &NotionClient,
        database_id: &str,
        page_size: u32,
        request: &QueryRequest,
    ) -> Result<Vec<RawPage>> {
        let mut items: Vec<RawPage> = Vec::new();
        let mut cursor: Option<String> = None;
        let mut has_more = true;

        while has_more && (items.len() as u32) < page_size {
            let fetch_size = MAX_PAGE_SIZE.min(page_size - items.len() as u32);
            let page = client
                .query_page(
                    database_id,
                    fetch_size,
                    cursor.as_deref(),
                    request.filter_conditions.as_ref(),
                    request.sort_conditions.as_deref(),
                )
                .await?;

            items.extend(page.results);
            has_more = page.has_more;
            cursor = page.next_cursor;

            // The continuation signal is not trusted to be consistent:
            // has_more without a cursor terminates the loop early.
            if has_more && cursor.is_none() {
                warn!(
                    "Notion reported has_more=true with no next_cursor; \
                     truncating at {} items",
                    items.len()
                );
                break;
            }
            if !has_more {
                break;
            }
        }

        Ok(items)
    }
}
