//! Web search tool handler

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::handler::{text_content, McpToolHandler};
use crate::core::brave::{WebSearchResponse, MAX_OFFSET, MAX_RESULTS};
use crate::core::services::Services;
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema};

pub struct WebSearchHandler {
    services: Services,
}

impl WebSearchHandler {
    pub fn new(services: Services) -> Self {
        Self { services }
    }

    fn format_results(&self, query: &str, response: &WebSearchResponse) -> String {
        let results = response
            .web
            .as_ref()
            .map(|web| web.results.as_slice())
            .unwrap_or_default();

        if results.is_empty() {
            return format!("No results found for '{query}'.");
        }

        results
            .iter()
            .map(|result| {
                format!(
                    "Title: {}\nDescription: {}\nURL: {}",
                    result.title, result.description, result.url
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[async_trait]
impl McpToolHandler for WebSearchHandler {
    fn name(&self) -> &str {
        "brave_web_search"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "brave_web_search".to_string(),
            description: "Performs a web search using the Brave Search API, ideal for \
                          general queries, news, articles, and online content. Use this \
                          for broad information gathering, recent events, or when you \
                          need diverse web sources. Supports pagination and freshness \
                          controls. Maximum 20 results per request, with offset for \
                          pagination."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query (max 400 chars, 50 words)"
                    },
                    "count": {
                        "type": "integer",
                        "description": "Number of results (1-20, default 10)",
                        "default": 10,
                        "minimum": 1,
                        "maximum": MAX_RESULTS
                    },
                    "offset": {
                        "type": "integer",
                        "description": "Pagination offset (0-9, default 0)",
                        "default": 0,
                        "minimum": 0,
                        "maximum": MAX_OFFSET
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn execute(&self, args: Value) -> Result<ToolResult, McpError> {
        #[derive(Deserialize)]
        struct WebSearchArgs {
            query: String,
            #[serde(default = "default_count")]
            count: usize,
            #[serde(default)]
            offset: usize,
        }
        fn default_count() -> usize {
            10
        }

        let args: WebSearchArgs =
            serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

        if args.query.trim().is_empty() {
            return Err(McpError::InvalidParams("Query cannot be empty".to_string()));
        }

        let response = self
            .services
            .brave
            .web_search(&args.query, args.count, args.offset)
            .await?;

        Ok(text_content(self.format_results(&args.query, &response)))
    }
}
