//! News search tool handler

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::handler::{text_content, McpToolHandler};
use crate::core::brave::{NewsSearchResponse, MAX_RESULTS};
use crate::core::services::Services;
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema};

pub struct NewsSearchHandler {
    services: Services,
}

impl NewsSearchHandler {
    pub fn new(services: Services) -> Self {
        Self { services }
    }

    fn format_results(&self, query: &str, response: &NewsSearchResponse) -> String {
        if response.results.is_empty() {
            return format!("No news results found for '{query}'.");
        }

        response
            .results
            .iter()
            .map(|result| {
                let age = result.age.as_deref().unwrap_or("unknown age");
                format!(
                    "Title: {}\nAge: {}\nDescription: {}\nURL: {}",
                    result.title, age, result.description, result.url
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[async_trait]
impl McpToolHandler for NewsSearchHandler {
    fn name(&self) -> &str {
        "brave_news_search"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "brave_news_search".to_string(),
            description: "Searches current news articles using the Brave Search API. \
                          Use this for recent events, breaking news, and time-sensitive \
                          topics. Results include the article age so recency can be \
                          judged. Maximum 20 results per request."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "News search query"
                    },
                    "count": {
                        "type": "integer",
                        "description": "Number of results (1-20, default 10)",
                        "default": 10,
                        "minimum": 1,
                        "maximum": MAX_RESULTS
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn execute(&self, args: Value) -> Result<ToolResult, McpError> {
        #[derive(Deserialize)]
        struct NewsSearchArgs {
            query: String,
            #[serde(default = "default_count")]
            count: usize,
        }
        fn default_count() -> usize {
            10
        }

        let args: NewsSearchArgs =
            serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

        if args.query.trim().is_empty() {
            return Err(McpError::InvalidParams("Query cannot be empty".to_string()));
        }

        let response = self
            .services
            .brave
            .news_search(&args.query, args.count)
            .await?;

        Ok(text_content(self.format_results(&args.query, &response)))
    }
}
