//! Local search tool handler
//!
//! Searches for businesses and places. Location results from the web search
//! endpoint are resolved into POI details plus AI descriptions; when the
//! query yields no locations, the handler falls back to a plain web search.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::handler::{text_content, McpToolHandler};
use crate::core::brave::{DescriptionsResponse, Poi, MAX_RESULTS};
use crate::core::services::Services;
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema};

pub struct LocalSearchHandler {
    services: Services,
}

impl LocalSearchHandler {
    pub fn new(services: Services) -> Self {
        Self { services }
    }

    fn format_poi(&self, poi: &Poi, descriptions: &DescriptionsResponse) -> String {
        let address = poi
            .address
            .as_ref()
            .map(|a| a.display())
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| "N/A".to_string());

        let rating = poi
            .rating
            .as_ref()
            .map(|r| {
                format!(
                    "{} ({} reviews)",
                    r.value.map_or_else(|| "N/A".to_string(), |v| v.to_string()),
                    r.count.unwrap_or(0)
                )
            })
            .unwrap_or_else(|| "N/A".to_string());

        let hours = if poi.opening_hours.is_empty() {
            "N/A".to_string()
        } else {
            poi.opening_hours.join(", ")
        };

        let description = descriptions
            .descriptions
            .get(&poi.id)
            .map(String::as_str)
            .unwrap_or("No description available");

        format!(
            "Name: {}\nAddress: {}\nPhone: {}\nRating: {}\nPrice Range: {}\nHours: {}\nDescription: {}",
            poi.name,
            address,
            poi.phone.as_deref().unwrap_or("N/A"),
            rating,
            poi.price_range.as_deref().unwrap_or("N/A"),
            hours,
            description
        )
    }
}

#[async_trait]
impl McpToolHandler for LocalSearchHandler {
    fn name(&self) -> &str {
        "brave_local_search"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "brave_local_search".to_string(),
            description: "Searches for local businesses and places using Brave's Local \
                          Search API. Best for queries related to physical locations, \
                          businesses, restaurants, services, etc. Returns detailed \
                          information including business names, addresses, ratings, \
                          review counts, phone numbers and opening hours. Use this when \
                          the query implies 'near me' or mentions a specific location. \
                          Falls back to web search when no local results are found."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Local search query (e.g. 'pizza near Central Park')"
                    },
                    "count": {
                        "type": "integer",
                        "description": "Number of results (1-20, default 5)",
                        "default": 5,
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
        struct LocalSearchArgs {
            query: String,
            #[serde(default = "default_count")]
            count: usize,
        }
        fn default_count() -> usize {
            5
        }

        let args: LocalSearchArgs =
            serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

        if args.query.trim().is_empty() {
            return Err(McpError::InvalidParams("Query cannot be empty".to_string()));
        }

        let brave = &self.services.brave;
        let response = brave.web_search(&args.query, args.count, 0).await?;

        let ids: Vec<String> = response
            .locations
            .as_ref()
            .map(|locations| {
                locations
                    .results
                    .iter()
                    .take(args.count)
                    .map(|location| location.id.clone())
                    .collect()
            })
            .unwrap_or_default();

        if ids.is_empty() {
            // No location results; answer with the plain web results instead.
            let results = response
                .web
                .as_ref()
                .map(|web| web.results.as_slice())
                .unwrap_or_default();

            let text = if results.is_empty() {
                format!("No local results found for '{}'.", args.query)
            } else {
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
            };

            return Ok(text_content(text));
        }

        let (pois, descriptions) =
            tokio::try_join!(brave.local_pois(&ids), brave.local_descriptions(&ids))?;

        let text = pois
            .results
            .iter()
            .map(|poi| self.format_poi(poi, &descriptions))
            .collect::<Vec<_>>()
            .join("\n---\n");

        Ok(text_content(text))
    }
}
