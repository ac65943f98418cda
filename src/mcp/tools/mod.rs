//! MCP tool implementations
//!
//! This module contains the tool handlers that expose Brave Search to MCP
//! clients.

pub mod handler;
pub mod local_search;
pub mod news_search;
pub mod registry;
pub mod web_search;

pub use handler::{text_content, McpToolHandler};
pub use local_search::LocalSearchHandler;
pub use news_search::NewsSearchHandler;
pub use registry::ToolRegistry;
pub use web_search::WebSearchHandler;
