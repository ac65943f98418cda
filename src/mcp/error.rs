//! MCP-specific error types

use thiserror::Error;

use crate::core::error::SearchError;
use crate::mcp::protocol::{
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, MISSING_API_KEY, PARSE_ERROR, RATE_LIMITED,
    SEARCH_FAILED,
};

#[derive(Debug, Error)]
pub enum McpError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Tool error (code {0}): {1}")]
    ToolError(i32, String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl McpError {
    /// Map onto the JSON-RPC error code and message for the wire.
    pub fn code_and_message(&self) -> (i32, String) {
        match self {
            McpError::ParseError(msg) => (PARSE_ERROR, msg.clone()),
            McpError::InvalidRequest(msg) => (INVALID_REQUEST, msg.clone()),
            McpError::InvalidParams(msg) => (INVALID_PARAMS, msg.clone()),
            McpError::InternalError(msg) => (INTERNAL_ERROR, msg.clone()),
            McpError::ToolError(code, msg) => (*code, msg.clone()),
            McpError::Io(e) => (INTERNAL_ERROR, format!("I/O error: {e}")),
            McpError::Json(e) => (INTERNAL_ERROR, format!("JSON error: {e}")),
        }
    }
}

impl From<SearchError> for McpError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::MissingApiKey => {
                McpError::ToolError(MISSING_API_KEY, SearchError::MissingApiKey.to_string())
            }
            SearchError::InvalidQuery(msg) => McpError::InvalidParams(msg),
            SearchError::Api { status: 429, message } => McpError::ToolError(
                RATE_LIMITED,
                format!("Brave API rate limit exceeded: {message}"),
            ),
            SearchError::Api { status, message } => McpError::ToolError(
                SEARCH_FAILED,
                format!("Brave API error (HTTP {status}): {message}"),
            ),
            SearchError::Http(e) => {
                McpError::ToolError(SEARCH_FAILED, format!("HTTP request failed: {e}"))
            }
            SearchError::Json(e) => McpError::InternalError(format!("Serialization error: {e}")),
        }
    }
}
