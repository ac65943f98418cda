//! Error types for the Brave Search core.
//!
//! This module defines the errors produced by the search client.
//! Protocol-specific error handling (JSON-RPC error codes, HTTP status
//! mapping) is handled in the respective adapter modules.

use thiserror::Error;

/// Result type alias for search operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors produced by the Brave Search API client
#[derive(Error, Debug)]
pub enum SearchError {
    #[error(
        "Brave API key is required to execute search tools. \
         Set the BRAVE_API_KEY environment variable or use the \
         --brave-api-key command line option. \
         You can get an API key at https://brave.com/search/api/"
    )]
    MissingApiKey,

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Brave API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SearchError {
    /// Check if this failure is the deferred API-key capability check
    pub fn is_missing_key(&self) -> bool {
        matches!(self, SearchError::MissingApiKey)
    }

    /// Check if this is upstream rate limiting (HTTP 429)
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, SearchError::Api { status: 429, .. })
    }

    /// Check if this is a bad request error (invalid input)
    pub fn is_bad_request(&self) -> bool {
        matches!(self, SearchError::InvalidQuery(_))
    }
}
