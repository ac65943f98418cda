//! Brave Search API client.
//!
//! Thin reqwest wrapper over the Brave Search REST endpoints (web, local
//! POIs, local descriptions, news). The subscription token is optional at
//! construction time; [`BraveClient::subscription_token`] is the typed
//! capability check that defers key validation to the first tool call.

use std::borrow::Cow;
use std::collections::HashMap;

use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::core::error::{Result, SearchError};

const BRAVE_API_BASE: &str = "https://api.search.brave.com";
const BRAVE_API_BASE_ENV: &str = "BRAVE_API_BASE";
const SUBSCRIPTION_TOKEN_HEADER: &str = "X-Subscription-Token";

const ERROR_BODY_MAX_BYTES: usize = 2048;

/// Maximum results per page accepted by the Brave API
pub const MAX_RESULTS: usize = 20;
/// Maximum result-page offset accepted by the Brave API
pub const MAX_OFFSET: usize = 9;

pub struct BraveClient {
    client: reqwest::Client,
    base: Cow<'static, str>,
    api_key: Option<String>,
}

impl BraveClient {
    /// Create a client against the production API base (overridable via
    /// `BRAVE_API_BASE`).
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be built.
    pub fn new(api_key: &str) -> Result<Self> {
        Ok(Self {
            client: build_http_client()?,
            base: env_base(),
            api_key: non_empty(api_key),
        })
    }

    /// Create a client against an explicit API base, e.g. a local proxy or a
    /// mock server in tests.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be built.
    pub fn with_base(base: impl Into<String>, api_key: &str) -> Result<Self> {
        Ok(Self {
            client: build_http_client()?,
            base: Cow::Owned(base.into()),
            api_key: non_empty(api_key),
        })
    }

    /// The deferred API-key capability check.
    ///
    /// Absence of a key is not a startup error; it only fails here, when a
    /// search tool actually needs the token.
    pub fn subscription_token(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or(SearchError::MissingApiKey)
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base.as_ref().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let token = self.subscription_token()?;

        let resp = self
            .client
            .get(self.endpoint(path))
            .query(query)
            .header(ACCEPT, "application/json")
            .header(SUBSCRIPTION_TOKEN_HEADER, token)
            .send()
            .await?;

        let status = resp.status();
        let bytes = resp.bytes().await?;

        if !status.is_success() {
            return Err(SearchError::Api {
                status: status.as_u16(),
                message: body_excerpt(&bytes),
            });
        }

        serde_json::from_slice(&bytes).map_err(SearchError::from)
    }

    /// Run a web search.
    ///
    /// `count` is clamped to 1–20 and `offset` to 0–9, the ranges the Brave
    /// API accepts.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MissingApiKey`] when no token is configured,
    /// [`SearchError::Api`] on non-success statuses.
    pub async fn web_search(
        &self,
        query: &str,
        count: usize,
        offset: usize,
    ) -> Result<WebSearchResponse> {
        let count = count.clamp(1, MAX_RESULTS).to_string();
        let offset = offset.min(MAX_OFFSET).to_string();

        self.get_json(
            "res/v1/web/search",
            &[("q", query), ("count", &count), ("offset", &offset)],
        )
        .await
    }

    /// Fetch point-of-interest details for location ids returned by a web
    /// search.
    pub async fn local_pois(&self, ids: &[String]) -> Result<PoisResponse> {
        let query: Vec<(&str, &str)> = ids.iter().map(|id| ("ids", id.as_str())).collect();
        self.get_json("res/v1/local/pois", &query).await
    }

    /// Fetch AI-generated descriptions for location ids.
    pub async fn local_descriptions(&self, ids: &[String]) -> Result<DescriptionsResponse> {
        let query: Vec<(&str, &str)> = ids.iter().map(|id| ("ids", id.as_str())).collect();
        self.get_json("res/v1/local/descriptions", &query).await
    }

    /// Run a news search. `count` is clamped to 1–20.
    pub async fn news_search(&self, query: &str, count: usize) -> Result<NewsSearchResponse> {
        let count = count.clamp(1, MAX_RESULTS).to_string();

        self.get_json("res/v1/news/search", &[("q", query), ("count", &count)])
            .await
    }
}

fn build_http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("brave-search-mcp/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(SearchError::from)
}

fn env_base() -> Cow<'static, str> {
    std::env::var(BRAVE_API_BASE_ENV)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(Cow::Owned)
        .unwrap_or(Cow::Borrowed(BRAVE_API_BASE))
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn body_excerpt(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(&bytes[..bytes.len().min(ERROR_BODY_MAX_BYTES)]);
    text.trim().to_string()
}

// --- Wire types ---------------------------------------------------------
//
// Only the fields the tools render are modeled; the Brave API returns far
// more, which serde skips.

#[derive(Debug, Deserialize)]
pub struct WebSearchResponse {
    #[serde(default)]
    pub web: Option<WebResults>,
    #[serde(default)]
    pub locations: Option<LocationResults>,
}

#[derive(Debug, Deserialize)]
pub struct WebResults {
    #[serde(default)]
    pub results: Vec<WebResult>,
}

#[derive(Debug, Deserialize)]
pub struct WebResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct LocationResults {
    #[serde(default)]
    pub results: Vec<LocationRef>,
}

#[derive(Debug, Deserialize)]
pub struct LocationRef {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PoisResponse {
    #[serde(default)]
    pub results: Vec<Poi>,
}

#[derive(Debug, Deserialize)]
pub struct Poi {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: Option<PostalAddress>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub rating: Option<Rating>,
    #[serde(default, rename = "priceRange")]
    pub price_range: Option<String>,
    #[serde(default, rename = "openingHours")]
    pub opening_hours: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct PostalAddress {
    #[serde(default, rename = "streetAddress")]
    pub street_address: Option<String>,
    #[serde(default, rename = "addressLocality")]
    pub locality: Option<String>,
    #[serde(default, rename = "addressRegion")]
    pub region: Option<String>,
    #[serde(default, rename = "postalCode")]
    pub postal_code: Option<String>,
}

impl PostalAddress {
    /// Comma-joined display form, skipping absent parts.
    pub fn display(&self) -> String {
        [
            self.street_address.as_deref(),
            self.locality.as_deref(),
            self.region.as_deref(),
            self.postal_code.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

#[derive(Debug, Deserialize)]
pub struct Rating {
    #[serde(default, rename = "ratingValue")]
    pub value: Option<f64>,
    #[serde(default, rename = "ratingCount")]
    pub count: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct DescriptionsResponse {
    #[serde(default)]
    pub descriptions: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct NewsSearchResponse {
    #[serde(default)]
    pub results: Vec<NewsResult>,
}

#[derive(Debug, Deserialize)]
pub struct NewsResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub age: Option<String>,
}
