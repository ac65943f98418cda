//! Unified service container.
//!
//! Provides shared, read-only access to the resolved configuration and the
//! Brave API client. All adapters use this same struct.

use std::sync::Arc;

use crate::core::brave::BraveClient;
use crate::core::config::Config;
use crate::core::error::Result;

/// Read-only service bundle shared by the stdio and HTTP adapters.
///
/// Nothing in here is mutated after startup, so clones are cheap and
/// concurrent request handlers need no locks.
#[derive(Clone)]
pub struct Services {
    /// Application configuration
    pub config: Arc<Config>,

    /// Brave Search API client
    pub brave: Arc<BraveClient>,
}

impl Services {
    /// Create services from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn new(config: Config) -> Result<Self> {
        let brave = Arc::new(BraveClient::new(&config.api_key)?);

        Ok(Self {
            config: Arc::new(config),
            brave,
        })
    }

    /// Create services around an explicit client, e.g. one pointed at a mock
    /// API server in tests.
    pub fn with_client(config: Config, brave: BraveClient) -> Self {
        Self {
            config: Arc::new(config),
            brave: Arc::new(brave),
        }
    }
}
