// Common test utilities and fixtures
//
// Note: helpers may appear unused in one test harness but are used in the
// other (mcp.rs and http.rs compile this module independently).
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use brave_search_mcp::core::brave::BraveClient;
use brave_search_mcp::core::config::{Config, Env};
use brave_search_mcp::core::services::Services;
use brave_search_mcp::http;
use brave_search_mcp::mcp::handlers::ProtocolHandlers;

/// Resolve an HTTP-transport configuration from defaults.
pub fn test_config() -> Config {
    Config::resolve(["brave-search-mcp", "--transport", "http"], &Env::default()).unwrap()
}

/// Services wired to a Brave client pointed at `api_base`.
pub fn create_test_services(api_base: &str, api_key: &str) -> Services {
    let brave = BraveClient::with_base(api_base, api_key).unwrap();
    Services::with_client(test_config(), brave)
}

/// Protocol handlers wired to a Brave client pointed at `api_base`.
pub fn create_test_handlers(api_base: &str, api_key: &str) -> Arc<ProtocolHandlers> {
    Arc::new(ProtocolHandlers::new(create_test_services(
        api_base, api_key,
    )))
}

/// Router wired like production, pointed at the given API base.
pub fn create_test_app(api_base: &str, api_key: &str) -> Router {
    http::router(
        create_test_handlers(api_base, api_key),
        Duration::from_secs(5),
    )
}

/// App with no reachable search API and no key; for protocol-only tests
/// (nothing in them should ever reach the network).
pub fn create_offline_app() -> Router {
    create_test_app("http://127.0.0.1:1", "")
}
