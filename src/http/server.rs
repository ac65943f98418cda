//! HTTP server wiring: router construction, socket binding, and the
//! connection-serving loop with timeout enforcement.

use std::sync::Arc;
use std::time::Duration;

use axum::http::Request;
use axum::routing::any;
use axum::Router;
use hyper::body::Incoming;
use hyper_util::rt::{TokioExecutor, TokioIo, TokioTimer};
use hyper_util::server::conn::auto::Builder;
use thiserror::Error;
use tokio::net::TcpListener;
use tower::ServiceExt as _;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tracing::{debug, info};

use crate::core::config::{Config, ConfigError, TimeoutConfig};
use crate::core::error::SearchError;
use crate::core::services::Services;
use crate::http::{handlers, middleware};
use crate::mcp::handlers::ProtocolHandlers;

/// Startup failures of the HTTP adapter.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to initialize search client: {0}")]
    Client(#[from] SearchError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the application router.
///
/// Both endpoints accept any HTTP method; the per-request exchange timeout
/// is enforced here, connection-level timeouts in [`serve`].
pub fn router(handlers: Arc<ProtocolHandlers>, request_timeout: Duration) -> Router {
    Router::new()
        .route("/mcp", any(handlers::mcp_handler))
        .route("/ping", any(handlers::ping_handler))
        .layer(axum::middleware::from_fn(middleware::log_request))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CorsLayer::permissive())
        .with_state(handlers)
}

/// Bind the listening socket and serve until process termination.
///
/// Re-validates the HTTP invariants first: an invalid listener must never
/// start, however this function was reached.
///
/// # Errors
///
/// Returns an error on invalid configuration, client construction failure,
/// bind failure, or a failing accept loop.
pub async fn serve(config: Config) -> Result<(), ServeError> {
    config.validate_http()?;
    config.log_config();

    let timeouts = config.timeouts;
    let addr = format!("{}:{}", config.host, config.port);

    let services = Services::new(config)?;
    let handlers = Arc::new(ProtocolHandlers::new(services));
    let app = router(handlers, timeouts.request);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServeError::Bind {
            addr: addr.clone(),
            source,
        })?;

    info!("Server is running on http://{addr}/mcp");
    info!("Liveness probe at http://{addr}/ping");

    serve_connections(listener, app, timeouts).await
}

/// Accept loop.
///
/// Serves each connection through hyper's auto (HTTP/1 + HTTP/2) builder so
/// the connection-level timeouts can be applied: `headers` bounds header
/// receipt (and the idle gap between keep-alive requests), `keep_alive`
/// bounds HTTP/2 keep-alive pings. The per-request bound lives in the
/// router's `TimeoutLayer`.
async fn serve_connections(
    listener: TcpListener,
    app: Router,
    timeouts: TimeoutConfig,
) -> Result<(), ServeError> {
    loop {
        let (socket, peer) = listener.accept().await?;
        let app = app.clone();

        tokio::spawn(async move {
            let socket = TokioIo::new(socket);
            let service = hyper::service::service_fn(move |request: Request<Incoming>| {
                app.clone().oneshot(request)
            });

            let mut builder = Builder::new(TokioExecutor::new());
            builder
                .http1()
                .timer(TokioTimer::new())
                .header_read_timeout(timeouts.headers)
                .keep_alive(true);
            builder
                .http2()
                .timer(TokioTimer::new())
                .keep_alive_interval(Some(timeouts.headers))
                .keep_alive_timeout(timeouts.keep_alive);

            if let Err(err) = builder
                .serve_connection_with_upgrades(socket, service)
                .await
            {
                // Dropped connections and timeouts land here; per-request
                // failures were already answered by the handlers.
                debug!("Connection from {peer} ended with error: {err:?}");
            }
        });
    }
}
