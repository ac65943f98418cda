//! Middleware for the HTTP adapter
//!
//! Provides request logging with duration tracking.

use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use tracing::{debug, error, info};

/// Request logging middleware
///
/// Logs all incoming requests with method, URI, status code, and duration.
/// Liveness probes on `/ping` are logged at DEBUG so orchestrator health
/// checks do not flood the log; other successes at INFO, failures at ERROR.
pub async fn log_request(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let duration_ms = start.elapsed().as_millis();
    let status = response.status();

    if status.is_success() {
        if uri.path() == "/ping" {
            debug!(
                method = %method,
                uri = %uri,
                status = %status.as_u16(),
                duration_ms = %duration_ms,
                "Request completed"
            );
        } else {
            info!(
                method = %method,
                uri = %uri,
                status = %status.as_u16(),
                duration_ms = %duration_ms,
                "Request completed"
            );
        }
    } else {
        error!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            duration_ms = %duration_ms,
            "Request failed"
        );
    }

    response
}
