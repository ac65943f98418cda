//! HTTP request handlers for the MCP endpoint and the liveness probe.
//!
//! `/mcp` accepts any HTTP method and runs one session-less JSON-RPC
//! exchange per request; `/ping` is a pure liveness probe with no protocol
//! involvement.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use tracing::{debug, error};

use crate::mcp::error::McpError;
use crate::mcp::handlers::ProtocolHandlers;
use crate::mcp::protocol::{JsonRpcRequest, JsonRpcResponse, INTERNAL_ERROR, PARSE_ERROR};

/// Upper bound on an `/mcp` request body; larger bodies are rejected as
/// client errors instead of buffering unbounded input.
const MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

/// MCP endpoint handler.
///
/// Accepts any method: the protocol negotiates method semantics itself, and
/// anything that is not a well-formed JSON-RPC message fails in (a) below.
/// Internal faults map to the generic 500 JSON-RPC envelope; they never
/// propagate past this handler or affect sibling requests.
pub async fn mcp_handler(
    State(handlers): State<Arc<ProtocolHandlers>>,
    request: Request<Body>,
) -> Response {
    match handle_mcp(&handlers, request).await {
        Ok(response) => response,
        Err(e) => {
            error!("MCP request error: {}", e);
            internal_error_response()
        }
    }
}

async fn handle_mcp(
    handlers: &ProtocolHandlers,
    request: Request<Body>,
) -> Result<Response, McpError> {
    // (a) read and parse the body as JSON
    let bytes = match axum::body::to_bytes(request.into_body(), MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!("Failed to read request body: {}", e);
            return Ok(parse_error_response(format!(
                "Failed to read request body: {e}"
            )));
        }
    };

    let message: JsonRpcRequest = match serde_json::from_slice(&bytes) {
        Ok(message) => message,
        Err(e) => {
            debug!("Malformed request body: {}", e);
            return Ok(parse_error_response(format!("Parse error: {e}")));
        }
    };

    // (b) fresh per-request binding, (c) connected to the shared handlers,
    // (d) one JSON-RPC exchange written back as the HTTP response.
    RequestBinding::new(handlers).handle(message).await
}

/// Per-request binding between one HTTP exchange and the shared protocol
/// handlers.
///
/// Constructed fresh for every request and dropped when the response is
/// produced. No session id is generated or honored; nothing survives the
/// exchange, so concurrent requests share only the read-only handlers.
struct RequestBinding<'a> {
    handlers: &'a ProtocolHandlers,
}

impl<'a> RequestBinding<'a> {
    fn new(handlers: &'a ProtocolHandlers) -> Self {
        Self { handlers }
    }

    async fn handle(self, message: JsonRpcRequest) -> Result<Response, McpError> {
        let is_notification = message.is_notification();

        // Dispatch errors are internal faults; JSON-RPC level failures
        // (unknown method, tool errors) come back as Ok(error response).
        let response = self.handlers.dispatch(message).await?;

        if is_notification && response.is_empty() {
            return Ok(StatusCode::ACCEPTED.into_response());
        }

        Ok((StatusCode::OK, Json(response)).into_response())
    }
}

/// Liveness probe handler: any method, any body, no protocol involvement.
pub async fn ping_handler() -> impl IntoResponse {
    Json(json!({ "message": "pong" }))
}

/// The generic JSON-RPC error envelope for internal faults, sent with 500.
pub fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "id": null,
            "jsonrpc": "2.0",
            "error": { "code": INTERNAL_ERROR, "message": "Internal server error" }
        })),
    )
        .into_response()
}

fn parse_error_response(message: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(JsonRpcResponse::error(None, PARSE_ERROR, message)),
    )
        .into_response()
}
