//! HTTP transport adapter
//!
//! Depends on `core/` and the protocol layer in `mcp/`; never on the stdio
//! transport. Exposes the session-less `/mcp` endpoint and the `/ping`
//! liveness probe via the Axum web framework.

pub mod handlers;
pub mod middleware;
pub mod server;

pub use handlers::{mcp_handler, ping_handler};
pub use server::{router, serve, ServeError};
