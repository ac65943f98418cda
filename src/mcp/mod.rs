//! MCP (Model Context Protocol) adapter
//!
//! This module implements a JSON-RPC 2.0 compliant MCP server that exposes
//! Brave Search as MCP tools. The protocol layer ([`handlers`], [`protocol`],
//! [`tools`]) is transport-agnostic; [`server`] and [`transport`] bind it to
//! stdio, while the `http` module binds it to session-less HTTP exchanges.

pub mod error;
pub mod handlers;
pub mod protocol;
pub mod server;
pub mod tools;
pub mod transport;

// Re-export main types
pub use error::McpError;
pub use handlers::ProtocolHandlers;
pub use server::McpServer;
pub use tools::{McpToolHandler, ToolRegistry};
