//! Brave Search MCP Server
//!
//! Exposes Brave Search to AI-agent clients through the Model Context
//! Protocol (MCP) over two transports: stdio for local process embedding and
//! a session-less HTTP endpoint for networked access.
//!
//! # Architecture
//!
//! The codebase is organized into three main modules:
//!
//! - **core**: Domain logic (protocol-agnostic)
//!   - config (flag/env resolution and validation)
//!   - brave (Brave Search API client)
//!   - error, services
//!
//! - **mcp**: Protocol layer and stdio adapter (depends on core)
//!   - protocol (JSON-RPC 2.0 wire types), handlers (method routing)
//!   - tools (web, local, news search)
//!   - server, transport (stdio binding)
//!
//! - **http**: HTTP adapter (depends on core and the mcp protocol layer)
//!   - handlers (`/mcp`, `/ping`), middleware, server (timeouts)
//!
//! # Key properties
//!
//! - Immutable configuration, resolved once at startup
//! - Session-less HTTP: every request is an independent exchange
//! - Deferred API-key validation (tool-invocation time, typed check)
//! - Per-request error isolation: nothing a client sends crashes the process

// Core domain logic (protocol-agnostic)
pub mod core;

// HTTP transport adapter
pub mod http;

// MCP protocol layer and stdio adapter
pub mod mcp;

// Re-export commonly used types for convenience
pub use crate::core::config::{Config, ConfigError, Env, TimeoutConfig, Transport};
pub use crate::core::error::{Result, SearchError};
pub use crate::core::services::Services;
