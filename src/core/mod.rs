//! Core domain logic (protocol-agnostic).
//!
//! Configuration resolution, the Brave Search API client, and the shared
//! service container. Adapters (`mcp/`, `http/`) depend on this module and
//! never on each other.

pub mod brave;
pub mod config;
pub mod error;
pub mod services;
