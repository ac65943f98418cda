//! Brave Search MCP server entry point
//!
//! Resolves configuration once, then starts exactly one transport adapter.
//! Configuration failures and adapter startup errors exit non-zero before or
//! instead of serving; a closed stdin stream is clean termination.

use std::process::ExitCode;

use brave_search_mcp::core::config::{Config, Env, Transport};
use brave_search_mcp::core::services::Services;
use brave_search_mcp::mcp::McpServer;

fn init_tracing() {
    // stderr, never stdout: the stdio transport owns stdout for protocol
    // frames.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .compact()
        .try_init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let config = match Config::resolve(std::env::args(), &Env::from_process()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("Invalid configuration");
            return ExitCode::from(1);
        }
    };

    match config.transport {
        Transport::Stdio => {
            let services = match Services::new(config) {
                Ok(services) => services,
                Err(e) => {
                    eprintln!("Failed to initialize services: {e}");
                    return ExitCode::from(1);
                }
            };

            let mut server = McpServer::new(services);
            if let Err(e) = server.run().await {
                eprintln!("MCP server error: {e}");
                return ExitCode::from(1);
            }
        }
        Transport::Http => {
            if let Err(e) = brave_search_mcp::http::serve(config).await {
                eprintln!("HTTP server error: {e}");
                return ExitCode::from(1);
            }
        }
    }

    ExitCode::SUCCESS
}
