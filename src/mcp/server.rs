//! MCP server loop over stdio

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, info};

use crate::core::services::Services;
use crate::mcp::error::McpError;
use crate::mcp::handlers::ProtocolHandlers;
use crate::mcp::protocol::{JsonRpcRequest, JsonRpcResponse};
use crate::mcp::transport::StdioTransport;

pub struct McpServer {
    transport: StdioTransport,
    handlers: Arc<ProtocolHandlers>,
}

impl McpServer {
    pub fn new(services: Services) -> Self {
        Self {
            transport: StdioTransport::new(),
            handlers: Arc::new(ProtocolHandlers::new(services)),
        }
    }

    /// Run the MCP server (blocking).
    ///
    /// Reads newline-delimited JSON-RPC messages from stdin until the stream
    /// closes or Ctrl-C arrives; both are clean termination. Errors while
    /// processing a single message become error responses, never crashes.
    ///
    /// # Errors
    ///
    /// Returns an error only when stdin or stdout themselves fail.
    pub async fn run(&mut self) -> Result<(), McpError> {
        info!("Starting Brave Search MCP server on stdio");

        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin).lines();

        // Spawn signal handler
        let mut shutdown = tokio::spawn(async {
            tokio::signal::ctrl_c().await.ok();
        });

        loop {
            tokio::select! {
                // Process stdin messages
                line = reader.next_line() => {
                    match line? {
                        Some(line) if !line.trim().is_empty() => {
                            self.process_and_respond(&line).await?;
                        }
                        None => break, // EOF
                        _ => continue,
                    }
                }

                // Handle Ctrl+C
                _ = &mut shutdown => {
                    info!("Received shutdown signal");
                    break;
                }
            }
        }

        info!("MCP server shutting down");
        Ok(())
    }

    async fn process_and_respond(&mut self, line: &str) -> Result<(), McpError> {
        debug!("Received: {}", line);

        let response = self.process_message(line).await;
        self.transport.send_response(response).await
    }

    /// Process one framed message into a response.
    ///
    /// Never fails: malformed lines map to a parse-error response (id null),
    /// handler errors to an error response correlated with the request id.
    pub async fn process_message(&self, line: &str) -> JsonRpcResponse {
        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                error!("Failed to parse message: {}", e);
                let (code, message) =
                    McpError::ParseError(e.to_string()).code_and_message();
                return JsonRpcResponse::error(None, code, message);
            }
        };

        let id = request.id.clone();
        match self.handlers.dispatch(request).await {
            Ok(response) => response,
            Err(e) => {
                error!("Error processing message: {}", e);
                let (code, message) = e.code_and_message();
                JsonRpcResponse::error(id, code, message)
            }
        }
    }
}
