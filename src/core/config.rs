//! Configuration resolution for the Brave Search MCP server.
//!
//! Merges command-line flags over environment variables over built-in
//! defaults into one immutable [`Config`], validated before any transport
//! starts. There is no runtime reconfiguration: the resolved value is
//! constructed once at process start and passed to the adapters.

use std::ffi::OsString;
use std::fmt;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: &str = "0.0.0.0";

const DEFAULT_HEADERS_TIMEOUT_SECS: u64 = 10;
const DEFAULT_KEEP_ALIVE_TIMEOUT_SECS: u64 = 20;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 25;

/// Selected MCP transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    /// Newline-delimited JSON-RPC over the process's stdin/stdout.
    Stdio,
    /// Session-less JSON-RPC over an HTTP endpoint.
    Http,
}

impl Transport {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "stdio" => Some(Self::Stdio),
            "http" => Some(Self::Http),
            _ => None,
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdio => f.write_str("stdio"),
            Self::Http => f.write_str("http"),
        }
    }
}

/// Validation failures reported by [`Config::resolve`].
///
/// All of these are fatal: the caller logs the message and exits non-zero
/// before any listener starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid --transport value: '{0}'. Must be one of: stdio, http.")]
    InvalidTransport(String),

    #[error("Invalid --port value: '{0}'. Must be a valid port number between 1 and 65535.")]
    InvalidPort(String),

    #[error("Error: --host is required")]
    MissingHost,

    #[error("Invalid timeout configuration: {0}")]
    InvalidTimeouts(String),
}

/// HTTP server timeout tunables.
///
/// These bound resource usage against slow or dead clients (e.g. behind a
/// reverse proxy with its own shorter limit). Exact values are a deployment
/// tuning parameter; the ordering invariant `headers < keep_alive < request`
/// is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Header-receipt timeout, applied as the HTTP/1 header read timeout
    /// (initial read and between keep-alive requests).
    pub headers: Duration,

    /// Keep-alive timeout, applied as the HTTP/2 keep-alive ping timeout.
    pub keep_alive: Duration,

    /// Overall per-request exchange timeout.
    pub request: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            headers: Duration::from_secs(DEFAULT_HEADERS_TIMEOUT_SECS),
            keep_alive: Duration::from_secs(DEFAULT_KEEP_ALIVE_TIMEOUT_SECS),
            request: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl TimeoutConfig {
    /// Build from environment overrides, falling back to defaults.
    ///
    /// Unparseable override values are ignored rather than fatal; ordering
    /// violations are caught by [`TimeoutConfig::validate`].
    fn from_env(env: &Env) -> Self {
        let mut timeouts = Self::default();

        if let Some(secs) = parse_secs(env.headers_timeout_secs.as_deref()) {
            timeouts.headers = secs;
        }
        if let Some(secs) = parse_secs(env.keep_alive_timeout_secs.as_deref()) {
            timeouts.keep_alive = secs;
        }
        if let Some(secs) = parse_secs(env.request_timeout_secs.as_deref()) {
            timeouts.request = secs;
        }

        timeouts
    }

    /// Enforce the ordering invariant `headers < keep_alive < request`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.headers.is_zero() {
            return Err(ConfigError::InvalidTimeouts(
                "headers timeout must be non-zero".to_string(),
            ));
        }

        if self.headers >= self.keep_alive || self.keep_alive >= self.request {
            return Err(ConfigError::InvalidTimeouts(format!(
                "required ordering is headers < keep_alive < request, got {}s / {}s / {}s",
                self.headers.as_secs(),
                self.keep_alive.as_secs(),
                self.request.as_secs()
            )));
        }

        Ok(())
    }
}

fn parse_secs(raw: Option<&str>) -> Option<Duration> {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

/// Snapshot of the environment variables the resolver reads.
///
/// Taken once by the caller ([`Env::from_process`]) so that
/// [`Config::resolve`] stays a pure function over explicit inputs and
/// validation tests never mutate the process environment.
#[derive(Debug, Clone, Default)]
pub struct Env {
    pub transport: Option<String>,
    pub port: Option<String>,
    pub host: Option<String>,
    pub api_key: Option<String>,
    pub headers_timeout_secs: Option<String>,
    pub keep_alive_timeout_secs: Option<String>,
    pub request_timeout_secs: Option<String>,
}

impl Env {
    /// Read the supported variables from the process environment.
    pub fn from_process() -> Self {
        fn var(name: &str) -> Option<String> {
            std::env::var(name).ok().filter(|v| !v.is_empty())
        }

        Self {
            transport: var("BRAVE_MCP_TRANSPORT"),
            port: var("BRAVE_MCP_PORT"),
            host: var("BRAVE_MCP_HOST"),
            api_key: var("BRAVE_API_KEY"),
            headers_timeout_secs: var("BRAVE_MCP_HEADERS_TIMEOUT_SECS"),
            keep_alive_timeout_secs: var("BRAVE_MCP_KEEP_ALIVE_TIMEOUT_SECS"),
            request_timeout_secs: var("BRAVE_MCP_REQUEST_TIMEOUT_SECS"),
        }
    }
}

/// Raw command-line flags.
///
/// `ignore_errors` makes clap tolerate options this server does not know
/// about, so a hosting process can pass extra flags through without breaking
/// startup.
#[derive(Parser, Debug, Default)]
#[command(
    name = "brave-search-mcp",
    version,
    about = "Brave Search MCP server with stdio and HTTP transports",
    ignore_errors = true
)]
struct RawArgs {
    /// Transport type: stdio or http
    #[arg(long)]
    transport: Option<String>,

    /// Brave Search API subscription token
    #[arg(long)]
    brave_api_key: Option<String>,

    /// Listening port for the HTTP transport
    #[arg(long)]
    port: Option<String>,

    /// Bind host for the HTTP transport
    #[arg(long)]
    host: Option<String>,
}

/// Resolved, immutable server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub transport: Transport,
    pub port: u16,
    pub host: String,

    /// Brave Search subscription token. May be empty: validated lazily when a
    /// search tool is invoked, never at startup.
    pub api_key: String,

    pub timeouts: TimeoutConfig,
}

impl Config {
    /// Resolve configuration from command-line arguments and an environment
    /// snapshot.
    ///
    /// Precedence: flags over environment over defaults. Validation order:
    /// transport, then (for HTTP only) port, host, timeout ordering.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] describing the first violated rule.
    pub fn resolve<I, T>(argv: I, env: &Env) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        // With ignore_errors set, clap swallows unknown-flag errors itself;
        // the fallback covers argv shapes it still refuses outright.
        let args = RawArgs::try_parse_from(argv).unwrap_or_default();

        let transport_raw = args
            .transport
            .or_else(|| env.transport.clone())
            .unwrap_or_else(|| Transport::Stdio.to_string());
        let transport = Transport::parse(&transport_raw)
            .ok_or(ConfigError::InvalidTransport(transport_raw))?;

        let port_raw = args.port.or_else(|| env.port.clone());
        let host = args
            .host
            .or_else(|| env.host.clone())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let api_key = args
            .brave_api_key
            .or_else(|| env.api_key.clone())
            .unwrap_or_default();
        let timeouts = TimeoutConfig::from_env(env);

        let port = match transport {
            Transport::Http => parse_port(port_raw.as_deref())?,
            // Port is unused over stdio; keep whatever parses, else default.
            Transport::Stdio => port_raw
                .as_deref()
                .and_then(|raw| raw.trim().parse().ok())
                .unwrap_or(DEFAULT_PORT),
        };

        if transport == Transport::Http {
            if host.trim().is_empty() {
                return Err(ConfigError::MissingHost);
            }
            timeouts.validate()?;
        }

        Ok(Self {
            transport,
            port,
            host,
            api_key,
            timeouts,
        })
    }

    /// Re-check the invariants the HTTP adapter depends on.
    ///
    /// The resolver already enforced these; the adapter refuses to bind an
    /// invalid listener regardless of how its input was constructed.
    pub fn validate_http(&self) -> Result<(), ConfigError> {
        if self.transport != Transport::Http {
            return Err(ConfigError::InvalidTransport(self.transport.to_string()));
        }
        if self.host.trim().is_empty() {
            return Err(ConfigError::MissingHost);
        }
        self.timeouts.validate()
    }

    /// Log the resolved configuration, redacting the API key.
    pub fn log_config(&self) {
        tracing::info!("Configuration resolved:");
        tracing::info!("  Transport: {}", self.transport);
        tracing::info!("  Host: {}", self.host);
        tracing::info!("  Port: {}", self.port);
        tracing::info!(
            "  Brave API key: {}",
            if self.api_key.is_empty() {
                "NOT SET"
            } else {
                "SET"
            }
        );
        tracing::info!(
            "  Timeouts: headers {}s, keep-alive {}s, request {}s",
            self.timeouts.headers.as_secs(),
            self.timeouts.keep_alive.as_secs(),
            self.timeouts.request.as_secs()
        );
    }
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_PORT);
    };

    match raw.trim().parse::<u32>() {
        Ok(port @ 1..=65535) => Ok(port as u16),
        _ => Err(ConfigError::InvalidPort(raw.to_string())),
    }
}
