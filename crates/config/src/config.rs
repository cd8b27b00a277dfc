use catalysishub_forward::DEFAULT_USER_AGENT;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Public Catalysis-Hub GraphQL API.
pub const DEFAULT_ENDPOINT: &str = "https://api.catalysis-hub.org/graphql";

/// Default bind host for the HTTP transport.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default bind port for the HTTP transport.
pub const DEFAULT_PORT: u16 = 8787;

/// Default path the JSON-RPC endpoint is served on.
pub const DEFAULT_PATH: &str = "/mcp";

/// Protocol version answered by `initialize` when the client does not request one.
pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

/// Top-level adapter configuration.
///
/// Every section and field is optional in the file; missing values fall back
/// to the defaults above.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// HTTP transport settings
    pub server: ServerConfig,

    /// Upstream GraphQL endpoint settings
    pub upstream: UpstreamConfig,

    /// JSON-RPC handshake settings
    pub protocol: ProtocolConfig,
}

/// Where the HTTP transport listens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// Path serving JSON-RPC (POST), preflight (OPTIONS) and the liveness probe
    pub path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            path: DEFAULT_PATH.to_string(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuration for the GraphQL endpoint queries are forwarded to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// The GraphQL endpoint URL
    pub url: String,

    /// Identifying `User-Agent` header value
    pub user_agent: String,

    /// Request timeout in seconds (default: none, the HTTP client's own behavior applies)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

impl UpstreamConfig {
    #[must_use]
    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Version echoed by `initialize` when the request omits `protocolVersion`
    pub default_version: String,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            default_version: DEFAULT_PROTOCOL_VERSION.to_string(),
        }
    }
}
