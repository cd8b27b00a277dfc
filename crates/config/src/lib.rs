//! Configuration for the Catalysis-Hub MCP adapter.
//!
//! Settings come from an optional config file (TOML, YAML or JSON) found by
//! walking up from the working directory, with every field defaulted. The
//! binary layers command-line flags on top of what is loaded here.

mod config;
mod error;
mod loader;

pub use config::{
    AdapterConfig, ProtocolConfig, ServerConfig, UpstreamConfig, DEFAULT_ENDPOINT, DEFAULT_HOST,
    DEFAULT_PATH, DEFAULT_PORT, DEFAULT_PROTOCOL_VERSION,
};
pub use error::{ConfigError, Result};
pub use loader::{
    find_config, load_config, load_config_from_str, validate_config, CONFIG_FILES,
};
