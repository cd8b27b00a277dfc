//! Run the MCP HTTP server.

use anyhow::Result;
use catalysishub_config::AdapterConfig;
use catalysishub_mcp::McpHttpServer;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Default, Args)]
pub struct ServeArgs {
    /// Address to bind (overrides config file)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// HTTP path serving JSON-RPC (overrides config file)
    #[arg(long, value_parser = parse_path)]
    path: Option<String>,

    /// Upstream GraphQL endpoint (overrides config file)
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Upstream request timeout in seconds (overrides config file)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,
}

impl ServeArgs {
    /// Layer the flags that were given over `config`.
    fn apply(self, config: &mut AdapterConfig) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(path) = self.path {
            config.server.path = path;
        }
        if let Some(endpoint) = self.endpoint {
            config.upstream.url = endpoint;
        }
        if self.timeout.is_some() {
            config.upstream.timeout = self.timeout;
        }
    }
}

fn parse_path(value: &str) -> Result<String, String> {
    if value.starts_with('/') {
        Ok(value.to_string())
    } else {
        Err(format!("path must start with '/', got '{value}'"))
    }
}

/// Resolve the config, apply `args` and check the merged result.
fn build_config(config_path: Option<PathBuf>, args: ServeArgs) -> Result<AdapterConfig> {
    let mut config = super::resolve_config(config_path)?;
    args.apply(&mut config);
    super::validate_merged(&config)?;
    Ok(config)
}

pub async fn run(config_path: Option<PathBuf>, args: ServeArgs) -> Result<()> {
    let config = build_config(config_path, args)?;
    McpHttpServer::from_config(&config)?.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalysishub_config::DEFAULT_ENDPOINT;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_parse_path() {
        assert_eq!(parse_path("/rpc").unwrap(), "/rpc");
        let err = parse_path("rpc").unwrap_err();
        assert!(err.contains("must start with '/'"));
    }

    #[test]
    fn test_no_flags_keeps_config() {
        let mut config = AdapterConfig::default();
        ServeArgs::default().apply(&mut config);
        assert_eq!(config, AdapterConfig::default());
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = AdapterConfig::default();
        config.upstream.timeout = Some(10);

        ServeArgs {
            host: Some("0.0.0.0".to_string()),
            port: Some(9000),
            path: Some("/rpc".to_string()),
            endpoint: Some("http://localhost:4000/graphql".to_string()),
            timeout: Some(45),
        }
        .apply(&mut config);

        assert_eq!(config.server.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.server.path, "/rpc");
        assert_eq!(config.upstream.url, "http://localhost:4000/graphql");
        assert_eq!(config.upstream.timeout, Some(45));
    }

    #[test]
    fn test_absent_timeout_flag_keeps_file_timeout() {
        let mut config = AdapterConfig::default();
        config.upstream.timeout = Some(10);

        ServeArgs {
            port: Some(9000),
            ..ServeArgs::default()
        }
        .apply(&mut config);

        assert_eq!(config.upstream.timeout, Some(10));
    }

    #[test]
    fn test_flags_override_file_values() {
        let file = config_file(
            r#"
[server]
port = 3000

[upstream]
timeout = 5
"#,
        );

        let config = build_config(
            Some(file.path().to_path_buf()),
            ServeArgs {
                port: Some(9000),
                ..ServeArgs::default()
            },
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.upstream.timeout, Some(5));
        assert_eq!(config.upstream.url, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_invalid_endpoint_flag_is_rejected() {
        let file = config_file("");

        let err = build_config(
            Some(file.path().to_path_buf()),
            ServeArgs {
                endpoint: Some("ftp://example.com/graphql".to_string()),
                ..ServeArgs::default()
            },
        )
        .unwrap_err();

        assert!(format!("{err:#}").contains("upstream.url must be an http(s) URL"));
    }

    #[test]
    fn test_blank_host_flag_is_rejected() {
        let file = config_file("");

        let err = build_config(
            Some(file.path().to_path_buf()),
            ServeArgs {
                host: Some("  ".to_string()),
                ..ServeArgs::default()
            },
        )
        .unwrap_err();

        assert!(format!("{err:#}").contains("server.host must not be empty"));
    }
}
