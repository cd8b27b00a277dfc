use crate::{AdapterConfig, ConfigError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names to search for, in order of preference
pub const CONFIG_FILES: &[&str] = &[
    "catalysishub-mcp.toml",
    ".catalysishub-mcp.toml",
    ".catalysishub-mcp.yml",
    ".catalysishub-mcp.yaml",
    ".catalysishub-mcp.json",
];

/// Find a config file by walking up the directory tree from the given start directory.
/// Returns the path to the config file if found.
#[tracing::instrument(fields(start = %start_dir.display()))]
pub fn find_config(start_dir: &Path) -> Result<Option<PathBuf>> {
    let mut current_dir = start_dir.to_path_buf();
    let mut checked_dirs = 0;

    loop {
        tracing::trace!(dir = %current_dir.display(), "Checking directory for config files");
        for file_name in CONFIG_FILES {
            let config_path = current_dir.join(file_name);
            if config_path.is_file() {
                tracing::info!(path = %config_path.display(), checked_dirs, "Found config file");
                return Ok(Some(config_path));
            }
        }

        checked_dirs += 1;
        if !current_dir.pop() {
            tracing::debug!(checked_dirs, "No config file found");
            break;
        }
    }

    Ok(None)
}

/// Load the adapter config from the specified path.
/// The format is detected from the file extension.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<AdapterConfig> {
    tracing::debug!("Reading config file");
    let contents = fs::read_to_string(path)?;
    let config = load_config_from_str(&contents, path)?;
    tracing::info!(
        upstream = %config.upstream.url,
        bind = %config.server.bind_address(),
        "Config loaded successfully"
    );
    Ok(config)
}

/// Load the adapter config from a string.
/// The path is used for error messages and format detection.
#[tracing::instrument(skip(contents), fields(path = %path.display(), size = contents.len()))]
pub fn load_config_from_str(contents: &str, path: &Path) -> Result<AdapterConfig> {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

    let config = match extension {
        "toml" => parse_toml(contents, path)?,
        "yml" | "yaml" => parse_yaml(contents, path)?,
        "json" => parse_json(contents, path)?,
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };

    tracing::debug!("Validating config");
    validate_config(&config, path)?;

    Ok(config)
}

fn parse_toml(contents: &str, path: &Path) -> Result<AdapterConfig> {
    toml::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("TOML parse error: {e}"),
    })
}

fn parse_yaml(contents: &str, path: &Path) -> Result<AdapterConfig> {
    // An empty YAML document means "all defaults"
    if contents.trim().is_empty() {
        return Ok(AdapterConfig::default());
    }
    serde_saphyr::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("YAML parse error: {e}"),
    })
}

fn parse_json(contents: &str, path: &Path) -> Result<AdapterConfig> {
    serde_json::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("JSON parse error: {e}"),
    })
}

/// Validate a configuration. `path` names where the values came from in
/// error messages.
pub fn validate_config(config: &AdapterConfig, path: &Path) -> Result<()> {
    let invalid = |message: String| ConfigError::Invalid {
        path: path.to_path_buf(),
        message,
    };

    let url = config.upstream.url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(invalid(format!(
            "upstream.url must be an http(s) URL, got '{url}'"
        )));
    }

    if config.upstream.user_agent.trim().is_empty() {
        return Err(invalid("upstream.user_agent must not be empty".to_string()));
    }

    if config.upstream.timeout == Some(0) {
        return Err(invalid(
            "upstream.timeout must be at least 1 second (omit it to disable)".to_string(),
        ));
    }

    if !config.server.path.starts_with('/') {
        return Err(invalid(format!(
            "server.path must start with '/', got '{}'",
            config.server.path
        )));
    }

    if config.server.host.trim().is_empty() {
        return Err(invalid("server.host must not be empty".to_string()));
    }

    if config.protocol.default_version.trim().is_empty() {
        return Err(invalid(
            "protocol.default_version must not be empty".to_string(),
        ));
    }

    Ok(())
}
