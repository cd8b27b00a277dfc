pub mod query;
pub mod serve;

use anyhow::{Context, Result};
use catalysishub_config::{find_config, load_config, validate_config, AdapterConfig};
use std::path::{Path, PathBuf};

/// Source named in validation errors for values overridden on the command line.
const COMMAND_LINE: &str = "command-line flags";

/// Load the config named on the command line, else the nearest config file
/// above the working directory, else defaults.
pub fn resolve_config(explicit: Option<PathBuf>) -> Result<AdapterConfig> {
    let path = match explicit {
        Some(path) => Some(path),
        None => {
            let cwd = std::env::current_dir().context("Failed to read working directory")?;
            find_config(&cwd)?
        }
    };

    match path {
        Some(path) => load_config(&path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => {
            tracing::debug!("No config file found, using defaults");
            Ok(AdapterConfig::default())
        }
    }
}

/// Re-check a config after command-line overrides were applied.
pub fn validate_merged(config: &AdapterConfig) -> Result<()> {
    validate_config(config, Path::new(COMMAND_LINE))?;
    Ok(())
}
