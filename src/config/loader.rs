//! Configuration loading from file system
//!
//! Reads the JSON config file. Missing files and parse errors fall back to
//! defaults so the widgets always start.

use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use super::defaults::DEFAULT_CONFIG_PATH;
use super::types::AppConfig;
use crate::error::{AutocompleteError, Result};

/// Expanded default config location (~/.autocomplete-kit/config.json)
pub fn default_config_path() -> PathBuf {
    PathBuf::from(shellexpand::tilde(DEFAULT_CONFIG_PATH).as_ref())
}

/// Read and parse the config at `path`.
pub fn try_load_config(path: &Path) -> Result<AppConfig> {
    let contents = std::fs::read_to_string(path).map_err(|source| AutocompleteError::ConfigIo {
        path: path.display().to_string(),
        source,
    })?;
    let config = serde_json::from_str::<AppConfig>(contents.trim())?;
    if config.currency_limit == 0 {
        return Err(AutocompleteError::Config(
            "currencyLimit must be at least 1".to_string(),
        ));
    }
    Ok(config)
}

/// Load configuration from `path`, or the default location when `None`.
///
/// Returns `AppConfig::default()` if the file is missing or invalid.
#[instrument(name = "load_config")]
pub fn load_config(path: Option<&Path>) -> AppConfig {
    let config_path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);

    if !config_path.exists() {
        info!(path = %config_path.display(), "Config file not found, using defaults");
        return AppConfig::default();
    }

    match try_load_config(&config_path) {
        Ok(config) => {
            info!(path = %config_path.display(), "Successfully loaded config");
            config
        }
        Err(e) => {
            warn!(
                error = %e,
                path = %config_path.display(),
                "Failed to load config, using defaults"
            );
            AppConfig::default()
        }
    }
}
