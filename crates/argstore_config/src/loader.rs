//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::StoreConfig;
use std::path::{Component, Path};

/// Name of the configuration file looked up in a project directory.
pub const CONFIG_FILE: &str = "argstore.toml";

/// Loads and validates an `argstore.toml` configuration from a directory.
///
/// Reads `<dir>/argstore.toml`, parses it, and validates required fields.
pub fn load_config(dir: &Path) -> Result<StoreConfig, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates an `argstore.toml` configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<StoreConfig, ConfigError> {
    let config: StoreConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &StoreConfig) -> Result<(), ConfigError> {
    if config.store.root.as_os_str().is_empty() {
        return Err(ConfigError::MissingField("store.root".to_string()));
    }
    if config.store.root.components().next_back() == Some(Component::ParentDir) {
        return Err(ConfigError::ValidationError(format!(
            "store.root '{}' must not end in '..'",
            config.store.root.display()
        )));
    }
    Ok(())
}
