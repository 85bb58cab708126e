//! # Configuration Files
//!
//! Loads `SimConfig` from TOML. Every section is optional; missing sections
//! keep the reference store's values. The result is validated before it is
//! handed to the engine.

use shelfsim_core::{ShelfError, SimConfig};
use std::path::Path;

/// Maximum configuration file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Load the configuration at `path`, or the default one when `path` is `None`.
pub fn load_config(path: Option<&Path>) -> Result<SimConfig, ShelfError> {
    let Some(path) = path else {
        let config = SimConfig::default();
        config.validate()?;
        return Ok(config);
    };

    let metadata = std::fs::metadata(path).map_err(|e| {
        ShelfError::Io(format!("Cannot read '{}': {}", path.display(), e))
    })?;
    if !metadata.is_file() {
        return Err(ShelfError::Io(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }
    if metadata.len() > MAX_CONFIG_FILE_SIZE {
        return Err(ShelfError::Io(format!(
            "Config file size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_CONFIG_FILE_SIZE
        )));
    }

    let text = std::fs::read_to_string(path)
        .map_err(|e| ShelfError::Io(format!("Read '{}': {}", path.display(), e)))?;
    let config = parse_config(&text)?;
    tracing::info!(path = %path.display(), "Configuration loaded");
    Ok(config)
}

/// Parse and validate a TOML configuration.
pub fn parse_config(text: &str) -> Result<SimConfig, ShelfError> {
    let config: SimConfig =
        toml::from_str(text).map_err(|e| ShelfError::Serialization(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Render a configuration as TOML.
pub fn config_to_toml(config: &SimConfig) -> Result<String, ShelfError> {
    toml::to_string(config).map_err(|e| ShelfError::Serialization(e.to_string()))
}
