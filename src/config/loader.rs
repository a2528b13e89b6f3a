use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::types::Settings;

/// Errors that can occur when loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read settings file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Settings validation failed: {message}")]
    ValidationError { message: String },
}

impl Settings {
    /// Returns the path to the settings file.
    ///
    /// Uses `~/.config/uplink/config.toml` on Unix/macOS, or the platform
    /// equivalent via `dirs::config_dir()`. Falls back to the current
    /// directory if no config dir is available.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("uplink").join("config.toml")
    }

    /// Loads settings from the default settings file.
    ///
    /// - If the file doesn't exist, returns `Settings::default()`: no
    ///   well-known endpoints, so the baseline registry is just the
    ///   custom placeholder.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads settings from an explicit path, with the same missing-file
    /// behavior as [`Settings::load`].
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let settings: Settings = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Validates the settings.
    ///
    /// Checks:
    /// - Every endpoint has a non-empty URL and label
    /// - No two endpoints share a URL
    ///
    /// An empty endpoint list is legal; the registry built from it is
    /// just the custom placeholder.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for entry in &self.endpoints {
            if entry.url.is_empty() {
                return Err(ConfigError::ValidationError {
                    message: format!("Endpoint '{}' has an empty URL", entry.label),
                });
            }
            if entry.label.is_empty() {
                return Err(ConfigError::ValidationError {
                    message: format!("Endpoint '{}' has an empty label", entry.url),
                });
            }
            if !seen.insert(entry.url.as_str()) {
                return Err(ConfigError::ValidationError {
                    message: format!("Duplicate endpoint URL '{}'", entry.url),
                });
            }
        }

        Ok(())
    }
}
