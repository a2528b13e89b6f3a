//! Durable storage for the registry and the active selection.
//!
//! The engine computes which endpoint is active; this store remembers it.
//! State is a small TOML document holding the endpoint list (with health
//! metadata) and the active base URL, written on every change and read
//! back on startup.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::endpoint::Endpoint;

/// Errors that can occur while reading or writing the state file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read state file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write state file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse state file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize state: {source}")]
    SerializeError {
        #[source]
        source: toml::ser::Error,
    },
}

/// Everything that survives a restart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedState {
    /// Base URL of the active selection. Empty when nothing has been
    /// selected yet.
    #[serde(default)]
    pub active: String,
    pub endpoints: Vec<Endpoint>,
}

/// File-backed store for [`PersistedState`].
#[derive(Debug, Clone)]
pub struct SelectionStore {
    path: PathBuf,
}

impl SelectionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default state file location, `<config dir>/uplink/state.toml`.
    ///
    /// Falls back to the current directory if the platform config
    /// directory is unavailable.
    pub fn default_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("uplink").join("state.toml")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted state, or `None` when nothing has been saved
    /// yet.
    pub fn load(&self) -> Result<Option<PersistedState>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).map_err(|e| StoreError::ReadError {
            path: self.path.clone(),
            source: e,
        })?;

        let state: PersistedState =
            toml::from_str(&content).map_err(|e| StoreError::ParseError {
                path: self.path.clone(),
                source: e,
            })?;

        Ok(Some(state))
    }

    /// Persist the endpoint list and the active base URL, creating parent
    /// directories as needed.
    pub fn save(&self, endpoints: &[Endpoint], active: &str) -> Result<(), StoreError> {
        let state = PersistedState {
            active: active.to_string(),
            endpoints: endpoints.to_vec(),
        };

        let content =
            toml::to_string_pretty(&state).map_err(|e| StoreError::SerializeError { source: e })?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::WriteError {
                path: self.path.clone(),
                source: e,
            })?;
        }

        fs::write(&self.path, content).map_err(|e| StoreError::WriteError {
            path: self.path.clone(),
            source: e,
        })
    }
}
