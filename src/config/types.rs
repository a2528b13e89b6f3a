use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root settings container for the engine.
///
/// Supplied by the host application, usually from a TOML file. The
/// configured endpoints become the registry baseline, in this order, with
/// the custom placeholder appended after them. The built-in default
/// carries no well-known endpoints, so until a config file supplies the
/// list the baseline is just the custom placeholder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub endpoints: Vec<EndpointEntry>,
}

/// Tunables with sensible fallbacks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    /// Label of the entry to fall back to when no endpoint probes usable.
    #[serde(default = "default_fallback_label")]
    pub fallback_label: String,
    /// Display label for the user-editable placeholder entry.
    #[serde(default = "default_custom_label")]
    pub custom_label: String,
    /// Per-probe handshake bound in milliseconds (default: 3000).
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
}

/// One well-known endpoint in the configured baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointEntry {
    /// Base URL of the endpoint (e.g. "https://gateway.example.com").
    pub url: String,
    /// Display name shown to the user (e.g. "Cloudflare").
    pub label: String,
}

fn default_fallback_label() -> String {
    "Cloudflare".to_string()
}

fn default_custom_label() -> String {
    "Custom".to_string()
}

fn default_probe_timeout_ms() -> u64 {
    3000
}

impl Settings {
    /// Probe timeout as a [`Duration`].
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.defaults.probe_timeout_ms)
    }

    /// Configured base URLs in order, for one-shot fallback fetches.
    pub fn base_urls(&self) -> Vec<String> {
        self.endpoints.iter().map(|e| e.url.clone()).collect()
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            fallback_label: default_fallback_label(),
            custom_label: default_custom_label(),
            probe_timeout_ms: default_probe_timeout_ms(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            defaults: Defaults::default(),
            endpoints: Vec::new(),
        }
    }
}
