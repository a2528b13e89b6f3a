//! Candidate endpoint descriptors and the ordered registry they live in.
//!
//! An [`Endpoint`] is one network location offering the service; the
//! [`EndpointRegistry`] keeps them in a stable, significant order and owns
//! their health metadata.

mod registry;

pub use registry::EndpointRegistry;

use serde::{Deserialize, Serialize};

/// One candidate backend for the service.
///
/// Health metadata (`usable`, `delay_ms`) starts absent and is written only
/// by a probe pass: a successful probe sets both, a failed probe sets
/// `usable` to `false` and clears `delay_ms`. Both fields are cleared
/// together when the registry is rebuilt from its baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoint {
    /// Network location, unique within a registry. The empty string is
    /// reserved for a custom entry whose URL has not been filled in yet;
    /// such entries are never probed.
    pub base_url: String,
    /// Display name. Not unique and not part of identity.
    pub label: String,
    /// Marks the user-editable placeholder entry.
    #[serde(default)]
    pub custom: bool,
    /// Tri-state reachability: `None` until a probe has run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usable: Option<bool>,
    /// Latency of the most recent successful probe, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u64>,
}

impl Endpoint {
    /// Create a well-known endpoint with unknown health.
    pub fn new(base_url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            label: label.into(),
            custom: false,
            usable: None,
            delay_ms: None,
        }
    }

    /// Create the user-editable placeholder entry. Its URL stays empty
    /// until the user fills one in.
    pub fn custom(label: impl Into<String>) -> Self {
        Self {
            base_url: String::new(),
            label: label.into(),
            custom: true,
            usable: None,
            delay_ms: None,
        }
    }

    /// Whether a probe pass should attempt this entry.
    pub fn probeable(&self) -> bool {
        !self.base_url.is_empty()
    }
}
