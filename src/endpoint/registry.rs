//! Ordered endpoint registry.
//!
//! Order is significant and stable: selection walks entries front to back,
//! so the baseline puts well-known endpoints first (in configured order)
//! and the custom placeholder last. Membership and order change only
//! through an explicit reset or the custom-entry editor; probe passes touch
//! nothing but the health fields.

use crate::config::Settings;
use crate::endpoint::Endpoint;

/// Ordered list of candidate endpoints with mutable health metadata.
#[derive(Debug, Clone)]
pub struct EndpointRegistry {
    entries: Vec<Endpoint>,
}

impl EndpointRegistry {
    /// Build the baseline registry: the configured well-known endpoints in
    /// order, followed by the custom placeholder. Never empty.
    pub fn from_settings(settings: &Settings) -> Self {
        let mut entries: Vec<Endpoint> = settings
            .endpoints
            .iter()
            .map(|entry| Endpoint::new(&entry.url, &entry.label))
            .collect();
        entries.push(Endpoint::custom(&settings.defaults.custom_label));
        Self { entries }
    }

    /// Rebuild a previously persisted registry.
    ///
    /// The caller is responsible for handing back a list this crate saved;
    /// health metadata is restored as-is.
    pub fn from_endpoints(entries: Vec<Endpoint>) -> Self {
        Self { entries }
    }

    /// All entries in registry order.
    pub fn entries(&self) -> &[Endpoint] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&Endpoint> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether some entry carries this (non-empty) base URL.
    pub fn contains_url(&self, url: &str) -> bool {
        !url.is_empty() && self.entries.iter().any(|e| e.base_url == url)
    }

    /// Throw away all entries and health state and return to the baseline
    /// defined by `settings`.
    pub fn reset(&mut self, settings: &Settings) {
        *self = Self::from_settings(settings);
    }

    /// Fill in (or replace) the custom entry's URL. Editing the URL resets
    /// that entry's health to unknown. Returns `false` when the registry
    /// has no custom entry.
    pub fn set_custom_url(&mut self, url: impl Into<String>) -> bool {
        match self.entries.iter_mut().find(|e| e.custom) {
            Some(entry) => {
                entry.base_url = url.into();
                entry.usable = None;
                entry.delay_ms = None;
                true
            }
            None => false,
        }
    }

    /// Record a successful probe: `usable` and `delay_ms` are set together.
    pub(crate) fn mark_reachable(&mut self, index: usize, delay_ms: u64) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.usable = Some(true);
            entry.delay_ms = Some(delay_ms);
        }
    }

    /// Record a failed probe: `usable` goes false and any stale latency is
    /// cleared.
    pub(crate) fn mark_unreachable(&mut self, index: usize) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.usable = Some(false);
            entry.delay_ms = None;
        }
    }
}
