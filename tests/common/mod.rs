//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_gateway;

use std::net::TcpListener;

use tempfile::TempDir;

use uplink::config::{Defaults, EndpointEntry, Settings};
use uplink::SelectionStore;

/// Find an available port for testing.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

/// Base URL for a port nothing listens on.
pub fn refused_url() -> String {
    format!("http://127.0.0.1:{}", free_port())
}

/// Settings with the given `(url, label)` candidates and stock defaults.
pub fn settings_for(candidates: &[(&str, &str)]) -> Settings {
    Settings {
        defaults: Defaults::default(),
        endpoints: candidates
            .iter()
            .map(|(url, label)| EndpointEntry {
                url: url.to_string(),
                label: label.to_string(),
            })
            .collect(),
    }
}

/// Selection store backed by a fresh temp directory.
///
/// Keep the returned `TempDir` alive for as long as the store is used.
pub fn temp_store() -> (TempDir, SelectionStore) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = SelectionStore::new(dir.path().join("state.toml"));
    (dir, store)
}
