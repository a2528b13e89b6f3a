//! Endpoint health probing and selection.
//!
//! `uplink` keeps a ranked list of candidate endpoints for a client that
//! talks to exactly one live backend at a time. It probes every candidate
//! concurrently with a bounded-time connectivity check, records
//! reachability and latency, and applies a deterministic policy to pick
//! the active endpoint. A separate sequential fallback fetcher covers
//! one-shot requests that should simply try candidates in order until one
//! answers.
//!
//! The crate is a library engine: it has no CLI and defines no wire
//! protocol of its own. Hosts construct an [`UplinkState`] from
//! [`Settings`] and a [`SelectionStore`], call
//! [`refresh`](UplinkState::refresh) whenever they want the selection
//! re-evaluated, and read the result.

pub mod config;
pub mod endpoint;
pub mod fetch;
pub mod probe;
pub mod select;
pub mod state;
pub mod store;

pub use config::{ConfigError, Settings};
pub use endpoint::{Endpoint, EndpointRegistry};
pub use fetch::{FallbackClient, FetchError};
pub use probe::{probe_all, ProbeError, ProbeOutcome, ProbeRecord, Prober};
pub use select::select_active;
pub use state::{StateError, UplinkState};
pub use store::{SelectionStore, StoreError};

use tracing_subscriber::EnvFilter;

/// Initialize tracing for host applications that do not bring their own
/// subscriber. Honors `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();
}
