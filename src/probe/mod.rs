//! Bounded-time endpoint connectivity probing.
//!
//! A [`Prober`] checks a single endpoint: it races the transport handshake
//! against a timer and reports reachability plus measured latency.
//! [`probe_all`] fans one prober out over every probeable registry entry
//! concurrently and writes the outcomes back into the registry.

mod transport;

pub use transport::{TcpTransport, Transport};

use std::collections::HashMap;
use std::time::Duration;

use thiserror::Error;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use url::{Host, Url};

use crate::endpoint::{Endpoint, EndpointRegistry};

/// Why a probe did not reach its endpoint.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The entry has no address configured. Orchestration filters these
    /// out up front; probing one anyway is answered without touching the
    /// network.
    #[error("address required")]
    AddressRequired,

    /// The address could not be split into a dialable host and port.
    /// Also answered without touching the network.
    #[error("{label} invalid address")]
    InvalidAddress { label: String },

    /// The transport reported an explicit failure before the timeout.
    #[error("{label} connection failed")]
    ConnectionFailed {
        label: String,
        #[source]
        source: std::io::Error,
    },

    /// No terminal signal arrived inside the timeout.
    #[error("{label} connection timed out")]
    TimedOut { label: String },
}

/// Result of probing one endpoint.
///
/// Consumed immediately by the orchestrator; the durable record of a probe
/// pass lives in the registry's health fields.
#[derive(Debug)]
pub enum ProbeOutcome {
    /// Handshake completed inside the timeout.
    Reachable { latency: Duration },
    /// Handshake failed, timed out, or was never attempted.
    Unreachable { reason: ProbeError },
}

impl ProbeOutcome {
    pub fn is_reachable(&self) -> bool {
        matches!(self, ProbeOutcome::Reachable { .. })
    }
}

/// One entry's slot in the sweep report returned by [`probe_all`].
#[derive(Debug)]
pub struct ProbeRecord {
    /// Position of the probed entry in the registry.
    pub index: usize,
    /// Snapshot of the entry as it was when the probe started.
    pub endpoint: Endpoint,
    pub outcome: ProbeOutcome,
}

/// Checks whether one endpoint accepts a connection within a bounded time.
#[derive(Debug, Clone)]
pub struct Prober<T = TcpTransport> {
    transport: T,
    timeout: Duration,
}

impl Prober {
    /// Prober backed by the production TCP transport.
    pub fn new(timeout: Duration) -> Self {
        Self {
            transport: TcpTransport,
            timeout,
        }
    }
}

impl<T: Transport> Prober<T> {
    pub fn with_transport(transport: T, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Probe a single endpoint.
    ///
    /// Entries without an address and entries whose address cannot be
    /// parsed fail synchronously; everything else races the handshake
    /// against the timer. A handshake landing exactly on the bound counts
    /// as a timeout.
    pub async fn probe(&self, endpoint: &Endpoint) -> ProbeOutcome {
        if endpoint.base_url.is_empty() {
            return ProbeOutcome::Unreachable {
                reason: ProbeError::AddressRequired,
            };
        }
        let Some((host, port)) = probe_target(&endpoint.base_url) else {
            return ProbeOutcome::Unreachable {
                reason: ProbeError::InvalidAddress {
                    label: endpoint.label.clone(),
                },
            };
        };

        let started = Instant::now();
        // The timer arm comes first under `biased` so that a handshake
        // landing exactly on the bound resolves as a timeout. The losing
        // branch is dropped, which cancels the timer or abandons the
        // half-open dial.
        tokio::select! {
            biased;
            _ = tokio::time::sleep(self.timeout) => ProbeOutcome::Unreachable {
                reason: ProbeError::TimedOut {
                    label: endpoint.label.clone(),
                },
            },
            connected = self.transport.connect(&host, port) => match connected {
                Ok(conn) => {
                    let latency = started.elapsed();
                    drop(conn);
                    ProbeOutcome::Reachable { latency }
                }
                Err(source) => ProbeOutcome::Unreachable {
                    reason: ProbeError::ConnectionFailed {
                        label: endpoint.label.clone(),
                        source,
                    },
                },
            },
        }
    }
}

/// Probe every probeable registry entry concurrently and write the results
/// back into the registry's health fields.
///
/// Entries with an empty URL are skipped and keep whatever health they had.
/// Each outcome lands on its entry as it arrives; no two probes touch the
/// same entry. A probe task that dies marks its own entry unreachable and
/// yields no record; the rest of the sweep is unaffected. The sweep joins
/// all probes before returning, so callers can read the registry without
/// seeing a half-finished pass. Records come back in registry order.
pub async fn probe_all<T>(registry: &mut EndpointRegistry, prober: &Prober<T>) -> Vec<ProbeRecord>
where
    T: Transport + Clone + 'static,
{
    let mut probes = JoinSet::new();
    let mut task_index = HashMap::new();
    for (index, endpoint) in registry.entries().iter().enumerate() {
        if !endpoint.probeable() {
            continue;
        }
        let endpoint = endpoint.clone();
        let prober = prober.clone();
        let task = probes.spawn(async move {
            let outcome = prober.probe(&endpoint).await;
            ProbeRecord {
                index,
                endpoint,
                outcome,
            }
        });
        task_index.insert(task.id(), index);
    }

    let mut records = Vec::with_capacity(probes.len());
    while let Some(joined) = probes.join_next().await {
        let record = match joined {
            Ok(record) => record,
            Err(error) => {
                // A probe that dies counts against its own entry and
                // nothing else.
                if let Some(&index) = task_index.get(&error.id()) {
                    registry.mark_unreachable(index);
                }
                warn!(%error, "probe task failed to join");
                continue;
            }
        };
        match &record.outcome {
            ProbeOutcome::Reachable { latency } => {
                registry.mark_reachable(record.index, latency.as_millis() as u64);
            }
            ProbeOutcome::Unreachable { reason } => {
                debug!(endpoint = %record.endpoint.label, %reason, "endpoint not reachable");
                registry.mark_unreachable(record.index);
            }
        }
        records.push(record);
    }

    records.sort_by_key(|record| record.index);
    let reachable = records.iter().filter(|r| r.outcome.is_reachable()).count();
    info!(probed = records.len(), reachable, "probe pass complete");
    records
}

/// Split a base URL into a dialable `(host, port)` pair.
fn probe_target(base_url: &str) -> Option<(String, u16)> {
    let url = Url::parse(base_url).ok()?;
    let host = match url.host()? {
        Host::Domain(domain) => domain.to_string(),
        Host::Ipv4(addr) => addr.to_string(),
        Host::Ipv6(addr) => addr.to_string(),
    };
    let port = url.port_or_known_default()?;
    Some((host, port))
}
