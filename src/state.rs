//! Engine state and the operations a host application drives.
//!
//! [`UplinkState`] ties the pieces together: it owns the registry and the
//! active selection behind a read-write lock, runs probe passes, applies
//! the selection policy, and hands every change to the persistence store.
//! Many concurrent readers can inspect the registry while a refresh is
//! running; they see either the previous pass or the completed new one,
//! never a half-updated sweep.

use std::sync::{Arc, RwLock};

use thiserror::Error;
use tracing::info;

use crate::config::Settings;
use crate::endpoint::{Endpoint, EndpointRegistry};
use crate::probe::{probe_all, Prober, TcpTransport, Transport};
use crate::select::select_active;
use crate::store::{SelectionStore, StoreError};

/// Errors that can occur during engine state operations.
#[derive(Debug, Error)]
pub enum StateError {
    /// The requested base URL does not belong to any registry entry.
    #[error("No endpoint with base URL '{url}'")]
    UnknownEndpoint { url: String },

    /// The URL is already taken by a well-known entry.
    #[error("Base URL '{url}' is already a well-known endpoint")]
    DuplicateUrl { url: String },

    /// The registry has no custom entry to edit.
    #[error("No custom endpoint entry to edit")]
    NoCustomEntry,

    #[error(transparent)]
    Store(#[from] StoreError),
}

struct UplinkInner {
    registry: EndpointRegistry,
    /// Base URL of the active selection, empty until one is made.
    active: String,
}

/// Thread-safe engine state.
#[derive(Clone)]
pub struct UplinkState<T = TcpTransport> {
    inner: Arc<RwLock<UplinkInner>>,
    settings: Settings,
    store: SelectionStore,
    prober: Prober<T>,
}

impl UplinkState {
    /// Build engine state with the production TCP prober.
    pub fn new(settings: Settings, store: SelectionStore) -> Result<Self, StateError> {
        let prober = Prober::new(settings.probe_timeout());
        Self::with_prober(settings, store, prober)
    }
}

impl<T> UplinkState<T>
where
    T: Transport + Clone + 'static,
{
    /// Build engine state around a caller-supplied prober.
    ///
    /// Restores the persisted registry and selection when the store has
    /// one; otherwise starts from the configured baseline with nothing
    /// selected. A persisted list with no entries is treated as absent.
    pub fn with_prober(
        settings: Settings,
        store: SelectionStore,
        prober: Prober<T>,
    ) -> Result<Self, StateError> {
        let inner = match store.load()? {
            Some(state) if !state.endpoints.is_empty() => UplinkInner {
                registry: EndpointRegistry::from_endpoints(state.endpoints),
                active: state.active,
            },
            _ => UplinkInner {
                registry: EndpointRegistry::from_settings(&settings),
                active: String::new(),
            },
        };

        Ok(Self {
            inner: Arc::new(RwLock::new(inner)),
            settings,
            store,
            prober,
        })
    }

    /// Probe every candidate, pick the active endpoint, and persist the
    /// result. Returns the new selection.
    ///
    /// The sweep runs against a snapshot of the registry and the updated
    /// copy is swapped in wholesale once selection is done.
    pub async fn refresh(&self) -> Result<Endpoint, StateError> {
        let mut registry = self
            .inner
            .read()
            .expect("uplink state lock poisoned")
            .registry
            .clone();

        probe_all(&mut registry, &self.prober).await;

        let selected = select_active(&registry, &self.settings.defaults.fallback_label)
            .cloned()
            .expect("registry always has at least the custom placeholder");

        let endpoints = {
            let mut inner = self.inner.write().expect("uplink state lock poisoned");
            if inner.active != selected.base_url {
                info!(
                    previous = %inner.active,
                    active = %selected.base_url,
                    "active endpoint changed"
                );
            }
            inner.active = selected.base_url.clone();
            inner.registry = registry;
            inner.registry.entries().to_vec()
        };

        self.store.save(&endpoints, &selected.base_url)?;
        Ok(selected)
    }

    /// Throw the registry back to the configured baseline, then probe and
    /// select from scratch.
    pub async fn reset(&self) -> Result<Endpoint, StateError> {
        {
            let mut inner = self.inner.write().expect("uplink state lock poisoned");
            inner.registry.reset(&self.settings);
            inner.active.clear();
        }
        self.refresh().await
    }

    /// Designate `url` as the active selection without probing.
    ///
    /// The URL must belong to a registry entry. State is unchanged on
    /// error.
    pub fn set_active(&self, url: &str) -> Result<(), StateError> {
        let endpoints = {
            let mut inner = self.inner.write().expect("uplink state lock poisoned");
            if !inner.registry.contains_url(url) {
                return Err(StateError::UnknownEndpoint {
                    url: url.to_string(),
                });
            }
            if inner.active == url {
                return Ok(());
            }
            info!(previous = %inner.active, active = %url, "active endpoint changed");
            inner.active = url.to_string();
            inner.registry.entries().to_vec()
        };

        self.store.save(&endpoints, url)?;
        Ok(())
    }

    /// Fill in (or clear) the custom entry's URL.
    ///
    /// The edited entry's health resets to unknown; a follow-up
    /// [`refresh`](Self::refresh) characterizes it. Rejects URLs already
    /// taken by a well-known entry.
    pub fn set_custom_url(&self, url: &str) -> Result<(), StateError> {
        let (endpoints, active) = {
            let mut inner = self.inner.write().expect("uplink state lock poisoned");
            let taken = inner
                .registry
                .entries()
                .iter()
                .any(|e| !e.custom && e.base_url == url);
            if taken {
                return Err(StateError::DuplicateUrl {
                    url: url.to_string(),
                });
            }
            if !inner.registry.set_custom_url(url) {
                return Err(StateError::NoCustomEntry);
            }
            (inner.registry.entries().to_vec(), inner.active.clone())
        };

        self.store.save(&endpoints, &active)?;
        Ok(())
    }

    /// Base URL of the active selection. Empty until a selection happens.
    pub fn active_url(&self) -> String {
        self.inner
            .read()
            .expect("uplink state lock poisoned")
            .active
            .clone()
    }

    /// Snapshot of the registry in order.
    pub fn endpoints(&self) -> Vec<Endpoint> {
        self.inner
            .read()
            .expect("uplink state lock poisoned")
            .registry
            .entries()
            .to_vec()
    }
}
