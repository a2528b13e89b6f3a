//! Sequential fallback fetching for one-shot requests.
//!
//! Unlike the probe sweep, which characterizes every candidate in
//! parallel, this path wants the first answer it can get: it walks an
//! ordered list of base URLs one at a time and stops at the first
//! response that decodes.

use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

/// Failure of a whole fallback pass.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Every candidate was attempted and none produced a decodable
    /// response. Per-candidate failures are logged, not reported.
    #[error("all candidates exhausted after {attempts} attempts")]
    AllCandidatesExhausted { attempts: usize },
}

/// One-shot HTTP client that tries candidate base URLs in order.
#[derive(Debug, Clone)]
pub struct FallbackClient {
    client: Client,
}

impl FallbackClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Use a preconfigured client, e.g. one with custom timeouts.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// GET `base_url + path` for each base URL in order and decode the
    /// first response that parses as `T`.
    ///
    /// `path` is appended verbatim, so it should carry its leading slash.
    /// Candidates are never reordered or deduplicated, each is attempted
    /// at most once, and attempts stop at the first success. Only a fully
    /// exhausted list is an error.
    pub async fn fetch_json<T>(&self, base_urls: &[String], path: &str) -> Result<T, FetchError>
    where
        T: DeserializeOwned,
    {
        for base_url in base_urls {
            let url = format!("{base_url}{path}");
            match self.try_fetch(&url).await {
                Ok(value) => {
                    debug!(%url, "fallback fetch succeeded");
                    return Ok(value);
                }
                Err(error) => {
                    warn!(%url, %error, "fallback fetch attempt failed, trying next candidate");
                }
            }
        }
        Err(FetchError::AllCandidatesExhausted {
            attempts: base_urls.len(),
        })
    }

    async fn try_fetch<T>(&self, url: &str) -> Result<T, reqwest::Error>
    where
        T: DeserializeOwned,
    {
        let response = self.client.get(url).send().await?;
        response.json().await
    }
}

impl Default for FallbackClient {
    fn default() -> Self {
        Self::new()
    }
}
