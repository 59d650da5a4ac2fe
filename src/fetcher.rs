//! HTTP resource fetching.
//!
//! Every network call in a lookup cycle goes through [`Fetcher`], so the
//! orchestrator can run against the real API or an in-memory double.
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{AppError, Result};

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET `url` and parse the body as JSON.
    ///
    /// A non-success status is `NotFound`, a network failure is
    /// `TransportError`, an unparseable body is `InvalidEntity`.
    async fn fetch(&self, url: &str) -> Result<Value>;
}

/// Fetches `url` and decodes it into a typed resource.
pub async fn fetch_as<T: DeserializeOwned>(fetcher: &dyn Fetcher, url: &str) -> Result<T> {
    let value = fetcher.fetch(url).await?;
    serde_json::from_value(value).map_err(|e| {
        tracing::error!("Unexpected resource shape at {}: {}", url, e);
        AppError::from(e)
    })
}

/// Fetcher backed by `reqwest`. No timeout is configured beyond the client's own defaults.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Value> {
        tracing::debug!("Fetching resource: {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::error!("Failed to make HTTP request to {}: {}", url, e);
            AppError::from(e)
        })?;

        let response = response.error_for_status().map_err(|e| {
            tracing::error!("Request to {} failed: {}", url, e);
            AppError::from(e)
        })?;

        let value = response.json::<Value>().await.map_err(|e| {
            tracing::error!("Failed to parse JSON response from {}: {}", url, e);
            AppError::from(e)
        })?;

        Ok(value)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::sync::Notify;

    /// In-memory fetcher: canned bodies per URL, optional failures, and gates
    /// that hold a fetch until the test releases it.
    #[derive(Default)]
    pub struct StubFetcher {
        bodies: HashMap<String, Value>,
        failures: HashMap<String, AppError>,
        fallback: Option<Value>,
        gates: HashMap<String, Arc<Notify>>,
        calls: AtomicUsize,
        seen: Mutex<Vec<String>>,
    }

    impl StubFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(mut self, url: &str, body: Value) -> Self {
            self.bodies.insert(url.to_string(), body);
            self
        }

        /// Body served for any URL without its own entry.
        pub fn otherwise(mut self, body: Value) -> Self {
            self.fallback = Some(body);
            self
        }

        pub fn failing(mut self, url: &str, err: AppError) -> Self {
            self.failures.insert(url.to_string(), err);
            self
        }

        /// Blocks fetches of `url` until the returned handle is notified.
        pub fn gated(mut self, url: &str) -> (Self, Arc<Notify>) {
            let gate = Arc::new(Notify::new());
            self.gates.insert(url.to_string(), gate.clone());
            (self, gate)
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn seen(&self) -> Vec<String> {
            self.seen.lock().map(|s| s.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl Fetcher for StubFetcher {
        async fn fetch(&self, url: &str) -> Result<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(url.to_string());
            }
            if let Some(gate) = self.gates.get(url) {
                gate.notified().await;
            }
            if let Some(err) = self.failures.get(url) {
                return Err(err.clone());
            }
            self.bodies
                .get(url)
                .or(self.fallback.as_ref())
                .cloned()
                .ok_or_else(|| AppError::NotFound(url.to_string()))
        }
    }
}
