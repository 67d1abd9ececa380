//! HTTP client for the shared rate-limit counter store
//!
//! The store exposes one operation: atomically increment the counter for a
//! key within a sliding window and report the resulting count and window
//! reset time. The call carries a short timeout on purpose; the limiter's
//! fallback path is only useful if an outage is detected quickly, and a
//! hung call would defeat it.

use async_trait::async_trait;
use intake_core::{CounterStore, CounterStoreError, WindowCount};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const COUNTER_STORE_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IncrementRequest<'a> {
    key: &'a str,
    window_ms: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IncrementResponse {
    count: u32,
    reset_at: i64,
}

/// Remote counter store reached over HTTPS with bearer auth.
pub struct HttpCounterStore {
    http: reqwest::Client,
    url: String,
    token: Option<String>,
}

impl HttpCounterStore {
    pub fn new(url: impl Into<String>, token: Option<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(COUNTER_STORE_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            http,
            url: url.into(),
            token,
        }
    }
}

#[async_trait]
impl CounterStore for HttpCounterStore {
    async fn increment(
        &self,
        key: &str,
        window: Duration,
    ) -> Result<WindowCount, CounterStoreError> {
        let payload = IncrementRequest {
            key,
            window_ms: window.as_millis() as u64,
        };

        let mut request = self.http.post(&self.url).json(&payload);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CounterStoreError::Unreachable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CounterStoreError::Unreachable(format!(
                "counter store returned status {}",
                response.status()
            )));
        }

        let body: IncrementResponse = response
            .json()
            .await
            .map_err(|e| CounterStoreError::Malformed(e.to_string()))?;

        Ok(WindowCount {
            count: body.count,
            reset_at_epoch_ms: body.reset_at,
        })
    }
}

/// Stand-in used when no counter store is configured. Every call errors,
/// which routes all rate checks through the in-process fallback policy.
pub struct UnconfiguredCounterStore;

#[async_trait]
impl CounterStore for UnconfiguredCounterStore {
    async fn increment(
        &self,
        _key: &str,
        _window: Duration,
    ) -> Result<WindowCount, CounterStoreError> {
        Err(CounterStoreError::Unreachable(
            "no counter store configured".to_string(),
        ))
    }
}
