//! Rate-limit counter backends
//!
//! The source of truth is a shared remote counter store with atomic
//! increment-and-check semantics. When it is unreachable the limiter
//! degrades to [`FallbackCounterStore`], a process-local sliding window.
//! The fallback is a safety net, not a correctness guarantee: it is
//! volatile, resets on process restart, and is not shared across
//! instances. That trade-off is accepted so a counter-store outage never
//! takes the contact form down with it.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use thiserror::Error;

/// Result of one increment-and-check call against a counter window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowCount {
    /// Hits recorded in the current window, including this call.
    pub count: u32,
    /// When the current window ends, epoch milliseconds.
    pub reset_at_epoch_ms: i64,
}

#[derive(Debug, Error)]
pub enum CounterStoreError {
    #[error("counter store unreachable: {0}")]
    Unreachable(String),

    #[error("counter store returned a malformed response: {0}")]
    Malformed(String),
}

/// A shared counter with sliding-window increment-and-check semantics.
///
/// Implementations increment the counter for `key` and report the count in
/// the trailing window along with the window's reset time. Increments are
/// atomic at the store.
#[async_trait]
pub trait CounterStore: Send + Sync {
    async fn increment(&self, key: &str, window: Duration)
        -> Result<WindowCount, CounterStoreError>;
}

/// Process-local sliding-window counter used when the remote store is
/// unreachable.
///
/// Per-identifier hit timestamps live behind one mutex; the lock makes the
/// retain-count-push sequence atomic, so concurrent requests from the same
/// identifier cannot both slip under the limit.
pub struct FallbackCounterStore {
    hits: Mutex<HashMap<String, Vec<i64>>>,
}

impl FallbackCounterStore {
    pub fn new() -> Self {
        Self {
            hits: Mutex::new(HashMap::new()),
        }
    }

    /// Record a hit for `key` at `now_ms` and return the count of hits in
    /// the trailing window. Every call records, including calls over the
    /// limit, matching the remote store's increment-and-check behavior.
    pub fn hit(&self, key: &str, window_ms: i64, now_ms: i64) -> WindowCount {
        let mut hits = self.hits.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let entry = hits.entry(key.to_string()).or_default();
        entry.retain(|&t| now_ms - t < window_ms);
        entry.push(now_ms);
        let oldest = entry.first().copied().unwrap_or(now_ms);
        WindowCount {
            count: entry.len() as u32,
            reset_at_epoch_ms: oldest + window_ms,
        }
    }

    /// Drop identifiers whose windows have fully elapsed, bounding memory
    /// over long uptimes.
    pub fn prune(&self, window_ms: i64, now_ms: i64) {
        let mut hits = self.hits.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        hits.retain(|_, stamps| stamps.iter().any(|&t| now_ms - t < window_ms));
    }
}

impl Default for FallbackCounterStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: i64 = 60_000;

    #[test]
    fn counts_hits_within_window() {
        let store = FallbackCounterStore::new();
        assert_eq!(store.hit("ip:1.2.3.4", WINDOW, 1_000).count, 1);
        assert_eq!(store.hit("ip:1.2.3.4", WINDOW, 2_000).count, 2);
        assert_eq!(store.hit("ip:1.2.3.4", WINDOW, 3_000).count, 3);
    }

    #[test]
    fn window_slides_past_old_hits() {
        let store = FallbackCounterStore::new();
        store.hit("k", WINDOW, 0);
        store.hit("k", WINDOW, 1_000);
        // 61s later the first two hits have aged out.
        let counted = store.hit("k", WINDOW, 61_500);
        assert_eq!(counted.count, 1);
        assert_eq!(counted.reset_at_epoch_ms, 61_500 + WINDOW);
    }

    #[test]
    fn reset_tracks_oldest_in_window_hit() {
        let store = FallbackCounterStore::new();
        let first = store.hit("k", WINDOW, 5_000);
        assert_eq!(first.reset_at_epoch_ms, 5_000 + WINDOW);
        let second = store.hit("k", WINDOW, 20_000);
        assert_eq!(second.reset_at_epoch_ms, 5_000 + WINDOW);
    }

    #[test]
    fn keys_are_independent() {
        let store = FallbackCounterStore::new();
        store.hit("a", WINDOW, 0);
        store.hit("a", WINDOW, 0);
        assert_eq!(store.hit("b", WINDOW, 0).count, 1);
    }

    #[test]
    fn prune_drops_expired_identifiers() {
        let store = FallbackCounterStore::new();
        store.hit("stale", WINDOW, 0);
        store.hit("fresh", WINDOW, 70_000);
        store.prune(WINDOW, 80_000);

        let hits = store.hits.lock().unwrap();
        assert!(!hits.contains_key("stale"));
        assert!(hits.contains_key("fresh"));
    }

    #[test]
    fn concurrent_hits_are_all_counted() {
        use std::sync::Arc;

        let store = Arc::new(FallbackCounterStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.hit("shared", WINDOW, 1_000).count)
            })
            .collect();

        let mut max_seen = 0;
        for handle in handles {
            max_seen = max_seen.max(handle.join().unwrap());
        }
        assert_eq!(max_seen, 8);
    }
}
