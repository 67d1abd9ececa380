//! Sliding-window rate limiter
//!
//! One limiter type serves every throttled surface; each call site picks a
//! [`LimiterPurpose`] from the fixed registry, which carries that purpose's
//! key prefix and `(max, window)` policy. Checks go to the shared remote
//! counter store; when it errors or times out, the check degrades to the
//! in-process fallback with a fixed 5-per-15-minute policy regardless of
//! the purpose that was in effect.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::warn;

use crate::store::{CounterStore, FallbackCounterStore};

/// Fixed policy applied by the in-process fallback while the remote store
/// is unreachable.
const FALLBACK_MAX: u32 = 5;
const FALLBACK_WINDOW: Duration = Duration::from_secs(15 * 60);

/// Current time as epoch milliseconds.
pub fn epoch_ms_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// A `(max, window)` pair for one limiter purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatePolicy {
    pub max: u32,
    pub window: Duration,
}

impl RatePolicy {
    pub const fn new(max: u32, window_secs: u64) -> Self {
        Self {
            max,
            window: Duration::from_secs(window_secs),
        }
    }

    pub fn window_ms(&self) -> i64 {
        self.window.as_millis() as i64
    }
}

/// The registry of throttled surfaces. Each purpose gets its own key
/// prefix so the same identifier is counted independently per surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LimiterPurpose {
    /// Any public form submission, keyed by client IP.
    FormSubmission,
    /// Contact-form-specific throttle, keyed by submitter email.
    ContactForm,
    /// Generic API access, keyed by client IP.
    Api,
    /// Admin login attempts, keyed by client IP.
    LoginIp,
    /// Failed admin logins, keyed by account email.
    LoginEmail,
}

impl LimiterPurpose {
    pub const ALL: [LimiterPurpose; 5] = [
        LimiterPurpose::FormSubmission,
        LimiterPurpose::ContactForm,
        LimiterPurpose::Api,
        LimiterPurpose::LoginIp,
        LimiterPurpose::LoginEmail,
    ];

    pub const fn key_prefix(self) -> &'static str {
        match self {
            LimiterPurpose::FormSubmission => "form",
            LimiterPurpose::ContactForm => "contact",
            LimiterPurpose::Api => "api",
            LimiterPurpose::LoginIp => "login:ip",
            LimiterPurpose::LoginEmail => "login:email",
        }
    }

    pub const fn policy(self) -> RatePolicy {
        match self {
            LimiterPurpose::FormSubmission => RatePolicy::new(3, 10 * 60),
            LimiterPurpose::ContactForm => RatePolicy::new(2, 15 * 60),
            LimiterPurpose::Api => RatePolicy::new(10, 60),
            LimiterPurpose::LoginIp => RatePolicy::new(5, 15 * 60),
            LimiterPurpose::LoginEmail => RatePolicy::new(3, 60 * 60),
        }
    }
}

/// Outcome of one rate-limit check, with the header-facing quota fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    pub reset_at_epoch_ms: i64,
}

impl RateLimitDecision {
    /// Whole minutes until the window resets, rounded up. This is the
    /// human-readable wait surfaced in rejection messages.
    pub fn retry_after_minutes(&self, now_ms: i64) -> i64 {
        let remaining_ms = (self.reset_at_epoch_ms - now_ms).max(0);
        (remaining_ms + 59_999) / 60_000
    }

    /// Seconds until the window resets, rounded up, for `Retry-After`.
    pub fn retry_after_secs(&self, now_ms: i64) -> i64 {
        let remaining_ms = (self.reset_at_epoch_ms - now_ms).max(0);
        (remaining_ms + 999) / 1_000
    }
}

fn decide(count: u32, max: u32, reset_at_epoch_ms: i64) -> RateLimitDecision {
    RateLimitDecision {
        allowed: count <= max,
        limit: max,
        remaining: max.saturating_sub(count),
        reset_at_epoch_ms,
    }
}

/// Sliding-window limiter over a shared counter store with in-process
/// degraded-mode fallback.
///
/// Cheap to clone; clones share the same stores.
#[derive(Clone)]
pub struct SlidingWindowLimiter {
    store: Arc<dyn CounterStore>,
    fallback: Arc<FallbackCounterStore>,
}

impl SlidingWindowLimiter {
    pub fn new(store: Arc<dyn CounterStore>, fallback: Arc<FallbackCounterStore>) -> Self {
        Self { store, fallback }
    }

    /// Check and record one request for `identifier` under `purpose`.
    pub async fn check(&self, identifier: &str, purpose: LimiterPurpose) -> RateLimitDecision {
        self.check_at(identifier, purpose, epoch_ms_now()).await
    }

    /// As [`check`](Self::check), with an explicit clock for tests.
    pub async fn check_at(
        &self,
        identifier: &str,
        purpose: LimiterPurpose,
        now_ms: i64,
    ) -> RateLimitDecision {
        let policy = purpose.policy();
        let key = format!("{}:{}", purpose.key_prefix(), identifier);

        match self.store.increment(&key, policy.window).await {
            Ok(window) => decide(window.count, policy.max, window.reset_at_epoch_ms),
            Err(err) => {
                warn!(
                    key = %key,
                    error = %err,
                    "counter store unavailable, using in-process fallback policy"
                );
                let window = self.fallback.hit(&key, FALLBACK_WINDOW.as_millis() as i64, now_ms);
                decide(window.count, FALLBACK_MAX, window.reset_at_epoch_ms)
            }
        }
    }
}
