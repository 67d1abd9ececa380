//! Submission error taxonomy
//!
//! The `Display` text of each variant is the caller-facing message; the
//! HTTP layer surfaces it verbatim. Variants deliberately leak nothing:
//! the honeypot message is indistinguishable from a generic failure, and
//! persistence errors keep their detail in the server logs.

use thiserror::Error;

use crate::limiter::RateLimitDecision;
use crate::submit::StoreError;

#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The decoy field was filled in. The message is generic on purpose;
    /// telling a bot why it was rejected teaches it to evade the check.
    #[error("Invalid submission. Please try again.")]
    BotDetected,

    /// Quota exceeded for this client.
    #[error("Too many requests. Please try again in {retry_after_minutes} minutes.")]
    RateLimited {
        decision: RateLimitDecision,
        retry_after_minutes: i64,
    },

    /// First violated field rule, surfaced verbatim.
    #[error("{0}")]
    Validation(String),

    /// The submission could not be written. The underlying error is logged
    /// server-side; callers get a retry-or-call-us message.
    #[error("We could not save your request right now. Please try again or contact us directly.")]
    PersistFailed(#[source] StoreError),
}

impl SubmissionError {
    pub fn rate_limited(decision: RateLimitDecision, now_ms: i64) -> Self {
        SubmissionError::RateLimited {
            retry_after_minutes: decision.retry_after_minutes(now_ms),
            decision,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limited_message_names_the_wait() {
        let decision = RateLimitDecision {
            allowed: false,
            limit: 3,
            remaining: 0,
            reset_at_epoch_ms: 10 * 60_000,
        };
        let err = SubmissionError::rate_limited(decision, 0);
        assert_eq!(
            err.to_string(),
            "Too many requests. Please try again in 10 minutes."
        );
    }

    #[test]
    fn bot_message_is_generic() {
        assert_eq!(
            SubmissionError::BotDetected.to_string(),
            "Invalid submission. Please try again."
        );
    }
}
