//! Submission orchestrator
//!
//! Sequences the pipeline for one submission: honeypot, rate limit,
//! validation, sanitization, persistence, then a best-effort notification.
//! The sequence is linear with no retries; a human retrying the form is
//! the recovery path for everything the caller can see.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::error::SubmissionError;
use crate::honeypot;
use crate::limiter::{epoch_ms_now, LimiterPurpose, RateLimitDecision, SlidingWindowLimiter};
use crate::sanitize;
use crate::types::{SubmissionRequest, ValidatedSubmission};
use crate::validate;

/// Message returned to the visitor on an accepted submission.
pub const SUCCESS_MESSAGE: &str =
    "Thank you for reaching out. Our team will contact you within 24 hours.";

#[derive(Debug, Error)]
#[error("{0}")]
pub struct StoreError(pub String);

#[derive(Debug, Error)]
#[error("{0}")]
pub struct NotifyError(pub String);

/// Persistence for accepted submissions. The pipeline only ever inserts;
/// reads and status updates belong to the admin layer.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn insert(&self, submission: &ValidatedSubmission) -> Result<(), StoreError>;
}

/// Best-effort lead notification. Failures are logged and swallowed: a
/// lost confirmation email is preferable to losing the lead.
#[async_trait]
pub trait LeadNotifier: Send + Sync {
    async fn notify(&self, submission: &ValidatedSubmission) -> Result<(), NotifyError>;
}

/// An accepted submission, with the quota decision for response headers.
#[derive(Debug, Clone)]
pub struct Accepted {
    pub message: String,
    pub rate: RateLimitDecision,
}

/// Orchestrates one submission end to end.
pub struct SubmissionPipeline {
    limiter: SlidingWindowLimiter,
    store: Arc<dyn SubmissionStore>,
    notifier: Arc<dyn LeadNotifier>,
}

impl SubmissionPipeline {
    pub fn new(
        limiter: SlidingWindowLimiter,
        store: Arc<dyn SubmissionStore>,
        notifier: Arc<dyn LeadNotifier>,
    ) -> Self {
        Self {
            limiter,
            store,
            notifier,
        }
    }

    /// Run the pipeline for one raw submission. `identifier` is the client
    /// identity from [`crate::identity::client_identifier`].
    pub async fn submit(
        &self,
        raw: SubmissionRequest,
        identifier: &str,
    ) -> Result<Accepted, SubmissionError> {
        self.submit_at(raw, identifier, epoch_ms_now()).await
    }

    /// As [`submit`](Self::submit), with an explicit clock for tests.
    pub async fn submit_at(
        &self,
        raw: SubmissionRequest,
        identifier: &str,
        now_ms: i64,
    ) -> Result<Accepted, SubmissionError> {
        // Cheapest check first, and before the rate limit so bots do not
        // consume a human's quota from a shared IP.
        if honeypot::is_bot(raw.honeypot.as_deref()) {
            info!(identifier, "honeypot tripped, rejecting submission");
            return Err(SubmissionError::BotDetected);
        }

        let decision = self
            .limiter
            .check_at(identifier, LimiterPurpose::FormSubmission, now_ms)
            .await;
        if !decision.allowed {
            return Err(SubmissionError::rate_limited(decision, now_ms));
        }

        let mut record =
            validate::validate_submission(&raw).map_err(SubmissionError::Validation)?;

        // Second throttle keyed by the (now normalized) submitter email,
        // when one was given.
        if let Some(email) = record.email.clone() {
            let by_email = self
                .limiter
                .check_at(&email, LimiterPurpose::ContactForm, now_ms)
                .await;
            if !by_email.allowed {
                return Err(SubmissionError::rate_limited(by_email, now_ms));
            }
        }

        record.message = sanitize::clean_text(&record.message);

        if let Err(err) = self.store.insert(&record).await {
            error!(error = %err, "failed to persist contact submission");
            return Err(SubmissionError::PersistFailed(err));
        }

        // Fire-and-continue: the record is durable, so a failed email must
        // not turn the submission into an error.
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            if let Err(err) = notifier.notify(&record).await {
                warn!(error = %err, "lead notification failed");
            }
        });

        Ok(Accepted {
            message: SUCCESS_MESSAGE.to_string(),
            rate: decision,
        })
    }
}
