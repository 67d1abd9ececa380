//! Abuse-resistant contact intake pipeline
//!
//! This crate implements the server-side safety pipeline behind the public
//! contact form: a honeypot check, sliding-window rate limiting backed by a
//! shared counter store with an in-process degraded-mode fallback, strict
//! field validation, free-text sanitization, and an orchestrator that
//! sequences the checks and produces a uniform success/error result.
//!
//! External effects are trait seams so the pipeline stays testable:
//!
//! - [`store::CounterStore`] - the shared rate-limit counter backend
//! - [`submit::SubmissionStore`] - persistence for accepted submissions
//! - [`submit::LeadNotifier`] - best-effort email notification
//!
//! The HTTP layer, database, and email provider live in the `intake-api`
//! application crate.

pub mod error;
pub mod honeypot;
pub mod identity;
pub mod limiter;
pub mod sanitize;
pub mod store;
pub mod submit;
pub mod types;
pub mod validate;

pub use error::SubmissionError;
pub use limiter::{epoch_ms_now, LimiterPurpose, RateLimitDecision, RatePolicy, SlidingWindowLimiter};
pub use store::{CounterStore, CounterStoreError, FallbackCounterStore, WindowCount};
pub use submit::{
    Accepted, LeadNotifier, NotifyError, StoreError, SubmissionPipeline, SubmissionStore,
};
pub use types::{ServiceType, SubmissionOutcome, SubmissionRequest, ValidatedSubmission};
