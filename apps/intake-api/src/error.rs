//! Error types for the intake API
//!
//! Maps the pipeline taxonomy onto HTTP. Two mappings are deliberate
//! rather than obvious: a honeypot rejection answers 200 with the generic
//! error body, so automated submitters cannot distinguish it from normal
//! handling, and persistence/internal failures answer 500 with a generic
//! message while the detail stays in the server logs.

use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use intake_core::{epoch_ms_now, RateLimitDecision, SubmissionError, SubmissionOutcome};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Too many attempts. Please try again in {retry_after_minutes} minutes.")]
    RateLimited {
        decision: RateLimitDecision,
        retry_after_minutes: i64,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn rate_limited(decision: RateLimitDecision) -> Self {
        ApiError::RateLimited {
            retry_after_minutes: decision.retry_after_minutes(epoch_ms_now()),
            decision,
        }
    }
}

/// Quota headers attached to both allowed and rejected rate-limited
/// responses.
pub fn rate_limit_headers(decision: &RateLimitDecision) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("X-RateLimit-Limit", HeaderValue::from(decision.limit));
    headers.insert("X-RateLimit-Remaining", HeaderValue::from(decision.remaining));
    headers.insert("X-RateLimit-Reset", HeaderValue::from(decision.reset_at_epoch_ms));
    headers
}

fn rate_limited_response(decision: &RateLimitDecision, message: String) -> Response {
    let mut headers = rate_limit_headers(decision);
    headers.insert(
        header::RETRY_AFTER,
        HeaderValue::from(decision.retry_after_secs(epoch_ms_now())),
    );
    (
        StatusCode::TOO_MANY_REQUESTS,
        headers,
        Json(SubmissionOutcome::error(message)),
    )
        .into_response()
}

fn submission_response(err: SubmissionError) -> Response {
    match &err {
        SubmissionError::BotDetected => (
            StatusCode::OK,
            Json(SubmissionOutcome::error(err.to_string())),
        )
            .into_response(),
        SubmissionError::Validation(_) => (
            StatusCode::BAD_REQUEST,
            Json(SubmissionOutcome::error(err.to_string())),
        )
            .into_response(),
        SubmissionError::RateLimited { decision, .. } => {
            rate_limited_response(decision, err.to_string())
        }
        SubmissionError::PersistFailed(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(SubmissionOutcome::error(err.to_string())),
        )
            .into_response(),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Submission(err) => submission_response(err),
            ApiError::InvalidRequest(msg) => (
                StatusCode::BAD_REQUEST,
                Json(SubmissionOutcome::error(msg)),
            )
                .into_response(),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(SubmissionOutcome::error("Invalid email or password")),
            )
                .into_response(),
            ApiError::RateLimited {
                decision,
                retry_after_minutes,
            } => rate_limited_response(
                &decision,
                format!("Too many attempts. Please try again in {retry_after_minutes} minutes."),
            ),
            ApiError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(SubmissionOutcome::error(
                        "Something went wrong. Please try again later.",
                    )),
                )
                    .into_response()
            }
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(SubmissionOutcome::error(
                        "Something went wrong. Please try again later.",
                    )),
                )
                    .into_response()
            }
        }
    }
}
