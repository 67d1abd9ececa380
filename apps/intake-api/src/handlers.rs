//! HTTP handlers for the intake API

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use email_address::EmailAddress;
use std::sync::Arc;

use intake_core::{identity, LimiterPurpose, SubmissionOutcome, SubmissionRequest};

use crate::auth;
use crate::error::{rate_limit_headers, ApiError};
use crate::models::{AdminProfile, DbAdminUser, LoginRequest};
use crate::state::AppState;

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

fn client_id(headers: &HeaderMap) -> String {
    identity::client_identifier(|name| headers.get(name).and_then(|v| v.to_str().ok()))
}

/// Accept a contact form submission
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(raw): Json<SubmissionRequest>,
) -> Result<Response, ApiError> {
    // The pipeline runs its own checks, honeypot first; nothing may
    // increment a counter ahead of it, or bots start costing humans quota.
    let identifier = client_id(&headers);
    let accepted = state.pipeline.submit(raw, &identifier).await?;

    Ok((
        StatusCode::OK,
        rate_limit_headers(&accepted.rate),
        Json(SubmissionOutcome::success(accepted.message)),
    )
        .into_response())
}

/// Check admin credentials
pub async fn admin_login(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    let email = req.email.trim().to_lowercase();
    if email.is_empty() || req.password.is_empty() {
        return Err(ApiError::InvalidRequest(
            "Email and password are required".to_string(),
        ));
    }
    if !EmailAddress::is_valid(&email) {
        return Err(ApiError::InvalidRequest(
            "Please enter a valid email address".to_string(),
        ));
    }

    let identifier = client_id(&headers);

    let api_quota = state.limiter.check(&identifier, LimiterPurpose::Api).await;
    if !api_quota.allowed {
        return Err(ApiError::rate_limited(api_quota));
    }

    let by_ip = state.limiter.check(&identifier, LimiterPurpose::LoginIp).await;
    if !by_ip.allowed {
        return Err(ApiError::rate_limited(by_ip));
    }

    let admin: Option<DbAdminUser> = sqlx::query_as(
        r#"
        SELECT email, password_hash, display_name, active
        FROM admin_users
        WHERE email = ?
        "#,
    )
    .bind(&email)
    .fetch_optional(&state.db)
    .await?;

    if let Some(admin) = admin {
        if admin.active && auth::verify_password(&req.password, &admin.password_hash) {
            tracing::info!(email = %admin.email, "admin login succeeded");
            return Ok((
                StatusCode::OK,
                Json(AdminProfile {
                    email: admin.email,
                    display_name: admin.display_name,
                }),
            )
                .into_response());
        }
    }

    // Failures, and only failures, count against the per-email limiter.
    let by_email = state.limiter.check(&email, LimiterPurpose::LoginEmail).await;
    if !by_email.allowed {
        return Err(ApiError::rate_limited(by_email));
    }

    tracing::info!(email = %email, "rejected admin login");
    Err(ApiError::InvalidCredentials)
}
