//! Intake API - contact form backend for the firm website
//!
//! Routes:
//! - `POST /api/contact` - abuse-checked contact form submission
//! - `POST /api/admin/login` - admin credential check
//! - `GET /health` - health check

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod config;
pub mod counter;
pub mod email;
pub mod error;
pub mod handlers;
pub mod models;
pub mod persist;
pub mod state;

use state::AppState;

/// Build the service router.
pub fn app(state: Arc<AppState>) -> Router {
    // CORS is open: the API serves a public website form.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/contact", post(handlers::submit_contact))
        .route("/api/admin/login", post(handlers::admin_login))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
