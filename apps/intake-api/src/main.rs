//! Intake API server - backend for the firm website's contact form

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use intake_api::config::Config;
use intake_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("intake_api=info".parse()?)
                .add_directive("intake_core=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    info!("Initializing intake API...");
    let config = Config::from_env();
    let port = config.port;
    let state = Arc::new(AppState::new(config).await?);

    let app = intake_api::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting intake API on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
