//! Application state for the intake API

use anyhow::Result;
use intake_core::{
    CounterStore, FallbackCounterStore, LeadNotifier, SlidingWindowLimiter, SubmissionPipeline,
};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::counter::{HttpCounterStore, UnconfiguredCounterStore};
use crate::email::EmailNotifier;
use crate::persist::SqliteSubmissionStore;

pub struct AppState {
    pub db: SqlitePool,
    pub limiter: SlidingWindowLimiter,
    pub pipeline: SubmissionPipeline,
    pub config: Config,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self> {
        info!("Connecting to database: {}", config.database_url);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&config.database_url)
            .await?;

        run_migrations(&pool).await?;

        let counter: Arc<dyn CounterStore> = match &config.counter_store_url {
            Some(url) => Arc::new(HttpCounterStore::new(
                url.clone(),
                config.counter_store_token.clone(),
            )),
            None => {
                warn!("COUNTER_STORE_URL not set; rate limiting runs on the in-process fallback");
                Arc::new(UnconfiguredCounterStore)
            }
        };

        let notifier: Arc<dyn LeadNotifier> = Arc::new(EmailNotifier::new(&config));

        Ok(Self::assemble(pool, counter, notifier, config))
    }

    /// Wire the state from already-built parts. Tests use this to inject a
    /// controllable counter store and notifier.
    pub fn assemble(
        pool: SqlitePool,
        counter: Arc<dyn CounterStore>,
        notifier: Arc<dyn LeadNotifier>,
        config: Config,
    ) -> Self {
        let fallback = Arc::new(FallbackCounterStore::new());
        let limiter = SlidingWindowLimiter::new(counter, fallback);
        let store = Arc::new(SqliteSubmissionStore::new(pool.clone()));
        let pipeline = SubmissionPipeline::new(limiter.clone(), store, notifier);

        Self {
            db: pool,
            limiter,
            pipeline,
            config,
        }
    }
}

/// Create the tables this service owns.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    info!("Running database migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS contact_submissions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT,
            phone TEXT NOT NULL,
            service_type TEXT NOT NULL,
            message TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'new',
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_contact_submissions_status
        ON contact_submissions(status)
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS admin_users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            display_name TEXT NOT NULL,
            active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    info!("Migrations complete");
    Ok(())
}
