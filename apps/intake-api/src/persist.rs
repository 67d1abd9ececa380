//! Submission persistence
//!
//! The pipeline's only write is the insert of an accepted submission with
//! status `new`. Reading and resolving submissions is the admin
//! dashboard's CRUD layer, which lives outside this service.

use async_trait::async_trait;
use chrono::Utc;
use intake_core::{StoreError, SubmissionStore, ValidatedSubmission};
use sqlx::SqlitePool;

pub struct SqliteSubmissionStore {
    pool: SqlitePool,
}

impl SqliteSubmissionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionStore for SqliteSubmissionStore {
    async fn insert(&self, submission: &ValidatedSubmission) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO contact_submissions
                (first_name, last_name, email, phone, service_type, message, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, 'new', ?)
            "#,
        )
        .bind(&submission.first_name)
        .bind(&submission.last_name)
        .bind(&submission.email)
        .bind(&submission.phone)
        .bind(submission.service_type.to_string())
        .bind(&submission.message)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError(e.to_string()))?;

        Ok(())
    }
}
