//! Notification queue backed by a job table
//!
//! Workers outside this service drain the `notification_jobs` table. The
//! fan-out treats `Unavailable` as non-fatal, so a failed insert is logged
//! by the caller and never rolls back the triggering write.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use tutor_core::traits::{NotificationJob, NotificationQueue, QueueError};

/// PostgreSQL job-table implementation of NotificationQueue
#[derive(Clone)]
pub struct PgNotificationQueue {
    pool: PgPool,
}

impl PgNotificationQueue {
    /// Create a new PgNotificationQueue
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationQueue for PgNotificationQueue {
    #[instrument(skip(self))]
    async fn enqueue(&self, job: NotificationJob) -> Result<(), QueueError> {
        sqlx::query(
            r#"
            INSERT INTO notification_jobs (recipient_id, room_id, event_type, preview, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(job.recipient_id.into_inner())
        .bind(job.room_id.into_inner())
        .bind(&job.event_type)
        .bind(&job.preview)
        .bind(job.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| QueueError::Unavailable(e.to_string()))?;

        Ok(())
    }
}
