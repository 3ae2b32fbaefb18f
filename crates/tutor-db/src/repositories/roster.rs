//! PostgreSQL implementation of RosterRepository
//!
//! Read-only view over subject staffing; rows are written by the
//! enrollment system, never by this service.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use tutor_core::traits::{RepoResult, RosterRepository};
use tutor_core::value_objects::Snowflake;

use super::error::map_db_error;

/// PostgreSQL implementation of RosterRepository
#[derive(Clone)]
pub struct PgRosterRepository {
    pool: PgPool,
}

impl PgRosterRepository {
    /// Create a new PgRosterRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RosterRepository for PgRosterRepository {
    #[instrument(skip(self))]
    async fn active_teachers(&self, subject_id: Snowflake) -> RepoResult<Vec<Snowflake>> {
        let rows: Vec<(i64,)> = sqlx::query_as(
            r#"
            SELECT teacher_id
            FROM subject_teachers
            WHERE subject_id = $1 AND active = TRUE
            ORDER BY teacher_id
            "#,
        )
        .bind(subject_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(|(id,)| Snowflake::new(id)).collect())
    }
}
