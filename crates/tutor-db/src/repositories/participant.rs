//! PostgreSQL implementation of ParticipantRepository
//!
//! The read marker clamp runs in SQL so concurrent acknowledgements can
//! never move the marker backwards.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use tutor_core::entities::Participant;
use tutor_core::traits::{ParticipantRepository, RepoResult};
use tutor_core::value_objects::Snowflake;

use crate::models::ParticipantModel;

use super::error::{map_db_error, not_participant};

/// PostgreSQL implementation of ParticipantRepository
#[derive(Clone)]
pub struct PgParticipantRepository {
    pool: PgPool,
}

impl PgParticipantRepository {
    /// Create a new PgParticipantRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParticipantRepository for PgParticipantRepository {
    #[instrument(skip(self))]
    async fn find(&self, room_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<Participant>> {
        let result = sqlx::query_as::<_, ParticipantModel>(
            r#"
            SELECT room_id, user_id, last_read_at, joined_at
            FROM participants
            WHERE room_id = $1 AND user_id = $2
            "#,
        )
        .bind(room_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Participant::from))
    }

    #[instrument(skip(self))]
    async fn find_by_room(&self, room_id: Snowflake) -> RepoResult<Vec<Participant>> {
        let results = sqlx::query_as::<_, ParticipantModel>(
            r#"
            SELECT room_id, user_id, last_read_at, joined_at
            FROM participants
            WHERE room_id = $1
            ORDER BY joined_at
            "#,
        )
        .bind(room_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Participant::from).collect())
    }

    #[instrument(skip(self))]
    async fn upsert(&self, room_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO participants (room_id, user_id, joined_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (room_id, user_id) DO NOTHING
            "#,
        )
        .bind(room_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn advance_last_read(
        &self,
        room_id: Snowflake,
        user_id: Snowflake,
        at: DateTime<Utc>,
    ) -> RepoResult<DateTime<Utc>> {
        let effective: Option<(DateTime<Utc>,)> = sqlx::query_as(
            r#"
            UPDATE participants
            SET last_read_at = GREATEST(COALESCE(last_read_at, to_timestamp(0)), $3)
            WHERE room_id = $1 AND user_id = $2
            RETURNING last_read_at
            "#,
        )
        .bind(room_id.into_inner())
        .bind(user_id.into_inner())
        .bind(at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match effective {
            Some((marker,)) => Ok(marker),
            None => Err(not_participant(room_id, user_id)),
        }
    }
}
