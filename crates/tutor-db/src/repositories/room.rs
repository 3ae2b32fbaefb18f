//! PostgreSQL implementation of RoomRepository
//!
//! Forum rooms are keyed by the natural key of the relationship that
//! provisions them. Upserts insert-or-fetch in two steps under a partial
//! unique index, so concurrent provisioning for the same key converges on
//! a single row.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use tutor_core::entities::{Room, RoomKind};
use tutor_core::traits::{RepoResult, RoomRepository};
use tutor_core::value_objects::Snowflake;

use crate::models::RoomModel;

use super::error::map_db_error;

/// PostgreSQL implementation of RoomRepository
#[derive(Clone)]
pub struct PgRoomRepository {
    pool: PgPool,
}

impl PgRoomRepository {
    /// Create a new PgRoomRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomRepository for PgRoomRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Room>> {
        let result = sqlx::query_as::<_, RoomModel>(
            r#"
            SELECT id, kind, student_id, subject_id, tutor_id, created_at
            FROM rooms
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Room::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Room>> {
        let results = sqlx::query_as::<_, RoomModel>(
            r#"
            SELECT r.id, r.kind, r.student_id, r.subject_id, r.tutor_id, r.created_at
            FROM rooms r
            JOIN participants p ON p.room_id = r.id
            WHERE p.user_id = $1
            ORDER BY r.id
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Room::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, room: &Room) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO rooms (id, kind, student_id, subject_id, tutor_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(room.id.into_inner())
        .bind(room.kind.as_str())
        .bind(room.student_id.map(Snowflake::into_inner))
        .bind(room.subject_id.map(Snowflake::into_inner))
        .bind(room.tutor_id.map(Snowflake::into_inner))
        .bind(room.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn upsert_subject_forum(
        &self,
        candidate_id: Snowflake,
        student_id: Snowflake,
        subject_id: Snowflake,
    ) -> RepoResult<(Room, bool)> {
        let inserted = sqlx::query_as::<_, RoomModel>(
            r#"
            INSERT INTO rooms (id, kind, student_id, subject_id, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            ON CONFLICT (kind, student_id, subject_id) WHERE kind = 'subject_forum'
            DO NOTHING
            RETURNING id, kind, student_id, subject_id, tutor_id, created_at
            "#,
        )
        .bind(candidate_id.into_inner())
        .bind(RoomKind::SubjectForum.as_str())
        .bind(student_id.into_inner())
        .bind(subject_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        if let Some(model) = inserted {
            return Ok((Room::from(model), true));
        }

        // Lost the insert race; the winner's row is committed and visible
        let existing = sqlx::query_as::<_, RoomModel>(
            r#"
            SELECT id, kind, student_id, subject_id, tutor_id, created_at
            FROM rooms
            WHERE kind = $1 AND student_id = $2 AND subject_id = $3
            "#,
        )
        .bind(RoomKind::SubjectForum.as_str())
        .bind(student_id.into_inner())
        .bind(subject_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok((Room::from(existing), false))
    }

    #[instrument(skip(self))]
    async fn upsert_tutor_forum(
        &self,
        candidate_id: Snowflake,
        student_id: Snowflake,
        tutor_id: Snowflake,
    ) -> RepoResult<(Room, bool)> {
        let inserted = sqlx::query_as::<_, RoomModel>(
            r#"
            INSERT INTO rooms (id, kind, student_id, tutor_id, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            ON CONFLICT (kind, student_id, tutor_id) WHERE kind = 'tutor_forum'
            DO NOTHING
            RETURNING id, kind, student_id, subject_id, tutor_id, created_at
            "#,
        )
        .bind(candidate_id.into_inner())
        .bind(RoomKind::TutorForum.as_str())
        .bind(student_id.into_inner())
        .bind(tutor_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        if let Some(model) = inserted {
            return Ok((Room::from(model), true));
        }

        let existing = sqlx::query_as::<_, RoomModel>(
            r#"
            SELECT id, kind, student_id, subject_id, tutor_id, created_at
            FROM rooms
            WHERE kind = $1 AND student_id = $2 AND tutor_id = $3
            "#,
        )
        .bind(RoomKind::TutorForum.as_str())
        .bind(student_id.into_inner())
        .bind(tutor_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok((Room::from(existing), false))
    }
}
