//! PostgreSQL implementation of MessageRepository
//!
//! `create` persists the message and advances the sender's read marker in
//! one transaction, so a sender never counts their own message as unread.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use tutor_core::entities::Message;
use tutor_core::traits::{MessageQuery, MessageRepository, RepoResult};
use tutor_core::value_objects::Snowflake;

use crate::models::MessageModel;

use super::error::map_db_error;

/// PostgreSQL implementation of MessageRepository
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Create a new PgMessageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>> {
        let result = sqlx::query_as::<_, MessageModel>(
            r#"
            SELECT id, room_id, sender_id, content, created_at, edited_at, reply_to_id
            FROM messages
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Message::from))
    }

    #[instrument(skip(self))]
    async fn find_by_room(&self, room_id: Snowflake, query: MessageQuery) -> RepoResult<Vec<Message>> {
        let limit = query.limit.clamp(1, 100);

        let results = match (query.before, query.after) {
            (Some(before), None) => {
                // Fetch messages before cursor (scrolling up)
                sqlx::query_as::<_, MessageModel>(
                    r#"
                    SELECT id, room_id, sender_id, content, created_at, edited_at, reply_to_id
                    FROM messages
                    WHERE room_id = $1 AND id < $2
                    ORDER BY id DESC
                    LIMIT $3
                    "#,
                )
                .bind(room_id.into_inner())
                .bind(before.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            (None, Some(after)) => {
                // Fetch messages after cursor (scrolling down)
                sqlx::query_as::<_, MessageModel>(
                    r#"
                    SELECT id, room_id, sender_id, content, created_at, edited_at, reply_to_id
                    FROM messages
                    WHERE room_id = $1 AND id > $2
                    ORDER BY id ASC
                    LIMIT $3
                    "#,
                )
                .bind(room_id.into_inner())
                .bind(after.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            _ => {
                // Fetch latest messages (no cursor)
                sqlx::query_as::<_, MessageModel>(
                    r#"
                    SELECT id, room_id, sender_id, content, created_at, edited_at, reply_to_id
                    FROM messages
                    WHERE room_id = $1
                    ORDER BY id DESC
                    LIMIT $2
                    "#,
                )
                .bind(room_id.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Message::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, message: &Message) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO messages (id, room_id, sender_id, content, created_at, reply_to_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(message.id.into_inner())
        .bind(message.room_id.into_inner())
        .bind(message.sender_id.into_inner())
        .bind(&message.content)
        .bind(message.created_at)
        .bind(message.reply_to_id.map(Snowflake::into_inner))
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        // The sender has read their own message by definition
        sqlx::query(
            r#"
            UPDATE participants
            SET last_read_at = GREATEST(COALESCE(last_read_at, to_timestamp(0)), $3)
            WHERE room_id = $1 AND user_id = $2
            "#,
        )
        .bind(message.room_id.into_inner())
        .bind(message.sender_id.into_inner())
        .bind(message.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn unread_count(&self, room_id: Snowflake, user_id: Snowflake) -> RepoResult<i64> {
        let (count,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM messages m
            JOIN participants p ON p.room_id = m.room_id AND p.user_id = $2
            WHERE m.room_id = $1
              AND m.sender_id <> $2
              AND (p.last_read_at IS NULL OR m.created_at > p.last_read_at)
            "#,
        )
        .bind(room_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }
}
