//! PostgreSQL implementation of CommentRepository
//!
//! Deletion is always soft; deleted rows stay queryable so threads keep
//! their shape. Reply counts are derived with an aggregate, never stored.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use tutor_core::entities::Comment;
use tutor_core::traits::{CommentRepository, RepoResult};
use tutor_core::value_objects::Snowflake;

use crate::models::CommentModel;

use super::error::{comment_not_found, map_db_error};

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new PgCommentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(
            r#"
            SELECT id, resource_id, author_id, content, parent_comment_id,
                   depth, is_deleted, is_approved, created_at, deleted_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Comment::from))
    }

    #[instrument(skip(self))]
    async fn find_by_resource(&self, resource_id: Snowflake) -> RepoResult<Vec<Comment>> {
        let results = sqlx::query_as::<_, CommentModel>(
            r#"
            SELECT id, resource_id, author_id, content, parent_comment_id,
                   depth, is_deleted, is_approved, created_at, deleted_at
            FROM comments
            WHERE resource_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(resource_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Comment::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, resource_id, author_id, content, parent_comment_id,
                                  depth, is_deleted, is_approved, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(comment.id.into_inner())
        .bind(comment.resource_id.into_inner())
        .bind(comment.author_id.into_inner())
        .bind(&comment.content)
        .bind(comment.parent_comment_id.map(Snowflake::into_inner))
        .bind(comment.depth)
        .bind(comment.is_deleted)
        .bind(comment.is_approved)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn soft_delete(&self, id: Snowflake, at: DateTime<Utc>) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE comments
            SET is_deleted = TRUE, deleted_at = $2
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(id.into_inner())
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(comment_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_approved(&self, id: Snowflake, approved: bool) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE comments
            SET is_approved = $2
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(id.into_inner())
        .bind(approved)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(comment_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn reply_counts(&self, resource_id: Snowflake) -> RepoResult<Vec<(Snowflake, i64)>> {
        let rows: Vec<(i64, i64)> = sqlx::query_as(
            r#"
            SELECT parent_comment_id, COUNT(*)
            FROM comments
            WHERE resource_id = $1 AND parent_comment_id IS NOT NULL
            GROUP BY parent_comment_id
            "#,
        )
        .bind(resource_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows
            .into_iter()
            .map(|(id, count)| (Snowflake::new(id), count))
            .collect())
    }
}
