//! Comment database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the comments table
#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub id: i64,
    pub resource_id: i64,
    pub author_id: i64,
    pub content: String,
    pub parent_comment_id: Option<i64>,
    pub depth: i16,
    pub is_deleted: bool,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}
