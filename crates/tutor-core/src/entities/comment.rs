//! Comment entity - nested thread attached to a content resource
//!
//! Comments form a tree distinct from chat messages: they attach to a
//! resource (a lesson page, an assignment), not to a room. Nesting is
//! limited to three levels and deletion is always soft.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Maximum nesting depth for comment threads
pub const MAX_COMMENT_DEPTH: i16 = 3;

/// Nested comment on a content resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Snowflake,
    pub resource_id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    pub parent_comment_id: Option<Snowflake>,
    /// 1 for top-level comments, `parent.depth + 1` otherwise; never above 3
    pub depth: i16,
    pub is_deleted: bool,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Comment {
    /// Create a top-level comment
    pub fn new(id: Snowflake, resource_id: Snowflake, author_id: Snowflake, content: String) -> Self {
        Self {
            id,
            resource_id,
            author_id,
            content,
            parent_comment_id: None,
            depth: 1,
            is_deleted: false,
            is_approved: false,
            created_at: Utc::now(),
            deleted_at: None,
        }
    }

    /// Create a reply under a parent comment
    ///
    /// Returns `None` when the reply would exceed the maximum depth.
    pub fn reply_to(parent: &Comment, id: Snowflake, author_id: Snowflake, content: String) -> Option<Self> {
        let depth = parent.depth + 1;
        if depth > MAX_COMMENT_DEPTH {
            return None;
        }
        Some(Self {
            id,
            resource_id: parent.resource_id,
            author_id,
            content,
            parent_comment_id: Some(parent.id),
            depth,
            is_deleted: false,
            is_approved: false,
            created_at: Utc::now(),
            deleted_at: None,
        })
    }

    /// Whether replies under this comment are still accepted
    #[inline]
    pub fn accepts_replies(&self) -> bool {
        !self.is_deleted && self.depth < MAX_COMMENT_DEPTH
    }

    /// Soft delete: the row stays queryable but content is hidden and no
    /// further replies are accepted
    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
        self.deleted_at = Some(Utc::now());
    }

    /// Content as shown to clients; deleted comments hide their content
    pub fn visible_content(&self) -> &str {
        if self.is_deleted {
            ""
        } else {
            &self.content
        }
    }
}
