//! Message entity - a chat message inside a room

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Chat message. Never hard-deleted by this layer; retention and erasure
/// are a collaborator concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: Snowflake,
    pub room_id: Snowflake,
    pub sender_id: Snowflake,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
    /// Must reference a message in the same room when set
    pub reply_to_id: Option<Snowflake>,
}

impl Message {
    /// Create a new message
    pub fn new(id: Snowflake, room_id: Snowflake, sender_id: Snowflake, content: String) -> Self {
        Self {
            id,
            room_id,
            sender_id,
            content,
            created_at: Utc::now(),
            edited_at: None,
            reply_to_id: None,
        }
    }

    /// Create a reply to another message in the same room
    pub fn new_reply(
        id: Snowflake,
        room_id: Snowflake,
        sender_id: Snowflake,
        content: String,
        reply_to_id: Snowflake,
    ) -> Self {
        Self {
            id,
            room_id,
            sender_id,
            content,
            created_at: Utc::now(),
            edited_at: None,
            reply_to_id: Some(reply_to_id),
        }
    }

    /// Check if this message is a reply
    #[inline]
    pub fn is_reply(&self) -> bool {
        self.reply_to_id.is_some()
    }

    /// Check if this message has been edited
    #[inline]
    pub fn is_edited(&self) -> bool {
        self.edited_at.is_some()
    }

    /// Check if message content is blank
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Truncated preview for notification payloads, respecting char boundaries
    pub fn preview(&self, max_len: usize) -> &str {
        if self.content.len() <= max_len {
            &self.content
        } else {
            let mut end = max_len;
            while !self.content.is_char_boundary(end) && end > 0 {
                end -= 1;
            }
            &self.content[..end]
        }
    }
}
