//! Entity -> DTO mappers

use tutor_core::entities::{Comment, Message, Room};

use super::responses::{CommentResponse, MessageResponse, RoomResponse};

impl From<&Room> for RoomResponse {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.to_string(),
            kind: room.kind.as_str().to_string(),
            created_at: room.created_at,
            unread_count: None,
        }
    }
}

impl RoomResponse {
    /// Attach the caller's live unread count
    #[must_use]
    pub fn with_unread(mut self, unread_count: i64) -> Self {
        self.unread_count = Some(unread_count);
        self
    }
}

impl From<&Message> for MessageResponse {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.to_string(),
            room_id: message.room_id.to_string(),
            sender_id: message.sender_id.to_string(),
            content: message.content.clone(),
            created_at: message.created_at,
            edited_at: message.edited_at,
            reply_to_id: message.reply_to_id.map(|id| id.to_string()),
        }
    }
}

impl CommentResponse {
    /// Build a response with the derived direct-reply count
    pub fn from_comment(comment: &Comment, reply_count: i64) -> Self {
        Self {
            id: comment.id.to_string(),
            resource_id: comment.resource_id.to_string(),
            author_id: comment.author_id.to_string(),
            content: comment.visible_content().to_string(),
            parent_comment_id: comment.parent_comment_id.map(|id| id.to_string()),
            depth: comment.depth,
            is_deleted: comment.is_deleted,
            is_approved: comment.is_approved,
            created_at: comment.created_at,
            reply_count,
        }
    }
}
