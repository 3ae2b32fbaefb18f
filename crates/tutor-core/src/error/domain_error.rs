//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Room not found: {0}")]
    RoomNotFound(Snowflake),

    #[error("Message not found: {0}")]
    MessageNotFound(Snowflake),

    #[error("Comment not found: {0}")]
    CommentNotFound(Snowflake),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("User {user_id} is not a participant of room {room_id}")]
    NotParticipant {
        room_id: Snowflake,
        user_id: Snowflake,
    },

    #[error("Forbidden: {0}")]
    Forbidden(String),

    // =========================================================================
    // Validation / Business Rule Errors
    // =========================================================================
    #[error("Reply target {0} does not belong to this room")]
    InvalidReply(Snowflake),

    #[error("Comment nesting limited to {max} levels")]
    MaxDepthExceeded { max: i16 },

    #[error("Cannot reply to a deleted comment")]
    ParentDeleted,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::RoomNotFound(_) => "UNKNOWN_ROOM",
            Self::MessageNotFound(_) => "UNKNOWN_MESSAGE",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::NotParticipant { .. } => "NOT_PARTICIPANT",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::InvalidReply(_) => "INVALID_REPLY",
            Self::MaxDepthExceeded { .. } => "MAX_DEPTH_EXCEEDED",
            Self::ParentDeleted => "PARENT_DELETED",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RoomNotFound(_) | Self::MessageNotFound(_) | Self::CommentNotFound(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotParticipant { .. } | Self::Forbidden(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidReply(_)
                | Self::MaxDepthExceeded { .. }
                | Self::ParentDeleted
                | Self::ValidationError(_)
                | Self::ContentTooLong { .. }
        )
    }
}
