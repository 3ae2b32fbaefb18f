//! Error handling utilities for repositories

use sqlx::Error as SqlxError;
use tutor_core::error::DomainError;
use tutor_core::value_objects::Snowflake;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Create a "comment not found" error
pub fn comment_not_found(id: Snowflake) -> DomainError {
    DomainError::CommentNotFound(id)
}

/// Create a "not a participant" error
pub fn not_participant(room_id: Snowflake, user_id: Snowflake) -> DomainError {
    DomainError::NotParticipant { room_id, user_id }
}
