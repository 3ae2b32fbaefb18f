//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; those carrying free-form
//! content implement `Validate` for input validation.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Room Requests
// ============================================================================

/// Create an explicit (non-provisioned) room
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRoomRequest {
    /// "direct" or "general"; forum kinds are provisioned, never created here
    #[validate(length(min = 1, message = "kind is required"))]
    pub kind: String,

    /// Users added as participants alongside the creator
    #[serde(default)]
    pub participant_ids: Vec<String>,
}

// ============================================================================
// Message Requests
// ============================================================================

/// Post a message to a room
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PostMessageRequest {
    #[validate(length(min = 1, max = 4000, message = "Content must be 1-4000 characters"))]
    pub content: String,

    /// Message being replied to; must live in the same room
    pub reply_to_id: Option<String>,
}

/// Acknowledge reads up to a timestamp
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MarkReadRequest {
    pub at: DateTime<Utc>,
}

// ============================================================================
// Comment Requests
// ============================================================================

/// Post a comment on a content resource
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PostCommentRequest {
    #[validate(length(min = 1, max = 2000, message = "Content must be 1-2000 characters"))]
    pub content: String,

    /// Parent comment when replying; absent for top-level comments
    pub parent_comment_id: Option<String>,
}

// ============================================================================
// Enrollment Events
// ============================================================================

/// Inbound enrollment-created event from the enrollment collaborator
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EnrollmentCreatedRequest {
    #[validate(length(min = 1, message = "student_id is required"))]
    pub student_id: String,

    #[validate(length(min = 1, message = "subject_id is required"))]
    pub subject_id: String,

    pub tutor_id: Option<String>,
}
