//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Room Responses
// ============================================================================

/// Room with the caller's live unread count
#[derive(Debug, Clone, Serialize)]
pub struct RoomResponse {
    pub id: String,
    pub kind: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unread_count: Option<i64>,
}

/// Rooms materialized by an enrollment event
#[derive(Debug, Serialize)]
pub struct ProvisionedRoomsResponse {
    pub rooms: Vec<RoomResponse>,
}

// ============================================================================
// Message Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub room_id: String,
    pub sender_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_id: Option<String>,
}

/// Effective read marker after an acknowledgement
#[derive(Debug, Serialize)]
pub struct ReadMarkerResponse {
    pub room_id: String,
    pub last_read_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    pub room_id: String,
    pub unread_count: i64,
}

// ============================================================================
// Comment Responses
// ============================================================================

/// Comment as shown to clients; deleted comments keep their place in the
/// thread but hide content
#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub resource_id: String,
    pub author_id: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_comment_id: Option<String>,
    pub depth: i16,
    pub is_deleted: bool,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    /// Derived count of direct replies, never stored
    pub reply_count: i64,
}
