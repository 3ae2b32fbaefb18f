//! Test fixtures and data seeders
//!
//! Request/response mirrors for the API, plus seeding helpers for the
//! tables normally written by the account and roster systems.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Counter for unique test IDs; seeded from the clock so reruns against
/// the same database do not collide
static ID_COUNTER: AtomicI64 = AtomicI64::new(0);

/// Allocate a unique ID for seeded rows
pub fn unique_id() -> i64 {
    let base = ID_COUNTER.fetch_add(1, Ordering::SeqCst);
    if base == 0 {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(1);
        ID_COUNTER.store(millis * 1000 + 1, Ordering::SeqCst);
        millis * 1000
    } else {
        base
    }
}

// ============================================================================
// Seeded Principals
// ============================================================================

/// A seeded user with a valid token
#[derive(Debug, Clone)]
pub struct SeededUser {
    pub id: i64,
    pub token: String,
}

impl SeededUser {
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }
}

/// Seed an active user with the given roles and mint a token for them
pub async fn seed_user(pool: &PgPool, roles: &str) -> Result<SeededUser> {
    let id = unique_id();
    let token = format!("test-token-{}", Uuid::new_v4());

    sqlx::query("INSERT INTO users (id, active, roles) VALUES ($1, TRUE, $2)")
        .bind(id)
        .bind(roles)
        .execute(pool)
        .await?;

    sqlx::query("INSERT INTO auth_tokens (token, user_id) VALUES ($1, $2)")
        .bind(&token)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(SeededUser { id, token })
}

/// Seed an inactive user with a valid token
pub async fn seed_inactive_user(pool: &PgPool) -> Result<SeededUser> {
    let user = seed_user(pool, "student").await?;
    sqlx::query("UPDATE users SET active = FALSE WHERE id = $1")
        .bind(user.id)
        .execute(pool)
        .await?;
    Ok(user)
}

/// Register a teacher for a subject in the roster table
pub async fn seed_subject_teacher(pool: &PgPool, subject_id: i64, teacher_id: i64) -> Result<()> {
    sqlx::query(
        "INSERT INTO subject_teachers (subject_id, teacher_id, active) VALUES ($1, $2, TRUE)",
    )
    .bind(subject_id)
    .bind(teacher_id)
    .execute(pool)
    .await?;
    Ok(())
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CreateRoomRequest {
    pub kind: String,
    pub participant_ids: Vec<String>,
}

impl CreateRoomRequest {
    pub fn direct(other: &SeededUser) -> Self {
        Self {
            kind: "direct".to_string(),
            participant_ids: vec![other.id_string()],
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostMessageRequest {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_id: Option<String>,
}

impl PostMessageRequest {
    pub fn simple(content: &str) -> Self {
        Self {
            content: content.to_string(),
            reply_to_id: None,
        }
    }

    pub fn reply(content: &str, message_id: &str) -> Self {
        Self {
            content: content.to_string(),
            reply_to_id: Some(message_id.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MarkReadRequest {
    pub at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct PostCommentRequest {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_comment_id: Option<String>,
}

impl PostCommentRequest {
    pub fn top_level(content: &str) -> Self {
        Self {
            content: content.to_string(),
            parent_comment_id: None,
        }
    }

    pub fn reply(content: &str, parent_id: &str) -> Self {
        Self {
            content: content.to_string(),
            parent_comment_id: Some(parent_id.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EnrollmentCreatedRequest {
    pub student_id: String,
    pub subject_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tutor_id: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RoomResponse {
    pub id: String,
    pub kind: String,
    pub created_at: String,
    pub unread_count: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ProvisionedRoomsResponse {
    pub rooms: Vec<RoomResponse>,
}

#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub id: String,
    pub room_id: String,
    pub sender_id: String,
    pub content: String,
    pub created_at: String,
    pub reply_to_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReadMarkerResponse {
    pub room_id: String,
    pub last_read_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct UnreadCountResponse {
    pub room_id: String,
    pub unread_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub resource_id: String,
    pub author_id: String,
    pub content: String,
    pub parent_comment_id: Option<String>,
    pub depth: i16,
    pub is_deleted: bool,
    pub is_approved: bool,
    pub reply_count: i64,
}

/// Error body returned by every rejection
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub request_id: Option<String>,
}
