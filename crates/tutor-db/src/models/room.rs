//! Room and participant database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the rooms table
#[derive(Debug, Clone, FromRow)]
pub struct RoomModel {
    pub id: i64,
    pub kind: String,
    pub student_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub tutor_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Database model for the participants table
#[derive(Debug, Clone, FromRow)]
pub struct ParticipantModel {
    pub room_id: i64,
    pub user_id: i64,
    pub last_read_at: Option<DateTime<Utc>>,
    pub joined_at: DateTime<Utc>,
}

impl ParticipantModel {
    /// Whether this participant has ever read the room
    #[inline]
    pub fn has_read(&self) -> bool {
        self.last_read_at.is_some()
    }
}
