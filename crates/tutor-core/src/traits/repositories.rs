//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. All mutations scoped to a single operation
//! run in one logical transaction inside the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Comment, Message, Participant, Room};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Room Repository
// ============================================================================

#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Find room by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Room>>;

    /// List all rooms a user participates in
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Room>>;

    /// Create a Direct or General room
    async fn create(&self, room: &Room) -> RepoResult<()>;

    /// Look up or create the subject forum keyed by (student, subject).
    ///
    /// `candidate_id` is used only when a new row is inserted. Returns the
    /// room and whether it was created by this call. Concurrency-safe: two
    /// simultaneous calls for the same key observe a single row.
    async fn upsert_subject_forum(
        &self,
        candidate_id: Snowflake,
        student_id: Snowflake,
        subject_id: Snowflake,
    ) -> RepoResult<(Room, bool)>;

    /// Look up or create the tutor forum keyed by (student, tutor).
    async fn upsert_tutor_forum(
        &self,
        candidate_id: Snowflake,
        student_id: Snowflake,
        tutor_id: Snowflake,
    ) -> RepoResult<(Room, bool)>;
}

// ============================================================================
// Participant Repository
// ============================================================================

#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// Find a participant row by composite key
    async fn find(&self, room_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<Participant>>;

    /// List all participants of a room
    async fn find_by_room(&self, room_id: Snowflake) -> RepoResult<Vec<Participant>>;

    /// Insert a membership row if absent. Returns true when a row was
    /// actually inserted (idempotent on re-delivery).
    async fn upsert(&self, room_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    /// Advance the read marker with a monotonic clamp: timestamps older
    /// than the stored value are silently ignored. Returns the effective
    /// marker. Fails with `NotParticipant` when no membership row exists.
    async fn advance_last_read(
        &self,
        room_id: Snowflake,
        user_id: Snowflake,
        at: DateTime<Utc>,
    ) -> RepoResult<DateTime<Utc>>;
}

// ============================================================================
// Message Repository
// ============================================================================

/// Pagination options for message queries
#[derive(Debug, Clone, Default)]
pub struct MessageQuery {
    pub before: Option<Snowflake>,
    pub after: Option<Snowflake>,
    pub limit: i64,
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Find message by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>>;

    /// List messages in a room with cursor pagination
    async fn find_by_room(&self, room_id: Snowflake, query: MessageQuery) -> RepoResult<Vec<Message>>;

    /// Persist a message and advance the sender's read marker to the
    /// message's `created_at`, atomically as one transaction.
    async fn create(&self, message: &Message) -> RepoResult<()>;

    /// Live unread count: messages from other senders newer than the
    /// participant's read marker (all of them when the marker is null).
    async fn unread_count(&self, room_id: Snowflake, user_id: Snowflake) -> RepoResult<i64>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by ID (soft-deleted rows included)
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>>;

    /// List all comments on a resource, oldest first
    async fn find_by_resource(&self, resource_id: Snowflake) -> RepoResult<Vec<Comment>>;

    /// Create a new comment
    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    /// Soft delete: mark deleted, keep the row
    async fn soft_delete(&self, id: Snowflake, at: DateTime<Utc>) -> RepoResult<()>;

    /// Set moderation approval state
    async fn set_approved(&self, id: Snowflake, approved: bool) -> RepoResult<()>;

    /// Derived direct-reply counts for every comment on a resource
    async fn reply_counts(&self, resource_id: Snowflake) -> RepoResult<Vec<(Snowflake, i64)>>;
}

// ============================================================================
// Roster Repository
// ============================================================================

/// Read-only view of subject staffing, owned by the enrollment collaborator
#[async_trait]
pub trait RosterRepository: Send + Sync {
    /// Active teachers assigned to a subject
    async fn active_teachers(&self, subject_id: Snowflake) -> RepoResult<Vec<Snowflake>>;
}
