//! Collaborator traits - external systems consumed at their boundary
//!
//! Token resolution, the out-of-band notification queue, and the live
//! delivery fan-out are all collaborators: the domain specifies the
//! contract, infrastructure crates provide the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::events::RoomEvent;
use crate::value_objects::{Principal, Snowflake};

/// Resolves an opaque bearer token to a principal
#[async_trait]
pub trait TokenValidator: Send + Sync {
    /// `Ok(None)` means the token is unknown; an inactive principal is
    /// returned as-is and rejected by the caller.
    async fn validate(&self, token: &str) -> Result<Option<Principal>, DomainError>;
}

/// Out-of-band notification job for a recipient with no live connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationJob {
    pub recipient_id: Snowflake,
    pub room_id: Snowflake,
    pub event_type: String,
    pub preview: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NotificationJob {
    /// Build a job from a room event for one recipient
    pub fn for_event(recipient_id: Snowflake, event: &RoomEvent) -> Self {
        let preview = match event {
            RoomEvent::MessageCreated(e) => Some(e.message.preview(120).to_string()),
            _ => None,
        };
        Self {
            recipient_id,
            room_id: event.room_id(),
            event_type: event.event_type().to_string(),
            preview,
            created_at: Utc::now(),
        }
    }
}

/// Task-queue errors. `Unavailable` must never propagate past the fan-out.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("notification queue unavailable: {0}")]
    Unavailable(String),
}

/// External task queue consumed by the delivery fan-out
#[async_trait]
pub trait NotificationQueue: Send + Sync {
    async fn enqueue(&self, job: NotificationJob) -> Result<(), QueueError>;
}

/// Live delivery fan-out for room events
///
/// Infallible by contract: delivery and notification failures are logged
/// and swallowed so they can never roll back the triggering write. Events
/// for one room are observed by joined connections in publish order.
#[async_trait]
pub trait RoomEventSink: Send + Sync {
    /// `recipients` is the full participant set of the room; the sink
    /// enqueues notification jobs for those without a live connection.
    async fn publish(&self, room_id: Snowflake, recipients: &[Snowflake], event: RoomEvent);
}

/// Sink that drops all events; used in tests and store-only deployments
#[derive(Debug, Default, Clone)]
pub struct NoopEventSink;

#[async_trait]
impl RoomEventSink for NoopEventSink {
    async fn publish(&self, _room_id: Snowflake, _recipients: &[Snowflake], _event: RoomEvent) {}
}
