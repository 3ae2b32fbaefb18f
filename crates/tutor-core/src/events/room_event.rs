//! Room events - emitted when room state changes
//!
//! These events are pushed to live WebSocket connections by the delivery
//! fan-out and serialized into notification jobs for offline recipients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Message, RoomKind};
use crate::value_objects::Snowflake;

/// Events scoped to a single room
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomEvent {
    MessageCreated(MessageCreatedEvent),
    ParticipantJoined(ParticipantJoinedEvent),
    RoomProvisioned(RoomProvisionedEvent),
}

impl RoomEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::MessageCreated(_) => "MESSAGE_CREATED",
            Self::ParticipantJoined(_) => "PARTICIPANT_JOINED",
            Self::RoomProvisioned(_) => "ROOM_PROVISIONED",
        }
    }

    /// Room the event belongs to
    pub fn room_id(&self) -> Snowflake {
        match self {
            Self::MessageCreated(e) => e.message.room_id,
            Self::ParticipantJoined(e) => e.room_id,
            Self::RoomProvisioned(e) => e.room_id,
        }
    }

    /// Convenience constructor for a created message
    pub fn message_created(message: Message) -> Self {
        Self::MessageCreated(MessageCreatedEvent {
            message,
            timestamp: Utc::now(),
        })
    }

    /// Convenience constructor for a joined participant
    pub fn participant_joined(room_id: Snowflake, user_id: Snowflake) -> Self {
        Self::ParticipantJoined(ParticipantJoinedEvent {
            room_id,
            user_id,
            timestamp: Utc::now(),
        })
    }

    /// Convenience constructor for a freshly provisioned room
    pub fn room_provisioned(room_id: Snowflake, kind: RoomKind) -> Self {
        Self::RoomProvisioned(RoomProvisionedEvent {
            room_id,
            kind,
            timestamp: Utc::now(),
        })
    }
}

/// A message was created in a room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageCreatedEvent {
    pub message: Message,
    pub timestamp: DateTime<Utc>,
}

/// A participant joined a room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantJoinedEvent {
    pub room_id: Snowflake,
    pub user_id: Snowflake,
    pub timestamp: DateTime<Utc>,
}

/// A forum room was provisioned from an enrollment event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomProvisionedEvent {
    pub room_id: Snowflake,
    pub kind: RoomKind,
    pub timestamp: DateTime<Utc>,
}
