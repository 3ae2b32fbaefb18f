//! Gateway message format
//!
//! Frames sent to clients after a successful join: a single `READY`
//! confirmation followed by room events in publish order.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tutor_core::{RoomEvent, Snowflake};

/// Event type of the join confirmation frame
pub const READY: &str = "READY";

/// Gateway message format
///
/// Every frame carries an event type `t`, a per-connection sequence `s`,
/// and a payload `d`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayMessage {
    /// Event type
    pub t: String,

    /// Per-connection sequence number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s: Option<u64>,

    /// Event data payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<Value>,
}

/// Payload of the `READY` frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyPayload {
    pub session_id: String,
    pub room_id: String,
    pub user_id: String,
}

impl GatewayMessage {
    /// Create the join confirmation frame
    #[must_use]
    pub fn ready(session_id: impl Into<String>, room_id: Snowflake, user_id: Snowflake) -> Self {
        let payload = ReadyPayload {
            session_id: session_id.into(),
            room_id: room_id.to_string(),
            user_id: user_id.to_string(),
        };
        Self {
            t: READY.to_string(),
            s: None,
            d: serde_json::to_value(payload).ok(),
        }
    }

    /// Create a room event frame
    #[must_use]
    pub fn event(sequence: u64, event: &RoomEvent) -> Self {
        Self {
            t: event.event_type().to_string(),
            s: Some(sequence),
            d: serde_json::to_value(event).ok(),
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl std::fmt::Display for GatewayMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.s {
            Some(s) => write!(f, "GatewayMessage(t={}, s={s})", self.t),
            None => write!(f, "GatewayMessage(t={})", self.t),
        }
    }
}
