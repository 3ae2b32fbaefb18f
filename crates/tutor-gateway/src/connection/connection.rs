//! Individual WebSocket connection
//!
//! A connection is registered only after authentication and the room join
//! succeed, so its identity and room are fixed for its lifetime.

use crate::protocol::GatewayMessage;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tutor_core::Snowflake;

/// A single joined WebSocket connection
pub struct Connection {
    /// Unique session ID
    session_id: String,

    /// Authenticated user
    user_id: Snowflake,

    /// Room this connection is joined to
    room_id: Snowflake,

    /// Channel to send frames to the WebSocket
    sender: mpsc::Sender<GatewayMessage>,

    /// Last sequence number sent
    sequence: AtomicU64,

    /// Connection creation time
    created_at: Instant,
}

impl Connection {
    /// Create a new connection
    pub fn new(
        session_id: String,
        user_id: Snowflake,
        room_id: Snowflake,
        sender: mpsc::Sender<GatewayMessage>,
    ) -> Arc<Self> {
        Arc::new(Self {
            session_id,
            user_id,
            room_id,
            sender,
            sequence: AtomicU64::new(0),
            created_at: Instant::now(),
        })
    }

    /// Get the session ID
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Get the user ID
    pub fn user_id(&self) -> Snowflake {
        self.user_id
    }

    /// Get the joined room ID
    pub fn room_id(&self) -> Snowflake {
        self.room_id
    }

    /// Get the next sequence number
    pub fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Get the current sequence number
    pub fn current_sequence(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }

    /// Get connection age
    pub fn age(&self) -> std::time::Duration {
        self.created_at.elapsed()
    }

    /// Send a frame to this connection
    pub async fn send(
        &self,
        message: GatewayMessage,
    ) -> Result<(), mpsc::error::SendError<GatewayMessage>> {
        self.sender.send(message).await
    }

    /// Try to send a frame (non-blocking)
    pub fn try_send(
        &self,
        message: GatewayMessage,
    ) -> Result<(), mpsc::error::TrySendError<GatewayMessage>> {
        self.sender.try_send(message)
    }

    /// Check if the sender channel is closed
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("session_id", &self.session_id)
            .field("user_id", &self.user_id)
            .field("room_id", &self.room_id)
            .field("sequence", &self.sequence.load(Ordering::SeqCst))
            .finish()
    }
}
