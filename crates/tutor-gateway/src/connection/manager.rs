//! Connection manager
//!
//! Tracks all live connections with per-room and per-user indexes so the
//! fan-out can enumerate a room and the queue path can check liveness.

use super::Connection;
use crate::protocol::GatewayMessage;
use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;
use tutor_core::Snowflake;

/// Manages all active WebSocket connections
#[derive(Default)]
pub struct ConnectionManager {
    /// All connections by session ID
    connections: DashMap<String, Arc<Connection>>,

    /// Session IDs joined to each room
    rooms: DashMap<Snowflake, HashSet<String>>,

    /// Session IDs held by each user
    users: DashMap<Snowflake, HashSet<String>>,
}

impl ConnectionManager {
    /// Create a new connection manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection that has authenticated and joined a room
    pub fn add_connection(
        &self,
        session_id: String,
        user_id: Snowflake,
        room_id: Snowflake,
        sender: mpsc::Sender<GatewayMessage>,
    ) -> Arc<Connection> {
        let connection = Connection::new(session_id.clone(), user_id, room_id, sender);

        self.rooms
            .entry(room_id)
            .or_default()
            .insert(session_id.clone());
        self.users
            .entry(user_id)
            .or_default()
            .insert(session_id.clone());
        self.connections.insert(session_id, connection.clone());

        connection
    }

    /// Remove a connection and clean up its index entries
    pub fn remove_connection(&self, session_id: &str) -> Option<Arc<Connection>> {
        let (_, connection) = self.connections.remove(session_id)?;

        self.rooms.alter(&connection.room_id(), |_, mut sessions| {
            sessions.remove(session_id);
            sessions
        });
        self.rooms
            .remove_if(&connection.room_id(), |_, sessions| sessions.is_empty());

        self.users.alter(&connection.user_id(), |_, mut sessions| {
            sessions.remove(session_id);
            sessions
        });
        self.users
            .remove_if(&connection.user_id(), |_, sessions| sessions.is_empty());

        Some(connection)
    }

    /// Get a connection by session ID
    pub fn get_connection(&self, session_id: &str) -> Option<Arc<Connection>> {
        self.connections.get(session_id).map(|c| c.clone())
    }

    /// Get all connections joined to a room
    pub fn room_connections(&self, room_id: Snowflake) -> Vec<Arc<Connection>> {
        let Some(sessions) = self.rooms.get(&room_id) else {
            return Vec::new();
        };
        sessions
            .iter()
            .filter_map(|session_id| self.get_connection(session_id))
            .collect()
    }

    /// Check whether a user has a live connection joined to a room
    pub fn is_joined(&self, room_id: Snowflake, user_id: Snowflake) -> bool {
        self.room_connections(room_id)
            .iter()
            .any(|c| c.user_id() == user_id)
    }

    /// Total number of live connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Number of rooms with at least one live connection
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("connections", &self.connections.len())
            .field("rooms", &self.rooms.len())
            .finish()
    }
}
