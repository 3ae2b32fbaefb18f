//! Connection management
//!
//! Tracks live WebSocket connections and their room membership.

mod connection;
mod manager;

pub use connection::Connection;
pub use manager::ConnectionManager;
