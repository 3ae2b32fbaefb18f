//! # tutor-gateway
//!
//! WebSocket gateway: authenticates connections, joins them to a room,
//! and fans room events out to live connections.

pub mod connection;
pub mod fanout;
pub mod protocol;
pub mod server;

pub use connection::{Connection, ConnectionManager};
pub use fanout::RoomFanout;
pub use protocol::{CloseCode, GatewayMessage};
pub use server::{gateway_router, GatewayState};
