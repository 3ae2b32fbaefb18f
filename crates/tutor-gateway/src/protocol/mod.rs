//! Gateway wire protocol
//!
//! Close codes and the frame format sent to connected clients.

mod close_codes;
mod messages;

pub use close_codes::CloseCode;
pub use messages::{GatewayMessage, ReadyPayload};
