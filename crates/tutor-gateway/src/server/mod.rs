//! Gateway server
//!
//! WebSocket route, connection authentication, and shared state.

mod auth;
mod handler;
mod routes;
mod state;

pub use auth::extract_token;
pub use handler::room_socket_handler;
pub use routes::gateway_router;
pub use state::GatewayState;
