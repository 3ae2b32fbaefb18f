//! Gateway routes

use crate::server::{handler::room_socket_handler, GatewayState};
use axum::{routing::get, Router};

/// Build the gateway router
///
/// Mounted by the API server alongside the HTTP routes; the WebSocket
/// path sits outside the HTTP protection pipeline because rejection is
/// expressed through close codes, not HTTP statuses.
pub fn gateway_router(state: GatewayState) -> Router {
    Router::new()
        .route("/ws/rooms/:room_id", get(room_socket_handler))
        .with_state(state)
}
