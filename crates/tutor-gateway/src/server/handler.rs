//! WebSocket handler
//!
//! Authenticates the upgrade request and joins the connection to its room.
//! The decision is made before the upgrade completes: a rejected peer
//! receives a single close frame carrying 4001 or 4003 and no other
//! payload.

use crate::protocol::{CloseCode, GatewayMessage};
use crate::server::auth::extract_token;
use crate::server::GatewayState;
use axum::{
    extract::{
        ws::{CloseFrame, Message, WebSocket},
        Path, Query, State, WebSocketUpgrade,
    },
    response::{IntoResponse, Response},
};
use futures_util::{SinkExt, StreamExt};
use std::collections::HashMap;
use tracing::{debug, info, warn};
use tutor_core::value_objects::Principal;
use tutor_core::Snowflake;
use tutor_service::RoomService;
use uuid::Uuid;

/// Channel buffer size for outgoing frames
const MESSAGE_BUFFER_SIZE: usize = 100;

/// WebSocket gateway handler for a single room
pub async fn room_socket_handler(
    State(state): State<GatewayState>,
    Path(room_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    ws: WebSocketUpgrade,
) -> Response {
    match authorize(&state, &room_id, &params).await {
        Ok((principal, room_id)) => ws
            .on_upgrade(move |socket| run_socket(state, socket, room_id, principal))
            .into_response(),
        Err(code) => ws
            .on_upgrade(move |socket| reject_socket(socket, code))
            .into_response(),
    }
}

/// Decide whether the upgrade request may join the room
///
/// Authentication is decided before anything about the target room, so a
/// token-less request always closes 4001 even when the path is malformed.
async fn authorize(
    state: &GatewayState,
    raw_room_id: &str,
    params: &HashMap<String, String>,
) -> Result<(Principal, Snowflake), CloseCode> {
    let Some(token) = extract_token(params) else {
        debug!("Upgrade request without token");
        return Err(CloseCode::AuthenticationFailed);
    };

    let principal = match state.context().token_validator().validate(&token).await {
        Ok(Some(principal)) if principal.active => principal,
        Ok(Some(principal)) => {
            debug!(user_id = %principal.id, "Inactive principal rejected");
            return Err(CloseCode::AuthenticationFailed);
        }
        Ok(None) => {
            debug!("Unknown token rejected");
            return Err(CloseCode::AuthenticationFailed);
        }
        Err(e) => {
            warn!(error = %e, "Token validation failed");
            return Err(CloseCode::AuthenticationFailed);
        }
    };

    let Ok(room_id) = Snowflake::parse(raw_room_id) else {
        debug!(user_id = %principal.id, raw_room_id, "Malformed room id rejected");
        return Err(CloseCode::Forbidden);
    };

    if let Err(e) = RoomService::new(state.context())
        .ensure_joinable(room_id, &principal)
        .await
    {
        debug!(room_id = %room_id, user_id = %principal.id, error = %e, "Join refused");
        return Err(CloseCode::Forbidden);
    }

    Ok((principal, room_id))
}

/// Close a rejected socket with its code and nothing else
async fn reject_socket(mut socket: WebSocket, code: CloseCode) {
    let frame = CloseFrame {
        code: code.as_u16(),
        reason: code.description().into(),
    };
    let _ = socket.send(Message::Close(Some(frame))).await;
    info!(close_code = %code, "WebSocket connection rejected");
}

/// Run an accepted connection until either side disconnects
async fn run_socket(
    state: GatewayState,
    socket: WebSocket,
    room_id: Snowflake,
    principal: Principal,
) {
    let session_id = Uuid::new_v4().to_string();
    let (tx, mut rx) = tokio::sync::mpsc::channel::<GatewayMessage>(MESSAGE_BUFFER_SIZE);

    let connection =
        state
            .connection_manager()
            .add_connection(session_id.clone(), principal.id, room_id, tx);

    info!(
        session_id = %session_id,
        user_id = %principal.id,
        room_id = %room_id,
        "WebSocket connection joined"
    );

    let (mut ws_sink, mut ws_stream) = socket.split();

    // Confirm the join before any room events flow
    let ready = GatewayMessage::ready(&session_id, room_id, principal.id);
    match ready.to_json() {
        Ok(json) => {
            if ws_sink.send(Message::Text(json)).await.is_err() {
                warn!(session_id = %session_id, "Failed to send Ready frame");
                cleanup_connection(&state, &session_id);
                return;
            }
        }
        Err(e) => {
            warn!(session_id = %session_id, error = %e, "Failed to serialize Ready frame");
            cleanup_connection(&state, &session_id);
            return;
        }
    }

    let session_id_send = session_id.clone();

    // Forward frames from the fan-out to the WebSocket
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Ok(json) = msg.to_json() {
                if ws_sink.send(Message::Text(json)).await.is_err() {
                    debug!(
                        session_id = %session_id_send,
                        "Failed to send frame to WebSocket"
                    );
                    break;
                }
            }
        }

        let _ = ws_sink.close().await;
    });

    let session_id_recv = session_id.clone();

    // Drain the client side; the gateway is push-only, so inbound frames
    // other than Close are ignored
    let recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_stream.next().await {
            match msg {
                Ok(Message::Close(_)) => {
                    info!(session_id = %session_id_recv, "Client closed connection");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    debug!(session_id = %session_id_recv, error = %e, "WebSocket error");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = send_task => {
            debug!(session_id = %session_id, "Send task ended");
        }
        _ = recv_task => {
            debug!(session_id = %session_id, "Receive task ended");
        }
    }

    drop(connection);
    cleanup_connection(&state, &session_id);
}

/// Deregister a connection on disconnect
fn cleanup_connection(state: &GatewayState, session_id: &str) {
    if state.connection_manager().remove_connection(session_id).is_some() {
        info!(session_id = %session_id, "WebSocket connection closed");
    }
}
