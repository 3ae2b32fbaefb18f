//! Room handlers

use axum::{
    extract::{Path, State},
    Json,
};
use tutor_service::dto::{CreateRoomRequest, RoomResponse};
use tutor_service::RoomService;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

/// List the caller's rooms with unread counts
///
/// GET /rooms
pub async fn list_rooms(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<RoomResponse>>> {
    let service = RoomService::new(state.service_context());
    let rooms = state.protect_store(service.list_rooms(auth.user_id())).await?;
    Ok(Json(rooms))
}

/// Create a Direct or General room
///
/// POST /rooms
pub async fn create_room(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateRoomRequest>,
) -> ApiResult<Created<Json<RoomResponse>>> {
    let service = RoomService::new(state.service_context());
    let room = state
        .protect_store(service.create_room(auth.user_id(), request))
        .await?;
    Ok(Created(Json(room)))
}

/// Get one room
///
/// GET /rooms/{room_id}
pub async fn get_room(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(room_id): Path<String>,
) -> ApiResult<Json<RoomResponse>> {
    let room_id = room_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid room_id format"))?;

    let service = RoomService::new(state.service_context());
    let room = state
        .protect_store(service.get_room(room_id, auth.user_id()))
        .await?;
    Ok(Json(room))
}
