//! Message handlers
//!
//! Posting, listing, read tracking, and unread counts.

use axum::{
    extract::{Path, State},
    Json,
};
use tutor_service::dto::{
    MarkReadRequest, MessageResponse, PostMessageRequest, ReadMarkerResponse, UnreadCountResponse,
};
use tutor_service::MessageService;

use crate::extractors::{AuthUser, Pagination, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

/// List messages in a room
///
/// GET /rooms/{room_id}/messages
pub async fn list_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(room_id): Path<String>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<MessageResponse>>> {
    let room_id = room_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid room_id format"))?;

    let service = MessageService::new(state.service_context());
    let messages = state
        .protect_store(service.list_messages(
            room_id,
            auth.user_id(),
            pagination.before,
            pagination.after,
            pagination.limit,
        ))
        .await?;
    Ok(Json(messages))
}

/// Post a message
///
/// POST /rooms/{room_id}/messages
pub async fn post_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(room_id): Path<String>,
    ValidatedJson(request): ValidatedJson<PostMessageRequest>,
) -> ApiResult<Created<Json<MessageResponse>>> {
    let room_id = room_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid room_id format"))?;

    let service = MessageService::new(state.service_context());
    let message = state
        .protect_store(service.post_message(room_id, auth.user_id(), request))
        .await?;
    Ok(Created(Json(message)))
}

/// Acknowledge reads up to a timestamp
///
/// POST /rooms/{room_id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(room_id): Path<String>,
    ValidatedJson(request): ValidatedJson<MarkReadRequest>,
) -> ApiResult<Json<ReadMarkerResponse>> {
    let room_id = room_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid room_id format"))?;

    let service = MessageService::new(state.service_context());
    let marker = state
        .protect_store(service.mark_read(room_id, auth.user_id(), request))
        .await?;
    Ok(Json(marker))
}

/// Live unread count
///
/// GET /rooms/{room_id}/unread
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(room_id): Path<String>,
) -> ApiResult<Json<UnreadCountResponse>> {
    let room_id = room_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid room_id format"))?;

    let service = MessageService::new(state.service_context());
    let count = state
        .protect_store(service.unread_count(room_id, auth.user_id()))
        .await?;
    Ok(Json(count))
}
