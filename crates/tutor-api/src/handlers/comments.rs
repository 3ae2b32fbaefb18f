//! Comment handlers
//!
//! Nested comment threads on content resources, soft deletion, and
//! moderation.

use axum::{
    extract::{Path, State},
    Json,
};
use tutor_service::dto::{CommentResponse, PostCommentRequest};
use tutor_service::CommentService;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// List comments on a resource
///
/// GET /resources/{resource_id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(resource_id): Path<String>,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let resource_id = resource_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid resource_id format"))?;

    let service = CommentService::new(state.service_context());
    let comments = state.protect_store(service.list_comments(resource_id)).await?;
    Ok(Json(comments))
}

/// Post a comment
///
/// POST /resources/{resource_id}/comments
pub async fn post_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(resource_id): Path<String>,
    ValidatedJson(request): ValidatedJson<PostCommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let resource_id = resource_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid resource_id format"))?;

    let service = CommentService::new(state.service_context());
    let comment = state
        .protect_store(service.post_comment(resource_id, auth.user_id(), request))
        .await?;
    Ok(Created(Json(comment)))
}

/// Soft delete a comment
///
/// DELETE /comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(comment_id): Path<String>,
) -> ApiResult<NoContent> {
    let comment_id = comment_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid comment_id format"))?;

    let service = CommentService::new(state.service_context());
    state
        .protect_store(service.delete_comment(comment_id, &auth.principal))
        .await?;
    Ok(NoContent)
}

/// Approve a comment
///
/// POST /comments/{comment_id}/approve
pub async fn approve_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(comment_id): Path<String>,
) -> ApiResult<NoContent> {
    let comment_id = comment_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid comment_id format"))?;

    let service = CommentService::new(state.service_context());
    state
        .protect_store(service.approve_comment(comment_id, &auth.principal))
        .await?;
    Ok(NoContent)
}

/// Withdraw approval from a comment
///
/// POST /comments/{comment_id}/disapprove
pub async fn disapprove_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(comment_id): Path<String>,
) -> ApiResult<NoContent> {
    let comment_id = comment_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid comment_id format"))?;

    let service = CommentService::new(state.service_context());
    state
        .protect_store(service.disapprove_comment(comment_id, &auth.principal))
        .await?;
    Ok(NoContent)
}
