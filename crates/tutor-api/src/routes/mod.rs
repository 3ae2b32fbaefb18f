//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers::{comments, events, health, messages, rooms};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(room_routes())
        .merge(comment_routes())
        .merge(event_routes())
}

/// Room and message routes
fn room_routes() -> Router<AppState> {
    Router::new()
        // Room CRUD
        .route("/rooms", get(rooms::list_rooms))
        .route("/rooms", post(rooms::create_room))
        .route("/rooms/:room_id", get(rooms::get_room))
        // Room messages
        .route("/rooms/:room_id/messages", get(messages::list_messages))
        .route("/rooms/:room_id/messages", post(messages::post_message))
        // Read tracking
        .route("/rooms/:room_id/read", post(messages::mark_read))
        .route("/rooms/:room_id/unread", get(messages::unread_count))
}

/// Comment routes
fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/resources/:resource_id/comments", get(comments::list_comments))
        .route("/resources/:resource_id/comments", post(comments::post_comment))
        .route("/comments/:comment_id", delete(comments::delete_comment))
        .route("/comments/:comment_id/approve", post(comments::approve_comment))
        .route("/comments/:comment_id/disapprove", post(comments::disapprove_comment))
}

/// Inbound domain event routes
fn event_routes() -> Router<AppState> {
    Router::new().route("/events/enrollments", post(events::enrollment_created))
}
