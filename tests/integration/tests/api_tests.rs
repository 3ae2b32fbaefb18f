//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variable: DATABASE_URL
//!
//! Run with: cargo test -p integration-tests --test api_tests

use chrono::{Duration, Utc};
use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, test_config, TestServer,
};
use reqwest::StatusCode;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_missing_auth() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/v1/rooms").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_unknown_token() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get_auth("/api/v1/rooms", "not-a-real-token").await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: ErrorResponse = response.json().await.unwrap();
    assert_eq!(body.code, "AUTHENTICATION_FAILED");
}

#[tokio::test]
async fn test_inactive_principal() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = seed_inactive_user(&server.pool).await.unwrap();

    let response = server.get_auth("/api/v1/rooms", &user.token).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Room Tests
// ============================================================================

#[tokio::test]
async fn test_create_direct_room() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = seed_user(&server.pool, "student").await.unwrap();
    let bob = seed_user(&server.pool, "tutor").await.unwrap();

    let request = CreateRoomRequest::direct(&bob);
    let response = server
        .post_auth("/api/v1/rooms", &alice.token, &request)
        .await
        .unwrap();
    let room: RoomResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(room.kind, "direct");

    // Both participants see the room
    let response = server.get_auth("/api/v1/rooms", &bob.token).await.unwrap();
    let rooms: Vec<RoomResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(rooms.iter().any(|r| r.id == room.id));
}

#[tokio::test]
async fn test_get_room_requires_membership() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = seed_user(&server.pool, "student").await.unwrap();
    let bob = seed_user(&server.pool, "student").await.unwrap();
    let outsider = seed_user(&server.pool, "student").await.unwrap();

    let request = CreateRoomRequest::direct(&bob);
    let response = server
        .post_auth("/api/v1/rooms", &alice.token, &request)
        .await
        .unwrap();
    let room: RoomResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .get_auth(&format!("/api/v1/rooms/{}", room.id), &outsider.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Provisioning Tests
// ============================================================================

#[tokio::test]
async fn test_enrollment_provisions_forums() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let student = seed_user(&server.pool, "student").await.unwrap();
    let teacher = seed_user(&server.pool, "teacher").await.unwrap();
    let tutor = seed_user(&server.pool, "tutor").await.unwrap();
    let subject_id = teacher.id + 500_000;
    seed_subject_teacher(&server.pool, subject_id, teacher.id)
        .await
        .unwrap();

    let request = EnrollmentCreatedRequest {
        student_id: student.id_string(),
        subject_id: subject_id.to_string(),
        tutor_id: Some(tutor.id_string()),
    };
    let response = server
        .post_auth("/api/v1/events/enrollments", &student.token, &request)
        .await
        .unwrap();
    let provisioned: ProvisionedRoomsResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(provisioned.rooms.len(), 2);
    assert!(provisioned.rooms.iter().any(|r| r.kind == "subject_forum"));
    assert!(provisioned.rooms.iter().any(|r| r.kind == "tutor_forum"));

    // The teacher landed in the subject forum
    let response = server.get_auth("/api/v1/rooms", &teacher.token).await.unwrap();
    let rooms: Vec<RoomResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(rooms.iter().any(|r| r.kind == "subject_forum"));
}

#[tokio::test]
async fn test_enrollment_replay_is_idempotent() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let student = seed_user(&server.pool, "student").await.unwrap();
    let subject_id = student.id + 600_000;

    let request = EnrollmentCreatedRequest {
        student_id: student.id_string(),
        subject_id: subject_id.to_string(),
        tutor_id: None,
    };

    let response = server
        .post_auth("/api/v1/events/enrollments", &student.token, &request)
        .await
        .unwrap();
    let first: ProvisionedRoomsResponse = assert_json(response, StatusCode::OK).await.unwrap();

    // Redelivery of the same event
    let response = server
        .post_auth("/api/v1/events/enrollments", &student.token, &request)
        .await
        .unwrap();
    let second: ProvisionedRoomsResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(first.rooms.len(), 1);
    assert_eq!(second.rooms.len(), 1);
    assert_eq!(first.rooms[0].id, second.rooms[0].id);
}

// ============================================================================
// Message Tests
// ============================================================================

async fn direct_room(server: &TestServer, a: &SeededUser, b: &SeededUser) -> RoomResponse {
    let request = CreateRoomRequest::direct(b);
    let response = server
        .post_auth("/api/v1/rooms", &a.token, &request)
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

#[tokio::test]
async fn test_post_and_list_messages() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = seed_user(&server.pool, "student").await.unwrap();
    let bob = seed_user(&server.pool, "tutor").await.unwrap();
    let room = direct_room(&server, &alice, &bob).await;

    let request = PostMessageRequest::simple("Hello there");
    let response = server
        .post_auth(
            &format!("/api/v1/rooms/{}/messages", room.id),
            &alice.token,
            &request,
        )
        .await
        .unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(message.content, "Hello there");
    assert_eq!(message.room_id, room.id);
    assert_eq!(message.sender_id, alice.id_string());

    let reply = PostMessageRequest::reply("Hi back", &message.id);
    let response = server
        .post_auth(
            &format!("/api/v1/rooms/{}/messages", room.id),
            &bob.token,
            &reply,
        )
        .await
        .unwrap();
    let reply_msg: MessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(reply_msg.reply_to_id.as_deref(), Some(message.id.as_str()));

    let response = server
        .get_auth(&format!("/api/v1/rooms/{}/messages", room.id), &bob.token)
        .await
        .unwrap();
    let messages: Vec<MessageResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(messages.len(), 2);
}

#[tokio::test]
async fn test_post_message_requires_membership() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = seed_user(&server.pool, "student").await.unwrap();
    let bob = seed_user(&server.pool, "student").await.unwrap();
    let outsider = seed_user(&server.pool, "student").await.unwrap();
    let room = direct_room(&server, &alice, &bob).await;

    let request = PostMessageRequest::simple("I should not be here");
    let response = server
        .post_auth(
            &format!("/api/v1/rooms/{}/messages", room.id),
            &outsider.token,
            &request,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Read Tracking Tests
// ============================================================================

#[tokio::test]
async fn test_unread_count_and_mark_read() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = seed_user(&server.pool, "student").await.unwrap();
    let bob = seed_user(&server.pool, "tutor").await.unwrap();
    let room = direct_room(&server, &alice, &bob).await;

    for i in 0..3 {
        let request = PostMessageRequest::simple(&format!("Message {}", i));
        server
            .post_auth(
                &format!("/api/v1/rooms/{}/messages", room.id),
                &alice.token,
                &request,
            )
            .await
            .unwrap();
    }

    // Bob has never read the room
    let response = server
        .get_auth(&format!("/api/v1/rooms/{}/unread", room.id), &bob.token)
        .await
        .unwrap();
    let unread: UnreadCountResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(unread.unread_count, 3);

    // Acknowledge everything
    let request = MarkReadRequest { at: Utc::now() };
    let response = server
        .post_auth(
            &format!("/api/v1/rooms/{}/read", room.id),
            &bob.token,
            &request,
        )
        .await
        .unwrap();
    let marker: ReadMarkerResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth(&format!("/api/v1/rooms/{}/unread", room.id), &bob.token)
        .await
        .unwrap();
    let unread: UnreadCountResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(unread.unread_count, 0);

    // A stale acknowledgement never moves the marker backwards
    let request = MarkReadRequest {
        at: Utc::now() - Duration::hours(1),
    };
    let response = server
        .post_auth(
            &format!("/api/v1/rooms/{}/read", room.id),
            &bob.token,
            &request,
        )
        .await
        .unwrap();
    let stale: ReadMarkerResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(stale.last_read_at, marker.last_read_at);
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_comment_thread() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = seed_user(&server.pool, "student").await.unwrap();
    let resource_id = author.id + 700_000;

    let request = PostCommentRequest::top_level("Great explanation");
    let response = server
        .post_auth(
            &format!("/api/v1/resources/{}/comments", resource_id),
            &author.token,
            &request,
        )
        .await
        .unwrap();
    let top: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(top.depth, 1);
    assert!(!top.is_approved);

    let request = PostCommentRequest::reply("Agreed", &top.id);
    let response = server
        .post_auth(
            &format!("/api/v1/resources/{}/comments", resource_id),
            &author.token,
            &request,
        )
        .await
        .unwrap();
    let reply: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(reply.depth, 2);
    assert_eq!(reply.parent_comment_id.as_deref(), Some(top.id.as_str()));

    let response = server
        .get_auth(
            &format!("/api/v1/resources/{}/comments", resource_id),
            &author.token,
        )
        .await
        .unwrap();
    let comments: Vec<CommentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(comments.len(), 2);
    let listed_top = comments.iter().find(|c| c.id == top.id).unwrap();
    assert_eq!(listed_top.reply_count, 1);
}

#[tokio::test]
async fn test_delete_comment_keeps_thread_shape() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = seed_user(&server.pool, "student").await.unwrap();
    let resource_id = author.id + 800_000;

    let request = PostCommentRequest::top_level("To be removed");
    let response = server
        .post_auth(
            &format!("/api/v1/resources/{}/comments", resource_id),
            &author.token,
            &request,
        )
        .await
        .unwrap();
    let comment: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .delete_auth(&format!("/api/v1/comments/{}", comment.id), &author.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // The row keeps its place with content hidden
    let response = server
        .get_auth(
            &format!("/api/v1/resources/{}/comments", resource_id),
            &author.token,
        )
        .await
        .unwrap();
    let comments: Vec<CommentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let deleted = comments.iter().find(|c| c.id == comment.id).unwrap();
    assert!(deleted.is_deleted);
    assert_ne!(deleted.content, "To be removed");
}

#[tokio::test]
async fn test_moderation_requires_moderator() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = seed_user(&server.pool, "student").await.unwrap();
    let moderator = seed_user(&server.pool, "moderator").await.unwrap();
    let resource_id = author.id + 900_000;

    let request = PostCommentRequest::top_level("Needs review");
    let response = server
        .post_auth(
            &format!("/api/v1/resources/{}/comments", resource_id),
            &author.token,
            &request,
        )
        .await
        .unwrap();
    let comment: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // A student cannot moderate, not even their own comment
    let response = server
        .post_auth_empty(
            &format!("/api/v1/comments/{}/approve", comment.id),
            &author.token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .post_auth_empty(
            &format!("/api/v1/comments/{}/approve", comment.id),
            &moderator.token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get_auth(
            &format!("/api/v1/resources/{}/comments", resource_id),
            &author.token,
        )
        .await
        .unwrap();
    let comments: Vec<CommentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(comments.iter().find(|c| c.id == comment.id).unwrap().is_approved);

    let response = server
        .post_auth_empty(
            &format!("/api/v1/comments/{}/disapprove", comment.id),
            &moderator.token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

// ============================================================================
// Protection Pipeline Tests
// ============================================================================

#[tokio::test]
async fn test_unsupported_version_rejected() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/v2/rooms").await.unwrap();
    let status = response.status();
    let body: ErrorResponse = response.json().await.unwrap();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.code, "UNSUPPORTED_VERSION");
}

#[tokio::test]
async fn test_rate_limit_returns_retry_after() {
    if !check_test_env() {
        return;
    }

    let mut config = test_config().unwrap();
    config.rate_limit.requests = 3;
    config.rate_limit.period_secs = 60;

    let server = TestServer::start_with_config(config)
        .await
        .expect("Failed to start server");

    for _ in 0..3 {
        let response = server.get("/api/v1/rooms").await.unwrap();
        // Unauthorized, but inside the budget
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let response = server.get("/api/v1/rooms").await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key("retry-after"));

    // Health bypasses the limiter
    let response = server.get("/health").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unsupported_media_type_rejected() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = seed_user(&server.pool, "student").await.unwrap();

    let response = server
        .client
        .post(format!("{}/api/v1/rooms", server.base_url()))
        .header("Authorization", format!("Bearer {}", user.token))
        .header("Content-Type", "text/plain")
        .body("kind=direct")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_request_id_on_every_response() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/health").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));

    // Rejections carry one too
    let response = server.get("/api/v1/rooms").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}
