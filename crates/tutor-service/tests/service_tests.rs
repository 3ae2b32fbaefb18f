//! Service layer tests against in-memory repositories
//!
//! These exercise the business rules without a database: idempotent
//! provisioning, read-marker monotonicity, the comment depth cap, and the
//! delivery fan-out contract.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

use tutor_core::entities::{Comment, Message, Participant, Room, RoomKind};
use tutor_core::traits::{
    CommentRepository, MessageQuery, MessageRepository, ParticipantRepository, RepoResult,
    RoomEventSink, RoomRepository, RosterRepository, TokenValidator,
};
use tutor_core::value_objects::{Principal, Role, Snowflake, SnowflakeGenerator};
use tutor_core::{DomainError, RoomEvent};

use tutor_service::dto::{
    CreateRoomRequest, MarkReadRequest, PostCommentRequest, PostMessageRequest,
};
use tutor_service::{
    CommentService, MessageService, ProvisioningService, RoomService, ServiceContext,
    ServiceContextBuilder,
};

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Default)]
struct InMemoryStore {
    rooms: Mutex<Vec<Room>>,
    participants: Mutex<Vec<Participant>>,
    messages: Mutex<Vec<Message>>,
    comments: Mutex<Vec<Comment>>,
    rosters: Mutex<HashMap<Snowflake, Vec<Snowflake>>>,
    tokens: Mutex<HashMap<String, Principal>>,
}

#[async_trait]
impl RoomRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Room>> {
        Ok(self.rooms.lock().iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Room>> {
        let member_of: Vec<Snowflake> = self
            .participants
            .lock()
            .iter()
            .filter(|p| p.user_id == user_id)
            .map(|p| p.room_id)
            .collect();
        Ok(self
            .rooms
            .lock()
            .iter()
            .filter(|r| member_of.contains(&r.id))
            .cloned()
            .collect())
    }

    async fn create(&self, room: &Room) -> RepoResult<()> {
        self.rooms.lock().push(room.clone());
        Ok(())
    }

    async fn upsert_subject_forum(
        &self,
        candidate_id: Snowflake,
        student_id: Snowflake,
        subject_id: Snowflake,
    ) -> RepoResult<(Room, bool)> {
        let mut rooms = self.rooms.lock();
        if let Some(existing) = rooms.iter().find(|r| {
            r.kind == RoomKind::SubjectForum
                && r.student_id == Some(student_id)
                && r.subject_id == Some(subject_id)
        }) {
            return Ok((existing.clone(), false));
        }
        let room = Room::subject_forum(candidate_id, student_id, subject_id);
        rooms.push(room.clone());
        Ok((room, true))
    }

    async fn upsert_tutor_forum(
        &self,
        candidate_id: Snowflake,
        student_id: Snowflake,
        tutor_id: Snowflake,
    ) -> RepoResult<(Room, bool)> {
        let mut rooms = self.rooms.lock();
        if let Some(existing) = rooms.iter().find(|r| {
            r.kind == RoomKind::TutorForum
                && r.student_id == Some(student_id)
                && r.tutor_id == Some(tutor_id)
        }) {
            return Ok((existing.clone(), false));
        }
        let room = Room::tutor_forum(candidate_id, student_id, tutor_id);
        rooms.push(room.clone());
        Ok((room, true))
    }
}

#[async_trait]
impl ParticipantRepository for InMemoryStore {
    async fn find(&self, room_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<Participant>> {
        Ok(self
            .participants
            .lock()
            .iter()
            .find(|p| p.room_id == room_id && p.user_id == user_id)
            .cloned())
    }

    async fn find_by_room(&self, room_id: Snowflake) -> RepoResult<Vec<Participant>> {
        Ok(self
            .participants
            .lock()
            .iter()
            .filter(|p| p.room_id == room_id)
            .cloned()
            .collect())
    }

    async fn upsert(&self, room_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        let mut participants = self.participants.lock();
        if participants
            .iter()
            .any(|p| p.room_id == room_id && p.user_id == user_id)
        {
            return Ok(false);
        }
        participants.push(Participant::new(room_id, user_id));
        Ok(true)
    }

    async fn advance_last_read(
        &self,
        room_id: Snowflake,
        user_id: Snowflake,
        at: DateTime<Utc>,
    ) -> RepoResult<DateTime<Utc>> {
        let mut participants = self.participants.lock();
        let participant = participants
            .iter_mut()
            .find(|p| p.room_id == room_id && p.user_id == user_id)
            .ok_or(DomainError::NotParticipant { room_id, user_id })?;
        Ok(participant.advance_last_read(at))
    }
}

#[async_trait]
impl MessageRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>> {
        Ok(self.messages.lock().iter().find(|m| m.id == id).cloned())
    }

    async fn find_by_room(&self, room_id: Snowflake, query: MessageQuery) -> RepoResult<Vec<Message>> {
        let mut messages: Vec<Message> = self
            .messages
            .lock()
            .iter()
            .filter(|m| m.room_id == room_id)
            .filter(|m| query.before.is_none_or(|b| m.id < b))
            .filter(|m| query.after.is_none_or(|a| m.id > a))
            .cloned()
            .collect();
        messages.sort_by_key(|m| std::cmp::Reverse(m.id));
        messages.truncate(usize::try_from(query.limit.max(0)).unwrap_or(0));
        Ok(messages)
    }

    async fn create(&self, message: &Message) -> RepoResult<()> {
        self.messages.lock().push(message.clone());
        // Same unit of work as the insert in the real store
        let mut participants = self.participants.lock();
        if let Some(sender) = participants
            .iter_mut()
            .find(|p| p.room_id == message.room_id && p.user_id == message.sender_id)
        {
            sender.advance_last_read(message.created_at);
        }
        Ok(())
    }

    async fn unread_count(&self, room_id: Snowflake, user_id: Snowflake) -> RepoResult<i64> {
        let marker = self
            .participants
            .lock()
            .iter()
            .find(|p| p.room_id == room_id && p.user_id == user_id)
            .and_then(|p| p.last_read_at);
        let count = self
            .messages
            .lock()
            .iter()
            .filter(|m| m.room_id == room_id && m.sender_id != user_id)
            .filter(|m| marker.is_none_or(|at| m.created_at > at))
            .count();
        Ok(count as i64)
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        Ok(self.comments.lock().iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_resource(&self, resource_id: Snowflake) -> RepoResult<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .comments
            .lock()
            .iter()
            .filter(|c| c.resource_id == resource_id)
            .cloned()
            .collect();
        comments.sort_by_key(|c| c.id);
        Ok(comments)
    }

    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        self.comments.lock().push(comment.clone());
        Ok(())
    }

    async fn soft_delete(&self, id: Snowflake, at: DateTime<Utc>) -> RepoResult<()> {
        let mut comments = self.comments.lock();
        let comment = comments
            .iter_mut()
            .find(|c| c.id == id && !c.is_deleted)
            .ok_or(DomainError::CommentNotFound(id))?;
        comment.is_deleted = true;
        comment.deleted_at = Some(at);
        Ok(())
    }

    async fn set_approved(&self, id: Snowflake, approved: bool) -> RepoResult<()> {
        let mut comments = self.comments.lock();
        let comment = comments
            .iter_mut()
            .find(|c| c.id == id && !c.is_deleted)
            .ok_or(DomainError::CommentNotFound(id))?;
        comment.is_approved = approved;
        Ok(())
    }

    async fn reply_counts(&self, resource_id: Snowflake) -> RepoResult<Vec<(Snowflake, i64)>> {
        let comments = self.comments.lock();
        let mut counts: HashMap<Snowflake, i64> = HashMap::new();
        for comment in comments.iter().filter(|c| c.resource_id == resource_id) {
            if let Some(parent) = comment.parent_comment_id {
                *counts.entry(parent).or_insert(0) += 1;
            }
        }
        Ok(counts.into_iter().collect())
    }
}

#[async_trait]
impl RosterRepository for InMemoryStore {
    async fn active_teachers(&self, subject_id: Snowflake) -> RepoResult<Vec<Snowflake>> {
        Ok(self.rosters.lock().get(&subject_id).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl TokenValidator for InMemoryStore {
    async fn validate(&self, token: &str) -> Result<Option<Principal>, DomainError> {
        Ok(self.tokens.lock().get(token).cloned())
    }
}

/// Sink that records every publish call
#[derive(Default)]
struct RecordingSink {
    published: Mutex<Vec<(Snowflake, Vec<Snowflake>, RoomEvent)>>,
}

#[async_trait]
impl RoomEventSink for RecordingSink {
    async fn publish(&self, room_id: Snowflake, recipients: &[Snowflake], event: RoomEvent) {
        self.published.lock().push((room_id, recipients.to_vec(), event));
    }
}

struct Harness {
    store: Arc<InMemoryStore>,
    sink: Arc<RecordingSink>,
    ctx: ServiceContext,
}

fn harness() -> Harness {
    let store = Arc::new(InMemoryStore::default());
    let sink = Arc::new(RecordingSink::default());
    let ctx = ServiceContextBuilder::new()
        .room_repo(store.clone())
        .participant_repo(store.clone())
        .message_repo(store.clone())
        .comment_repo(store.clone())
        .roster_repo(store.clone())
        .token_validator(store.clone())
        .event_sink(sink.clone())
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
        .build()
        .unwrap();
    Harness { store, sink, ctx }
}

async fn seed_room(h: &Harness, members: &[Snowflake]) -> Snowflake {
    let room = Room::new(h.ctx.generate_id(), RoomKind::General);
    RoomRepository::create(h.store.as_ref(), &room).await.unwrap();
    for user in members {
        ParticipantRepository::upsert(h.store.as_ref(), room.id, *user)
            .await
            .unwrap();
    }
    room.id
}

// ============================================================================
// Messages and read tracking
// ============================================================================

#[tokio::test]
async fn test_unread_count_is_zero_without_messages() {
    let h = harness();
    let user = Snowflake::new(1);
    let room_id = seed_room(&h, &[user]).await;

    let service = MessageService::new(&h.ctx);
    let response = service.unread_count(room_id, user).await.unwrap();
    assert_eq!(response.unread_count, 0);
}

#[tokio::test]
async fn test_post_message_updates_counts_and_publishes() {
    let h = harness();
    let sender = Snowflake::new(1);
    let alice = Snowflake::new(2);
    let bob = Snowflake::new(3);
    let room_id = seed_room(&h, &[sender, alice, bob]).await;

    let service = MessageService::new(&h.ctx);
    let response = service
        .post_message(
            room_id,
            sender,
            PostMessageRequest {
                content: "Hello".to_string(),
                reply_to_id: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(response.content, "Hello");

    // The sender implicitly read their own message; the others did not
    assert_eq!(service.unread_count(room_id, sender).await.unwrap().unread_count, 0);
    assert_eq!(service.unread_count(room_id, alice).await.unwrap().unread_count, 1);
    assert_eq!(service.unread_count(room_id, bob).await.unwrap().unread_count, 1);

    let published = h.sink.published.lock();
    assert_eq!(published.len(), 1);
    let (event_room, recipients, event) = &published[0];
    assert_eq!(*event_room, room_id);
    assert_eq!(event.event_type(), "MESSAGE_CREATED");
    assert!(recipients.contains(&alice) && recipients.contains(&bob));
}

#[tokio::test]
async fn test_post_message_requires_membership() {
    let h = harness();
    let member = Snowflake::new(1);
    let outsider = Snowflake::new(99);
    let room_id = seed_room(&h, &[member]).await;

    let service = MessageService::new(&h.ctx);
    let err = service
        .post_message(
            room_id,
            outsider,
            PostMessageRequest {
                content: "hi".to_string(),
                reply_to_id: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "NOT_PARTICIPANT");
    assert_eq!(err.status_code(), 403);
}

#[tokio::test]
async fn test_reply_must_target_same_room() {
    let h = harness();
    let user = Snowflake::new(1);
    let room_a = seed_room(&h, &[user]).await;
    let room_b = seed_room(&h, &[user]).await;

    let service = MessageService::new(&h.ctx);
    let original = service
        .post_message(
            room_a,
            user,
            PostMessageRequest {
                content: "original".to_string(),
                reply_to_id: None,
            },
        )
        .await
        .unwrap();

    let err = service
        .post_message(
            room_b,
            user,
            PostMessageRequest {
                content: "cross-room reply".to_string(),
                reply_to_id: Some(original.id.clone()),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "INVALID_REPLY");

    let ok = service
        .post_message(
            room_a,
            user,
            PostMessageRequest {
                content: "same-room reply".to_string(),
                reply_to_id: Some(original.id),
            },
        )
        .await
        .unwrap();
    assert!(ok.reply_to_id.is_some());
}

#[tokio::test]
async fn test_mark_read_is_monotonic() {
    let h = harness();
    let user = Snowflake::new(1);
    let room_id = seed_room(&h, &[user]).await;

    let service = MessageService::new(&h.ctx);
    let t1 = Utc::now();
    let marker = service
        .mark_read(room_id, user, MarkReadRequest { at: t1 })
        .await
        .unwrap();
    assert_eq!(marker.last_read_at, t1);

    // Out-of-order acknowledgement clamps instead of erroring
    let stale = t1 - Duration::seconds(45);
    let marker = service
        .mark_read(room_id, user, MarkReadRequest { at: stale })
        .await
        .unwrap();
    assert_eq!(marker.last_read_at, t1);

    let t2 = t1 + Duration::seconds(10);
    let marker = service
        .mark_read(room_id, user, MarkReadRequest { at: t2 })
        .await
        .unwrap();
    assert_eq!(marker.last_read_at, t2);
}

#[tokio::test]
async fn test_mark_read_rejects_non_participant() {
    let h = harness();
    let room_id = seed_room(&h, &[Snowflake::new(1)]).await;

    let service = MessageService::new(&h.ctx);
    let err = service
        .mark_read(room_id, Snowflake::new(42), MarkReadRequest { at: Utc::now() })
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "NOT_PARTICIPANT");
}

// ============================================================================
// Provisioning
// ============================================================================

#[tokio::test]
async fn test_enrollment_provisions_both_forums() {
    let h = harness();
    let student = Snowflake::new(10);
    let teacher = Snowflake::new(20);
    let tutor = Snowflake::new(30);
    let subject = Snowflake::new(40);
    h.store.rosters.lock().insert(subject, vec![teacher]);

    let service = ProvisioningService::new(&h.ctx);
    let rooms = service
        .ensure_forum_rooms(student, subject, Some(tutor))
        .await
        .unwrap();
    assert_eq!(rooms.len(), 2);

    let subject_room = rooms.iter().find(|r| r.kind == RoomKind::SubjectForum).unwrap();
    let tutor_room = rooms.iter().find(|r| r.kind == RoomKind::TutorForum).unwrap();

    let subject_members: Vec<Snowflake> =
        ParticipantRepository::find_by_room(h.store.as_ref(), subject_room.id)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.user_id)
            .collect();
    assert_eq!(subject_members.len(), 2);
    assert!(subject_members.contains(&student) && subject_members.contains(&teacher));

    let tutor_members: Vec<Snowflake> =
        ParticipantRepository::find_by_room(h.store.as_ref(), tutor_room.id)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.user_id)
            .collect();
    assert_eq!(tutor_members.len(), 2);
    assert!(tutor_members.contains(&student) && tutor_members.contains(&tutor));
}

#[tokio::test]
async fn test_provisioning_is_idempotent() {
    let h = harness();
    let student = Snowflake::new(10);
    let teacher = Snowflake::new(20);
    let tutor = Snowflake::new(30);
    let subject = Snowflake::new(40);
    h.store.rosters.lock().insert(subject, vec![teacher]);

    let service = ProvisioningService::new(&h.ctx);
    let first = service
        .ensure_forum_rooms(student, subject, Some(tutor))
        .await
        .unwrap();
    let second = service
        .ensure_forum_rooms(student, subject, Some(tutor))
        .await
        .unwrap();

    // Same room ids, no duplicate rows
    let first_ids: Vec<Snowflake> = first.iter().map(|r| r.id).collect();
    let second_ids: Vec<Snowflake> = second.iter().map(|r| r.id).collect();
    assert_eq!(first_ids, second_ids);
    assert_eq!(h.store.rooms.lock().len(), 2);
    assert_eq!(h.store.participants.lock().len(), 4);
}

#[tokio::test]
async fn test_provisioning_without_tutor_creates_subject_forum_only() {
    let h = harness();
    let student = Snowflake::new(10);
    let subject = Snowflake::new(40);

    let service = ProvisioningService::new(&h.ctx);
    let rooms = service.ensure_forum_rooms(student, subject, None).await.unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].kind, RoomKind::SubjectForum);
}

// ============================================================================
// Rooms
// ============================================================================

#[tokio::test]
async fn test_create_direct_room_needs_two_participants() {
    let h = harness();
    let creator = Snowflake::new(1);

    let service = RoomService::new(&h.ctx);
    let err = service
        .create_room(
            creator,
            CreateRoomRequest {
                kind: "direct".to_string(),
                participant_ids: vec![],
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);

    let ok = service
        .create_room(
            creator,
            CreateRoomRequest {
                kind: "direct".to_string(),
                participant_ids: vec!["2".to_string()],
            },
        )
        .await
        .unwrap();
    assert_eq!(ok.kind, "direct");
}

#[tokio::test]
async fn test_forum_kinds_cannot_be_created_explicitly() {
    let h = harness();
    let service = RoomService::new(&h.ctx);
    let err = service
        .create_room(
            Snowflake::new(1),
            CreateRoomRequest {
                kind: "subject_forum".to_string(),
                participant_ids: vec![],
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn test_ensure_joinable_open_join_and_forbidden() {
    let h = harness();
    let member = Snowflake::new(1);
    let student = Principal::new(Snowflake::new(2), true, vec![Role::Student]);

    let general_id = seed_room(&h, &[member]).await;

    let service = RoomService::new(&h.ctx);
    // General rooms are open; joining inserts a membership row
    service.ensure_joinable(general_id, &student).await.unwrap();
    assert!(h.store.find(general_id, student.id).await.unwrap().is_some());

    // Forum rooms require a pre-existing membership
    let (forum, _) = h
        .store
        .upsert_subject_forum(h.ctx.generate_id(), Snowflake::new(50), Snowflake::new(60))
        .await
        .unwrap();
    let err = service.ensure_joinable(forum.id, &student).await.unwrap_err();
    assert_eq!(err.error_code(), "NOT_PARTICIPANT");
}

// ============================================================================
// Comments
// ============================================================================

fn moderator() -> Principal {
    Principal::new(Snowflake::new(900), true, vec![Role::Moderator])
}

#[tokio::test]
async fn test_comment_depth_chain_fails_at_four() {
    let h = harness();
    let resource = Snowflake::new(500);
    let author = Snowflake::new(1);
    let service = CommentService::new(&h.ctx);

    let mut parent_id: Option<String> = None;
    for depth in 1..=3 {
        let comment = service
            .post_comment(
                resource,
                author,
                PostCommentRequest {
                    content: format!("level {depth}"),
                    parent_comment_id: parent_id.clone(),
                },
            )
            .await
            .unwrap();
        assert_eq!(comment.depth, depth);
        parent_id = Some(comment.id);
    }

    let err = service
        .post_comment(
            resource,
            author,
            PostCommentRequest {
                content: "level 4".to_string(),
                parent_comment_id: parent_id,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "MAX_DEPTH_EXCEEDED");
}

#[tokio::test]
async fn test_reply_to_deleted_parent_is_rejected() {
    let h = harness();
    let resource = Snowflake::new(500);
    let author = Snowflake::new(1);
    let service = CommentService::new(&h.ctx);

    let parent = service
        .post_comment(
            resource,
            author,
            PostCommentRequest {
                content: "parent".to_string(),
                parent_comment_id: None,
            },
        )
        .await
        .unwrap();

    let parent_snowflake = Snowflake::parse(&parent.id).unwrap();
    service.delete_comment(parent_snowflake, &moderator()).await.unwrap();

    let err = service
        .post_comment(
            resource,
            author,
            PostCommentRequest {
                content: "reply".to_string(),
                parent_comment_id: Some(parent.id),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "PARENT_DELETED");
}

#[tokio::test]
async fn test_comment_deletion_permissions() {
    let h = harness();
    let author = Snowflake::new(1);
    let stranger = Principal::new(Snowflake::new(2), true, vec![Role::Student]);
    let service = CommentService::new(&h.ctx);

    let comment = service
        .post_comment(
            Snowflake::new(500),
            author,
            PostCommentRequest {
                content: "mine".to_string(),
                parent_comment_id: None,
            },
        )
        .await
        .unwrap();
    let comment_id = Snowflake::parse(&comment.id).unwrap();

    let err = service.delete_comment(comment_id, &stranger).await.unwrap_err();
    assert_eq!(err.error_code(), "FORBIDDEN");

    let author_principal = Principal::new(author, true, vec![Role::Student]);
    service.delete_comment(comment_id, &author_principal).await.unwrap();

    // Soft delete hides content but keeps the row in the thread
    let listed = service.list_comments(Snowflake::new(500)).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert!(listed[0].is_deleted);
    assert_eq!(listed[0].content, "");
}

#[tokio::test]
async fn test_moderation_requires_moderator_role() {
    let h = harness();
    let service = CommentService::new(&h.ctx);

    let comment = service
        .post_comment(
            Snowflake::new(500),
            Snowflake::new(1),
            PostCommentRequest {
                content: "pending".to_string(),
                parent_comment_id: None,
            },
        )
        .await
        .unwrap();
    let comment_id = Snowflake::parse(&comment.id).unwrap();

    let student = Principal::new(Snowflake::new(2), true, vec![Role::Student]);
    let err = service.approve_comment(comment_id, &student).await.unwrap_err();
    assert_eq!(err.error_code(), "FORBIDDEN");

    service.approve_comment(comment_id, &moderator()).await.unwrap();
    let listed = service.list_comments(Snowflake::new(500)).await.unwrap();
    assert!(listed[0].is_approved);

    service.disapprove_comment(comment_id, &moderator()).await.unwrap();
    let listed = service.list_comments(Snowflake::new(500)).await.unwrap();
    assert!(!listed[0].is_approved);
}

#[tokio::test]
async fn test_reply_counts_are_derived() {
    let h = harness();
    let resource = Snowflake::new(500);
    let author = Snowflake::new(1);
    let service = CommentService::new(&h.ctx);

    let root = service
        .post_comment(
            resource,
            author,
            PostCommentRequest {
                content: "root".to_string(),
                parent_comment_id: None,
            },
        )
        .await
        .unwrap();

    for i in 0..3 {
        service
            .post_comment(
                resource,
                author,
                PostCommentRequest {
                    content: format!("reply {i}"),
                    parent_comment_id: Some(root.id.clone()),
                },
            )
            .await
            .unwrap();
    }

    let listed = service.list_comments(resource).await.unwrap();
    let root_listed = listed.iter().find(|c| c.id == root.id).unwrap();
    assert_eq!(root_listed.reply_count, 3);
}
