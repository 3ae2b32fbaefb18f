//! Message service
//!
//! Message creation, listing, read tracking, and unread counts.

use tracing::{info, instrument};
use tutor_core::entities::Message;
use tutor_core::traits::MessageQuery;
use tutor_core::{DomainError, RoomEvent, Snowflake};

use crate::dto::{MarkReadRequest, MessageResponse, PostMessageRequest, ReadMarkerResponse, UnreadCountResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Maximum message content length in characters
const MAX_CONTENT_LEN: usize = 4000;

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Post a message to a room
    ///
    /// Persists the message and advances the sender's own read marker as
    /// one unit, then hands the event to the delivery fan-out. Fan-out
    /// failures never surface here; the write already committed.
    #[instrument(skip(self, request))]
    pub async fn post_message(
        &self,
        room_id: Snowflake,
        sender_id: Snowflake,
        request: PostMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        let room = self
            .ctx
            .room_repo()
            .find_by_id(room_id)
            .await?
            .ok_or(DomainError::RoomNotFound(room_id))?;

        self.require_participant(room.id, sender_id).await?;

        let content = request.content.trim().to_string();
        if content.is_empty() {
            return Err(ServiceError::validation("Message content cannot be empty"));
        }
        if content.chars().count() > MAX_CONTENT_LEN {
            return Err(DomainError::ContentTooLong { max: MAX_CONTENT_LEN }.into());
        }

        // A reply must target a message in the same room
        let reply_to_id = match request.reply_to_id {
            Some(ref raw) => {
                let target_id = Snowflake::parse(raw)
                    .map_err(|_| ServiceError::validation("Invalid reply_to_id format"))?;
                let target = self
                    .ctx
                    .message_repo()
                    .find_by_id(target_id)
                    .await?
                    .ok_or(DomainError::InvalidReply(target_id))?;
                if target.room_id != room_id {
                    return Err(DomainError::InvalidReply(target_id).into());
                }
                Some(target_id)
            }
            None => None,
        };

        let message_id = self.ctx.generate_id();
        let message = match reply_to_id {
            Some(target) => Message::new_reply(message_id, room_id, sender_id, content, target),
            None => Message::new(message_id, room_id, sender_id, content),
        };

        self.ctx.message_repo().create(&message).await?;

        info!(message_id = %message_id, room_id = %room_id, "Message created");

        let recipients: Vec<Snowflake> = self
            .ctx
            .participant_repo()
            .find_by_room(room_id)
            .await?
            .into_iter()
            .map(|p| p.user_id)
            .collect();

        self.ctx
            .event_sink()
            .publish(room_id, &recipients, RoomEvent::message_created(message.clone()))
            .await;

        Ok(MessageResponse::from(&message))
    }

    /// List messages in a room with cursor pagination
    #[instrument(skip(self))]
    pub async fn list_messages(
        &self,
        room_id: Snowflake,
        user_id: Snowflake,
        before: Option<Snowflake>,
        after: Option<Snowflake>,
        limit: i64,
    ) -> ServiceResult<Vec<MessageResponse>> {
        self.require_participant(room_id, user_id).await?;

        let query = MessageQuery {
            before,
            after,
            limit: limit.clamp(1, 100),
        };

        let messages = self.ctx.message_repo().find_by_room(room_id, query).await?;
        Ok(messages.iter().map(MessageResponse::from).collect())
    }

    /// Acknowledge reads up to a timestamp
    ///
    /// Stale timestamps clamp to the stored marker instead of erroring, so
    /// out-of-order acknowledgements can never regress read progress.
    #[instrument(skip(self, request))]
    pub async fn mark_read(
        &self,
        room_id: Snowflake,
        user_id: Snowflake,
        request: MarkReadRequest,
    ) -> ServiceResult<ReadMarkerResponse> {
        let effective = self
            .ctx
            .participant_repo()
            .advance_last_read(room_id, user_id, request.at)
            .await?;

        Ok(ReadMarkerResponse {
            room_id: room_id.to_string(),
            last_read_at: effective,
        })
    }

    /// Live unread count for a participant
    #[instrument(skip(self))]
    pub async fn unread_count(
        &self,
        room_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<UnreadCountResponse> {
        self.require_participant(room_id, user_id).await?;

        let count = self.ctx.message_repo().unread_count(room_id, user_id).await?;
        Ok(UnreadCountResponse {
            room_id: room_id.to_string(),
            unread_count: count,
        })
    }

    async fn require_participant(&self, room_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        self.ctx
            .participant_repo()
            .find(room_id, user_id)
            .await?
            .ok_or(DomainError::NotParticipant { room_id, user_id })?;
        Ok(())
    }
}
