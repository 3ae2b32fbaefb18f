//! Room service
//!
//! Explicit room creation, listing with unread counts, and the join check
//! shared with the WebSocket connection path.

use tracing::{info, instrument};
use tutor_core::entities::{Room, RoomKind};
use tutor_core::value_objects::Principal;
use tutor_core::{DomainError, RoomEvent, Snowflake};

use crate::dto::{CreateRoomRequest, RoomResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Room service
pub struct RoomService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RoomService<'a> {
    /// Create a new RoomService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List the caller's rooms with live unread counts
    #[instrument(skip(self))]
    pub async fn list_rooms(&self, user_id: Snowflake) -> ServiceResult<Vec<RoomResponse>> {
        let rooms = self.ctx.room_repo().find_by_user(user_id).await?;

        let mut responses = Vec::with_capacity(rooms.len());
        for room in &rooms {
            let unread = self.ctx.message_repo().unread_count(room.id, user_id).await?;
            responses.push(RoomResponse::from(room).with_unread(unread));
        }
        Ok(responses)
    }

    /// Get one room, requiring membership
    #[instrument(skip(self))]
    pub async fn get_room(&self, room_id: Snowflake, user_id: Snowflake) -> ServiceResult<RoomResponse> {
        let room = self
            .ctx
            .room_repo()
            .find_by_id(room_id)
            .await?
            .ok_or(DomainError::RoomNotFound(room_id))?;

        self.ctx
            .participant_repo()
            .find(room_id, user_id)
            .await?
            .ok_or(DomainError::NotParticipant { room_id, user_id })?;

        let unread = self.ctx.message_repo().unread_count(room_id, user_id).await?;
        Ok(RoomResponse::from(&room).with_unread(unread))
    }

    /// Create an explicit Direct or General room
    ///
    /// Forum rooms are provisioned from enrollment events, never through
    /// this path.
    #[instrument(skip(self, request))]
    pub async fn create_room(
        &self,
        creator_id: Snowflake,
        request: CreateRoomRequest,
    ) -> ServiceResult<RoomResponse> {
        let kind = match RoomKind::parse(&request.kind) {
            Some(kind @ (RoomKind::Direct | RoomKind::General)) => kind,
            Some(_) => {
                return Err(ServiceError::validation(
                    "Forum rooms are provisioned from enrollments",
                ))
            }
            None => return Err(ServiceError::validation("Unknown room kind")),
        };

        let mut participant_ids = vec![creator_id];
        for raw in &request.participant_ids {
            let id = Snowflake::parse(raw)
                .map_err(|_| ServiceError::validation("Invalid participant id format"))?;
            if !participant_ids.contains(&id) {
                participant_ids.push(id);
            }
        }

        if kind == RoomKind::Direct && participant_ids.len() != 2 {
            return Err(ServiceError::validation(
                "Direct rooms need exactly one other participant",
            ));
        }

        let room = Room::new(self.ctx.generate_id(), kind);
        self.ctx.room_repo().create(&room).await?;

        for user_id in &participant_ids {
            self.ctx.participant_repo().upsert(room.id, *user_id).await?;
        }

        info!(room_id = %room.id, kind = %kind, "Room created");

        Ok(RoomResponse::from(&room).with_unread(0))
    }

    /// Check whether a principal may join a room over a live connection,
    /// inserting a membership row for open-join kinds.
    ///
    /// Errors here map to the forbidden close code on the WebSocket path.
    #[instrument(skip(self, principal))]
    pub async fn ensure_joinable(
        &self,
        room_id: Snowflake,
        principal: &Principal,
    ) -> ServiceResult<()> {
        let room = self
            .ctx
            .room_repo()
            .find_by_id(room_id)
            .await?
            .ok_or(DomainError::RoomNotFound(room_id))?;

        if self
            .ctx
            .participant_repo()
            .find(room_id, principal.id)
            .await?
            .is_some()
        {
            return Ok(());
        }

        let open = principal
            .roles
            .iter()
            .any(|role| room.kind.allows_open_join(*role));
        if !open {
            return Err(DomainError::NotParticipant {
                room_id,
                user_id: principal.id,
            }
            .into());
        }

        let inserted = self.ctx.participant_repo().upsert(room_id, principal.id).await?;
        if inserted {
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
                .publish(room_id, &recipients, RoomEvent::participant_joined(room_id, principal.id))
                .await;
        }

        Ok(())
    }
}
