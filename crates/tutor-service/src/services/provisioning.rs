//! Room provisioning from enrollment events
//!
//! Enrollment creation is delivered at-least-once, so every step here is
//! an idempotent upsert: re-delivery finds the existing rows and inserts
//! nothing. Provisioning is a one-way ratchet; a later deactivation of the
//! enrollment never removes rooms.

use tracing::{info, instrument};
use tutor_core::entities::Room;
use tutor_core::{RoomEvent, Snowflake};

use crate::dto::{EnrollmentCreatedRequest, ProvisionedRoomsResponse, RoomResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Room provisioning service
pub struct ProvisioningService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProvisioningService<'a> {
    /// Create a new ProvisioningService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Handle an inbound enrollment-created event
    #[instrument(skip(self, request))]
    pub async fn on_enrollment_created(
        &self,
        request: EnrollmentCreatedRequest,
    ) -> ServiceResult<ProvisionedRoomsResponse> {
        let student_id = Snowflake::parse(&request.student_id)
            .map_err(|_| ServiceError::validation("Invalid student_id format"))?;
        let subject_id = Snowflake::parse(&request.subject_id)
            .map_err(|_| ServiceError::validation("Invalid subject_id format"))?;
        let tutor_id = match request.tutor_id {
            Some(ref raw) => Some(
                Snowflake::parse(raw)
                    .map_err(|_| ServiceError::validation("Invalid tutor_id format"))?,
            ),
            None => None,
        };

        let rooms = self.ensure_forum_rooms(student_id, subject_id, tutor_id).await?;
        Ok(ProvisionedRoomsResponse {
            rooms: rooms.iter().map(RoomResponse::from).collect(),
        })
    }

    /// Look up or create the forum rooms implied by an enrollment
    ///
    /// The subject forum gets the student plus every active teacher on the
    /// subject; the tutor forum, when a tutor is assigned, gets the student
    /// and the tutor. Each forum is committed independently, so a tutor
    /// forum failure leaves an already-created subject forum in place for
    /// the caller's retry.
    #[instrument(skip(self))]
    pub async fn ensure_forum_rooms(
        &self,
        student_id: Snowflake,
        subject_id: Snowflake,
        tutor_id: Option<Snowflake>,
    ) -> ServiceResult<Vec<Room>> {
        let mut rooms = Vec::with_capacity(2);

        let (subject_room, created) = self
            .ctx
            .room_repo()
            .upsert_subject_forum(self.ctx.generate_id(), student_id, subject_id)
            .await?;

        if created {
            info!(room_id = %subject_room.id, student_id = %student_id, subject_id = %subject_id, "Subject forum provisioned");
            self.announce_room(&subject_room).await?;
        }

        let mut members = vec![student_id];
        members.extend(self.ctx.roster_repo().active_teachers(subject_id).await?);
        self.join_all(&subject_room, &members).await?;
        rooms.push(subject_room);

        if let Some(tutor_id) = tutor_id {
            let (tutor_room, created) = self
                .ctx
                .room_repo()
                .upsert_tutor_forum(self.ctx.generate_id(), student_id, tutor_id)
                .await?;

            if created {
                info!(room_id = %tutor_room.id, student_id = %student_id, tutor_id = %tutor_id, "Tutor forum provisioned");
                self.announce_room(&tutor_room).await?;
            }

            self.join_all(&tutor_room, &[student_id, tutor_id]).await?;
            rooms.push(tutor_room);
        }

        Ok(rooms)
    }

    /// Upsert memberships, announcing only rows actually inserted
    async fn join_all(&self, room: &Room, user_ids: &[Snowflake]) -> ServiceResult<()> {
        let mut joined = Vec::new();
        for user_id in user_ids {
            if self.ctx.participant_repo().upsert(room.id, *user_id).await? {
                joined.push(*user_id);
            }
        }

        if joined.is_empty() {
            return Ok(());
        }

        let recipients: Vec<Snowflake> = self
            .ctx
            .participant_repo()
            .find_by_room(room.id)
            .await?
            .into_iter()
            .map(|p| p.user_id)
            .collect();

        for user_id in joined {
            self.ctx
                .event_sink()
                .publish(room.id, &recipients, RoomEvent::participant_joined(room.id, user_id))
                .await;
        }

        Ok(())
    }

    async fn announce_room(&self, room: &Room) -> ServiceResult<()> {
        // Participants are inserted right after; the provisioned event only
        // reaches notification jobs for the listed recipients
        let recipients: Vec<Snowflake> = room.student_id.into_iter().collect();
        self.ctx
            .event_sink()
            .publish(room.id, &recipients, RoomEvent::room_provisioned(room.id, room.kind))
            .await;
        Ok(())
    }
}
