//! Room and Participant entity <-> model mappers

use tutor_core::entities::{Participant, Room, RoomKind};
use tutor_core::value_objects::Snowflake;

use crate::models::{ParticipantModel, RoomModel};

/// Convert RoomModel to Room entity
///
/// An unknown kind string means schema drift; map it to General rather
/// than failing the whole query.
impl From<RoomModel> for Room {
    fn from(model: RoomModel) -> Self {
        Room {
            id: Snowflake::new(model.id),
            kind: RoomKind::parse(&model.kind).unwrap_or(RoomKind::General),
            student_id: model.student_id.map(Snowflake::new),
            subject_id: model.subject_id.map(Snowflake::new),
            tutor_id: model.tutor_id.map(Snowflake::new),
            created_at: model.created_at,
        }
    }
}

/// Convert ParticipantModel to Participant entity
impl From<ParticipantModel> for Participant {
    fn from(model: ParticipantModel) -> Self {
        Participant {
            room_id: Snowflake::new(model.room_id),
            user_id: Snowflake::new(model.user_id),
            last_read_at: model.last_read_at,
            joined_at: model.joined_at,
        }
    }
}
