//! Message entity <-> model mapper

use tutor_core::entities::Message;
use tutor_core::value_objects::Snowflake;

use crate::models::MessageModel;

/// Convert MessageModel to Message entity
impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        Message {
            id: Snowflake::new(model.id),
            room_id: Snowflake::new(model.room_id),
            sender_id: Snowflake::new(model.sender_id),
            content: model.content,
            created_at: model.created_at,
            edited_at: model.edited_at,
            reply_to_id: model.reply_to_id.map(Snowflake::new),
        }
    }
}
