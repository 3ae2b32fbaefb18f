//! Database models - rows as stored, mapped to entities by `mappers`

mod comment;
mod message;
mod room;
mod token;

pub use comment::CommentModel;
pub use message::MessageModel;
pub use room::{ParticipantModel, RoomModel};
pub use token::AuthTokenModel;
