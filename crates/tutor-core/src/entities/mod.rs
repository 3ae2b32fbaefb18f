//! Domain entities

mod comment;
mod message;
mod room;

pub use comment::{Comment, MAX_COMMENT_DEPTH};
pub use message::Message;
pub use room::{Participant, Room, RoomKind};
