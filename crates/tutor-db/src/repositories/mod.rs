//! Repository implementations
//!
//! PostgreSQL implementations of the repository and collaborator traits
//! defined in tutor-core. Each repository handles database operations for a
//! specific domain entity.

mod comment;
mod error;
mod message;
mod participant;
mod queue;
mod room;
mod roster;
mod token;

pub use comment::PgCommentRepository;
pub use message::PgMessageRepository;
pub use participant::PgParticipantRepository;
pub use queue::PgNotificationQueue;
pub use room::PgRoomRepository;
pub use roster::PgRosterRepository;
pub use token::PgTokenValidator;
