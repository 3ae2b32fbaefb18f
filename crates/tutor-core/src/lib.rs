//! # tutor-core
//!
//! Domain layer for the tutoring platform messaging system: entities,
//! value objects, repository traits, collaborator traits, and domain events.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Comment, Message, Participant, Room, RoomKind};
pub use error::DomainError;
pub use events::RoomEvent;
pub use traits::{
    CommentRepository, MessageQuery, MessageRepository, NotificationJob, NotificationQueue,
    ParticipantRepository, QueueError, RepoResult, RoomEventSink, RoomRepository,
    RosterRepository, TokenValidator,
};
pub use value_objects::{Principal, Role, Snowflake, SnowflakeGenerator, SnowflakeParseError};
