//! Traits (ports) - interfaces the domain needs from the outside world

mod collaborators;
mod repositories;

pub use collaborators::{
    NoopEventSink, NotificationJob, NotificationQueue, QueueError, RoomEventSink, TokenValidator,
};
pub use repositories::{
    CommentRepository, MessageQuery, MessageRepository, ParticipantRepository, RepoResult,
    RoomRepository, RosterRepository,
};
