//! Service context - dependency container for services
//!
//! Holds the repositories and collaborators needed by services. Built once
//! at startup and shared; services are cheap per-request views over it.

use std::sync::Arc;

use tutor_core::traits::{
    CommentRepository, MessageRepository, ParticipantRepository, RoomEventSink, RoomRepository,
    RosterRepository, TokenValidator,
};
use tutor_core::SnowflakeGenerator;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Repositories over the persistent store
/// - The token validator collaborator
/// - The live delivery fan-out sink
/// - Snowflake generator for ID generation
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    room_repo: Arc<dyn RoomRepository>,
    participant_repo: Arc<dyn ParticipantRepository>,
    message_repo: Arc<dyn MessageRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    roster_repo: Arc<dyn RosterRepository>,

    // Collaborators
    token_validator: Arc<dyn TokenValidator>,
    event_sink: Arc<dyn RoomEventSink>,

    // Services
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        room_repo: Arc<dyn RoomRepository>,
        participant_repo: Arc<dyn ParticipantRepository>,
        message_repo: Arc<dyn MessageRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        roster_repo: Arc<dyn RosterRepository>,
        token_validator: Arc<dyn TokenValidator>,
        event_sink: Arc<dyn RoomEventSink>,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            room_repo,
            participant_repo,
            message_repo,
            comment_repo,
            roster_repo,
            token_validator,
            event_sink,
            snowflake_generator,
        }
    }

    // === Repositories ===

    /// Get the room repository
    pub fn room_repo(&self) -> &dyn RoomRepository {
        self.room_repo.as_ref()
    }

    /// Get the participant repository
    pub fn participant_repo(&self) -> &dyn ParticipantRepository {
        self.participant_repo.as_ref()
    }

    /// Get the message repository
    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    /// Get the comment repository
    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    /// Get the roster repository
    pub fn roster_repo(&self) -> &dyn RosterRepository {
        self.roster_repo.as_ref()
    }

    // === Collaborators ===

    /// Get the token validator
    pub fn token_validator(&self) -> &dyn TokenValidator {
        self.token_validator.as_ref()
    }

    /// Get the delivery fan-out sink
    pub fn event_sink(&self) -> &dyn RoomEventSink {
        self.event_sink.as_ref()
    }

    // === Services ===

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> tutor_core::Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("collaborators", &"...")
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    room_repo: Option<Arc<dyn RoomRepository>>,
    participant_repo: Option<Arc<dyn ParticipantRepository>>,
    message_repo: Option<Arc<dyn MessageRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    roster_repo: Option<Arc<dyn RosterRepository>>,
    token_validator: Option<Arc<dyn TokenValidator>>,
    event_sink: Option<Arc<dyn RoomEventSink>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            room_repo: None,
            participant_repo: None,
            message_repo: None,
            comment_repo: None,
            roster_repo: None,
            token_validator: None,
            event_sink: None,
            snowflake_generator: None,
        }
    }

    pub fn room_repo(mut self, repo: Arc<dyn RoomRepository>) -> Self {
        self.room_repo = Some(repo);
        self
    }

    pub fn participant_repo(mut self, repo: Arc<dyn ParticipantRepository>) -> Self {
        self.participant_repo = Some(repo);
        self
    }

    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn roster_repo(mut self, repo: Arc<dyn RosterRepository>) -> Self {
        self.roster_repo = Some(repo);
        self
    }

    pub fn token_validator(mut self, validator: Arc<dyn TokenValidator>) -> Self {
        self.token_validator = Some(validator);
        self
    }

    pub fn event_sink(mut self, sink: Arc<dyn RoomEventSink>) -> Self {
        self.event_sink = Some(sink);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.room_repo
                .ok_or_else(|| super::error::ServiceError::validation("room_repo is required"))?,
            self.participant_repo.ok_or_else(|| {
                super::error::ServiceError::validation("participant_repo is required")
            })?,
            self.message_repo
                .ok_or_else(|| super::error::ServiceError::validation("message_repo is required"))?,
            self.comment_repo
                .ok_or_else(|| super::error::ServiceError::validation("comment_repo is required"))?,
            self.roster_repo
                .ok_or_else(|| super::error::ServiceError::validation("roster_repo is required"))?,
            self.token_validator.ok_or_else(|| {
                super::error::ServiceError::validation("token_validator is required")
            })?,
            self.event_sink
                .ok_or_else(|| super::error::ServiceError::validation("event_sink is required"))?,
            self.snowflake_generator.ok_or_else(|| {
                super::error::ServiceError::validation("snowflake_generator is required")
            })?,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
