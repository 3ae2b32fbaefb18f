//! # tutor-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! Provides:
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations with natural-key upserts and the
//!   monotonic read-marker clamp done in SQL
//! - A token validator and a job-table notification queue

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgCommentRepository, PgMessageRepository, PgNotificationQueue, PgParticipantRepository,
    PgRoomRepository, PgRosterRepository, PgTokenValidator,
};
