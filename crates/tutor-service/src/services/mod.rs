//! Service layer
//!
//! Business logic built on the repository and collaborator traits from
//! tutor-core. Services are cheap per-request views over a shared
//! `ServiceContext`.

mod comment;
mod context;
mod error;
mod message;
mod provisioning;
mod room;

pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use message::MessageService;
pub use provisioning::ProvisioningService;
pub use room::RoomService;
