//! # tutor-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    CommentService, MessageService, ProvisioningService, RoomService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult,
};
