//! HTTP request handlers

pub mod comments;
pub mod events;
pub mod health;
pub mod messages;
pub mod rooms;
