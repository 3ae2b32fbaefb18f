//! Entity ↔ model mappers

mod comment;
mod message;
mod room;
mod token;
