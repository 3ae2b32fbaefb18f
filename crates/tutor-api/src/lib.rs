//! # tutor-api
//!
//! HTTP API server: the gateway protection pipeline, REST handlers, and
//! the hosted WebSocket gateway.

pub mod breaker;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::run;
