//! Integration test utilities for the tutoring chat server
//!
//! This crate provides helpers for running end-to-end tests against
//! the REST API, plus seeding helpers for the auth and roster tables
//! that are normally written by external systems.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
