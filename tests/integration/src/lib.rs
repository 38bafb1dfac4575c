//! Integration test utilities for the live chat workspace
//!
//! In-process harness and in-memory fixtures for driving the gateway and
//! the service layer end to end, without PostgreSQL, Redis, or a push
//! backend.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
