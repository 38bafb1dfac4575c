//! Entity to model mappers
//!
//! This module provides conversions between domain entities (livechat-core) and database models.
//! - `From<Model> for Entity`: Convert database rows to domain objects
//! - `*Insert` structs: Prepare entity data for database operations

mod chat;
mod device;
mod message;
mod visitor;

pub use chat::ChatInsert;
pub use message::MessageInsert;
