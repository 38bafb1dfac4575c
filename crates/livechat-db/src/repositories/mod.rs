//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in livechat-core.
//! Each repository handles database operations for a specific domain entity.

mod chat;
mod device;
mod error;
mod message;
mod visitor;

pub use chat::PgChatRepository;
pub use device::PgDeviceRepository;
pub use message::PgMessageRepository;
pub use visitor::PgVisitorRepository;
