//! # livechat-core
//!
//! Domain layer containing entities, wire-stable enums, and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;

// Re-export commonly used types at crate root
pub use entities::{
    AdminDevice, Chat, ChatPriority, ChatStatus, Message, MessageKind, SenderKind, Visitor,
};
pub use error::DomainError;
pub use traits::{
    ChatQuery, ChatRepository, DeviceRepository, MessageRepository, RepoResult, VisitorRepository,
};
