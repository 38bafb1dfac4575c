//! Business logic services
//!
//! This module contains the service layer implementations that handle
//! validation, orchestration of domain operations, and push delivery.

pub mod chat;
pub mod context;
pub mod error;
pub mod message;
pub mod push;

// Re-export all services for convenience
pub use chat::ChatService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use message::MessageService;
pub use push::PushService;
