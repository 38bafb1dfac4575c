//! # livechat-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

// Re-export the service surface at crate root
pub use services::{
    ChatService, MessageService, PushService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult,
};
