//! Domain entities - core business objects

mod chat;
mod device;
mod message;
mod visitor;

pub use chat::{Chat, ChatPriority, ChatStatus};
pub use device::AdminDevice;
pub use message::{Message, MessageKind, SenderKind};
pub use visitor::Visitor;
