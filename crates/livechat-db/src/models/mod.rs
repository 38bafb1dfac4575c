//! Database models - SQLx-compatible structs for PostgreSQL tables

mod chat;
mod device;
mod message;
mod visitor;

pub use chat::ChatModel;
pub use device::AdminDeviceModel;
pub use message::MessageModel;
pub use visitor::VisitorModel;
