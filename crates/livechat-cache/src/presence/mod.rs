//! Presence and typing state.
//!
//! Tracks which participants are online and who is typing in a chat.

mod memory_store;
mod redis_store;
mod store;

pub use memory_store::InMemoryPresenceStore;
pub use redis_store::RedisPresenceStore;
pub use store::PresenceStore;

/// Online entry TTL (24 hours, cleared on disconnect)
pub const ONLINE_TTL_SECS: u64 = 86_400;
/// Typing indicator TTL (5 seconds, refreshed while typing)
pub const TYPING_TTL_SECS: u64 = 5;
