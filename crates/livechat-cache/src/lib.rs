//! # livechat-cache
//!
//! Redis caching layer for presence and typing state.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Presence**: Participant online status and per-chat typing indicators
//! - **In-memory store**: TTL-checked fallback for tests and single-node runs
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use livechat_cache::{PresenceStore, RedisPool, RedisPoolConfig, RedisPresenceStore};
//!
//! // Create Redis pool
//! let config = RedisPoolConfig::default();
//! let pool = RedisPool::new(config)?;
//!
//! // Create the store and mark a participant online
//! let store: Arc<dyn PresenceStore> = Arc::new(RedisPresenceStore::new(pool));
//! store.set_online("visitor-abc", &session_id).await?;
//! ```

pub mod error;
pub mod pool;
pub mod presence;

// Re-export error types
pub use error::{CacheError, CacheResult};

// Re-export pool types
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};

// Re-export presence types
pub use presence::{
    InMemoryPresenceStore, PresenceStore, RedisPresenceStore, ONLINE_TTL_SECS, TYPING_TTL_SECS,
};
