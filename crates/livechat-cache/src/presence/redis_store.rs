//! Redis-backed presence store.
//!
//! Online and typing entries are plain SETEX keys; Redis enforces the TTLs.

use async_trait::async_trait;
use redis::AsyncCommands;
use uuid::Uuid;

use crate::error::CacheResult;
use crate::pool::RedisPool;

use super::store::PresenceStore;
use super::{ONLINE_TTL_SECS, TYPING_TTL_SECS};

/// Key prefix for online participants
const ONLINE_PREFIX: &str = "presence:online:";
/// Key prefix for per-chat typing indicators
const TYPING_PREFIX: &str = "presence:typing:";

/// Presence store backed by Redis
#[derive(Clone)]
pub struct RedisPresenceStore {
    pool: RedisPool,
}

impl RedisPresenceStore {
    /// Create a new presence store
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Generate Redis key for a participant's online entry
    fn online_key(participant_id: &str) -> String {
        format!("{ONLINE_PREFIX}{participant_id}")
    }

    /// Generate Redis key for a chat's typing indicator
    fn typing_key(chat_id: Uuid) -> String {
        format!("{TYPING_PREFIX}{chat_id}")
    }
}

impl std::fmt::Debug for RedisPresenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisPresenceStore").finish_non_exhaustive()
    }
}

#[async_trait]
impl PresenceStore for RedisPresenceStore {
    async fn set_online(&self, participant_id: &str, session_id: &str) -> CacheResult<()> {
        let key = Self::online_key(participant_id);
        let mut conn = self.pool.get().await?;
        conn.set_ex::<_, _, ()>(&key, session_id, ONLINE_TTL_SECS)
            .await?;

        tracing::debug!(participant_id = %participant_id, "Participant online");
        Ok(())
    }

    async fn set_offline(&self, participant_id: &str) -> CacheResult<()> {
        let key = Self::online_key(participant_id);
        let mut conn = self.pool.get().await?;
        conn.del::<_, ()>(&key).await?;

        tracing::debug!(participant_id = %participant_id, "Participant offline");
        Ok(())
    }

    async fn is_online(&self, participant_id: &str) -> CacheResult<bool> {
        let key = Self::online_key(participant_id);
        let mut conn = self.pool.get().await?;
        let exists: bool = conn.exists(&key).await?;
        Ok(exists)
    }

    async fn online_ids(&self) -> CacheResult<Vec<String>> {
        let pattern = format!("{ONLINE_PREFIX}*");
        let keys = self.pool.scan_keys(&pattern, 100).await?;

        Ok(keys
            .iter()
            .filter_map(|key| key.strip_prefix(ONLINE_PREFIX))
            .map(str::to_string)
            .collect())
    }

    async fn set_typing(&self, chat_id: Uuid, participant_id: &str) -> CacheResult<()> {
        let key = Self::typing_key(chat_id);
        let mut conn = self.pool.get().await?;
        conn.set_ex::<_, _, ()>(&key, participant_id, TYPING_TTL_SECS)
            .await?;

        tracing::trace!(
            participant_id = %participant_id,
            chat_id = %chat_id,
            "Set typing indicator"
        );
        Ok(())
    }

    async fn current_typer(&self, chat_id: Uuid) -> CacheResult<Option<String>> {
        let key = Self::typing_key(chat_id);
        let mut conn = self.pool.get().await?;
        let typer: Option<String> = conn.get(&key).await?;
        Ok(typer)
    }
}
