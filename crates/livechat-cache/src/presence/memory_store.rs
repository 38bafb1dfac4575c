//! In-memory presence store.
//!
//! Drop-in replacement for the Redis store in tests and single-process
//! deployments. Expiry is checked explicitly on every read instead of
//! relying on an external TTL, so expired entries are evicted the first
//! time anything looks at them.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::error::CacheResult;

use super::store::PresenceStore;
use super::{ONLINE_TTL_SECS, TYPING_TTL_SECS};

struct TypingEntry {
    participant_id: String,
    expires_at: Instant,
}

/// Presence store backed by process-local maps
pub struct InMemoryPresenceStore {
    /// Participant id -> online deadline
    online: DashMap<String, Instant>,
    /// Chat id -> current typer
    typing: DashMap<Uuid, TypingEntry>,
    online_ttl: Duration,
    typing_ttl: Duration,
}

impl InMemoryPresenceStore {
    /// Create a store with the production TTLs
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttls(
            Duration::from_secs(ONLINE_TTL_SECS),
            Duration::from_secs(TYPING_TTL_SECS),
        )
    }

    /// Create a store with custom TTLs
    #[must_use]
    pub fn with_ttls(online_ttl: Duration, typing_ttl: Duration) -> Self {
        Self {
            online: DashMap::new(),
            typing: DashMap::new(),
            online_ttl,
            typing_ttl,
        }
    }
}

impl Default for InMemoryPresenceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryPresenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryPresenceStore")
            .field("online", &self.online.len())
            .field("typing", &self.typing.len())
            .finish()
    }
}

#[async_trait]
impl PresenceStore for InMemoryPresenceStore {
    async fn set_online(&self, participant_id: &str, _session_id: &str) -> CacheResult<()> {
        self.online
            .insert(participant_id.to_string(), Instant::now() + self.online_ttl);
        Ok(())
    }

    async fn set_offline(&self, participant_id: &str) -> CacheResult<()> {
        self.online.remove(participant_id);
        Ok(())
    }

    async fn is_online(&self, participant_id: &str) -> CacheResult<bool> {
        let now = Instant::now();
        let live = self
            .online
            .get(participant_id)
            .is_some_and(|deadline| *deadline > now);

        if !live {
            self.online
                .remove_if(participant_id, |_, deadline| *deadline <= now);
        }

        Ok(live)
    }

    async fn online_ids(&self) -> CacheResult<Vec<String>> {
        let now = Instant::now();
        self.online.retain(|_, deadline| *deadline > now);

        Ok(self.online.iter().map(|entry| entry.key().clone()).collect())
    }

    async fn set_typing(&self, chat_id: Uuid, participant_id: &str) -> CacheResult<()> {
        self.typing.insert(
            chat_id,
            TypingEntry {
                participant_id: participant_id.to_string(),
                expires_at: Instant::now() + self.typing_ttl,
            },
        );
        Ok(())
    }

    async fn current_typer(&self, chat_id: Uuid) -> CacheResult<Option<String>> {
        let now = Instant::now();
        let typer = self
            .typing
            .get(&chat_id)
            .and_then(|entry| (entry.expires_at > now).then(|| entry.participant_id.clone()));

        if typer.is_none() {
            self.typing
                .remove_if(&chat_id, |_, entry| entry.expires_at <= now);
        }

        Ok(typer)
    }
}
