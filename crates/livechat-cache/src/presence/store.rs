//! Presence store trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CacheResult;

/// Presence and typing state shared by every gateway connection.
///
/// Participant ids are opaque strings: admins use their Uuid in string
/// form, visitors their client-supplied visitor id. Entries carry a TTL
/// so that crashed connections age out on their own.
#[async_trait]
pub trait PresenceStore: Send + Sync {
    /// Mark a participant online under the given session
    async fn set_online(&self, participant_id: &str, session_id: &str) -> CacheResult<()>;

    /// Remove a participant's online entry
    async fn set_offline(&self, participant_id: &str) -> CacheResult<()>;

    /// Check whether a participant is currently online
    async fn is_online(&self, participant_id: &str) -> CacheResult<bool>;

    /// Ids of every participant currently online
    async fn online_ids(&self) -> CacheResult<Vec<String>>;

    /// Record that a participant is typing in a chat. One entry per chat,
    /// last writer wins.
    async fn set_typing(&self, chat_id: Uuid, participant_id: &str) -> CacheResult<()>;

    /// Who is currently typing in a chat, if anyone
    async fn current_typer(&self, chat_id: Uuid) -> CacheResult<Option<String>>;
}
