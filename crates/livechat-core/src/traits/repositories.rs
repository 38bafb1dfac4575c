//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::entities::{AdminDevice, Chat, ChatStatus, Message, Visitor};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Chat Repository
// ============================================================================

/// Filter and pagination options for chat listings
#[derive(Debug, Clone, Default)]
pub struct ChatQuery {
    pub status: Option<ChatStatus>,
    pub admin_id: Option<Uuid>,
    pub limit: i64,
    pub offset: i64,
}

#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Find chat by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Chat>>;

    /// List chats matching the query, most recently updated first
    async fn list(&self, query: &ChatQuery) -> RepoResult<Vec<Chat>>;

    /// Count chats matching the query (limit/offset ignored)
    async fn count(&self, query: &ChatQuery) -> RepoResult<i64>;

    /// Create a new chat
    async fn create(&self, chat: &Chat) -> RepoResult<()>;

    /// Update an existing chat
    async fn update(&self, chat: &Chat) -> RepoResult<()>;

    /// Bump a chat's `updated_at` (new message activity)
    async fn touch(&self, id: Uuid, at: DateTime<Utc>) -> RepoResult<()>;
}

// ============================================================================
// Message Repository
// ============================================================================

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Find message by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Message>>;

    /// List all messages in a chat, oldest first
    async fn find_by_chat(&self, chat_id: Uuid) -> RepoResult<Vec<Message>>;

    /// Most recent message in a chat, if any
    async fn last_by_chat(&self, chat_id: Uuid) -> RepoResult<Option<Message>>;

    /// Create a new message
    async fn create(&self, message: &Message) -> RepoResult<()>;

    /// Mark every unread visitor message in the chat as read, stamping
    /// `read_at`. Already-read rows are untouched. Returns the number of
    /// rows that flipped.
    async fn mark_visitor_messages_read(
        &self,
        chat_id: Uuid,
        read_at: DateTime<Utc>,
    ) -> RepoResult<u64>;

    /// Count unread visitor messages. With an admin id, counts across that
    /// admin's chats; without one, across unassigned WAITING chats.
    async fn count_unread(&self, admin_id: Option<Uuid>) -> RepoResult<i64>;
}

// ============================================================================
// Visitor Repository
// ============================================================================

#[async_trait]
pub trait VisitorRepository: Send + Sync {
    /// Find visitor by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Visitor>>;

    /// Find visitor by browser fingerprint
    async fn find_by_fingerprint(&self, fingerprint: &str) -> RepoResult<Option<Visitor>>;

    /// Create a new visitor
    async fn create(&self, visitor: &Visitor) -> RepoResult<()>;

    /// Set or clear the blocked flag
    async fn set_blocked(&self, id: Uuid, blocked: bool) -> RepoResult<()>;
}

// ============================================================================
// Device Repository
// ============================================================================

#[async_trait]
pub trait DeviceRepository: Send + Sync {
    /// Register a device token (upsert on the token)
    async fn register(&self, device: &AdminDevice) -> RepoResult<()>;

    /// All registered admin devices
    async fn find_all(&self) -> RepoResult<Vec<AdminDevice>>;

    /// Remove devices whose tokens the push provider rejected.
    /// Returns the number of rows deleted.
    async fn delete_by_tokens(&self, tokens: &[String]) -> RepoResult<u64>;
}
