//! Response DTOs for service operations
//!
//! All response DTOs implement `Serialize` for JSON output. The wire format
//! is camelCase; messages travel as their full DTO so widget and admin UI
//! render from the same shape.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use livechat_core::{ChatPriority, ChatStatus, MessageKind, SenderKind};

// ============================================================================
// Message Responses
// ============================================================================

/// Full message payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: Uuid,
    pub chat_id: Uuid,
    /// Admin id for admin messages, null for visitor and system messages
    pub sender_id: Option<Uuid>,
    pub sender_type: SenderKind,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Visitor Responses
// ============================================================================

/// Visitor details shown to the admin UI
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorResponse {
    pub id: Uuid,
    pub fingerprint: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub is_blocked: bool,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Chat Responses
// ============================================================================

/// Basic chat response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub id: Uuid,
    pub visitor_id: Uuid,
    pub admin_id: Option<Uuid>,
    pub subject: Option<String>,
    pub status: ChatStatus,
    pub priority: ChatPriority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

/// Chat with its visitor and full message history
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatDetailResponse {
    pub id: Uuid,
    pub visitor_id: Uuid,
    pub admin_id: Option<Uuid>,
    pub subject: Option<String>,
    pub status: ChatStatus,
    pub priority: ChatPriority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub visitor: VisitorResponse,
    /// Oldest first
    pub messages: Vec<MessageResponse>,
}

/// Chat row for listings: visitor plus the latest message
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSummaryResponse {
    pub id: Uuid,
    pub visitor_id: Uuid,
    pub admin_id: Option<Uuid>,
    pub subject: Option<String>,
    pub status: ChatStatus,
    pub priority: ChatPriority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub visitor: VisitorResponse,
    pub last_message: Option<MessageResponse>,
}

/// Paginated chat listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatListResponse {
    pub chats: Vec<ChatSummaryResponse>,
    pub pagination: Pagination,
}

/// Page-based pagination metadata
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}
