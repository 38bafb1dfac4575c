//! Request DTOs for service operations
//!
//! All request DTOs implement `Deserialize` and, where fields need checking,
//! `Validate`. The wire format is camelCase JSON.

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use livechat_core::{ChatPriority, ChatStatus, MessageKind, SenderKind};

// ============================================================================
// Chat Requests
// ============================================================================

/// Start a new chat as a visitor
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateChatRequest {
    #[validate(length(min = 1, max = 128, message = "Fingerprint must be 1-128 characters"))]
    pub fingerprint: String,

    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(max = 200, message = "Subject must be at most 200 characters"))]
    pub subject: Option<String>,

    pub ip_address: Option<String>,

    pub user_agent: Option<String>,
}

/// Update chat status, priority, or assignment
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChatRequest {
    pub status: Option<ChatStatus>,
    pub priority: Option<ChatPriority>,
    pub admin_id: Option<Uuid>,
}

/// Filter and pagination for chat listings
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListChatsRequest {
    pub status: Option<ChatStatus>,

    pub admin_id: Option<Uuid>,

    #[serde(default = "default_page")]
    pub page: i64,

    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    20
}

impl Default for ListChatsRequest {
    fn default() -> Self {
        Self {
            status: None,
            admin_id: None,
            page: default_page(),
            limit: default_limit(),
        }
    }
}

// ============================================================================
// Message Requests
// ============================================================================

/// Create a message. Sender fields come from the authenticated connection,
/// never from client input.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
    pub chat_id: Uuid,

    pub sender_id: Option<Uuid>,

    pub sender_kind: SenderKind,

    #[validate(length(max = 4000, message = "Content must be at most 4000 characters"))]
    pub content: String,

    #[serde(rename = "type", default)]
    pub kind: MessageKind,
}

// ============================================================================
// Device Requests
// ============================================================================

/// Register an admin device token for push delivery
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDeviceRequest {
    pub admin_id: Uuid,

    #[validate(length(min = 1, max = 512, message = "Device token must be 1-512 characters"))]
    pub device_token: String,

    #[validate(length(min = 1, max = 32, message = "Device type must be 1-32 characters"))]
    pub device_type: String,
}
