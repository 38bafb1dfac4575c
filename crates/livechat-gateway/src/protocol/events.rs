//! Wire event types
//!
//! All WebSocket traffic is JSON with an `{ "event": string, "data": object }`
//! envelope and camelCase payload fields.

use livechat_core::{MessageKind, SenderKind};
use livechat_service::dto::MessageResponse;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payload naming a chat room
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPayload {
    pub chat_id: Uuid,
}

/// Payload for sending a message into a chat
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessagePayload {
    pub chat_id: Uuid,
    pub content: String,
    /// Message kind; defaults to TEXT when omitted
    #[serde(rename = "type", default)]
    pub kind: MessageKind,
}

/// Events clients send to the gateway
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    #[serde(rename = "chat:join")]
    Join(RoomPayload),

    #[serde(rename = "chat:leave")]
    Leave(RoomPayload),

    #[serde(rename = "chat:message")]
    Message(SendMessagePayload),

    #[serde(rename = "chat:typing")]
    Typing(RoomPayload),

    #[serde(rename = "chat:stop-typing")]
    StopTyping(RoomPayload),
}

impl ClientEvent {
    /// Deserialize from a JSON text frame
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Event name for logging
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Join(_) => "chat:join",
            Self::Leave(_) => "chat:leave",
            Self::Message(_) => "chat:message",
            Self::Typing(_) => "chat:typing",
            Self::StopTyping(_) => "chat:stop-typing",
        }
    }
}

/// Events the gateway sends to clients
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    /// A persisted message, echoed to the chat room including the sender
    #[serde(rename = "chat:message")]
    Message(MessageResponse),

    /// An admin has read the visitor messages in a chat
    #[serde(rename = "chat:read", rename_all = "camelCase")]
    Read { chat_id: Uuid, read_by: Uuid },

    #[serde(rename = "chat:typing", rename_all = "camelCase")]
    Typing {
        chat_id: Uuid,
        user_id: String,
        user_type: SenderKind,
    },

    #[serde(rename = "chat:stop-typing", rename_all = "camelCase")]
    StopTyping { chat_id: Uuid, user_id: String },

    /// Visitor activity notice for the admins room
    #[serde(rename = "chat:new-message", rename_all = "camelCase")]
    NewMessage {
        chat_id: Uuid,
        message: MessageResponse,
    },

    #[serde(rename = "admin:online", rename_all = "camelCase")]
    AdminOnline { admin_id: Uuid },

    #[serde(rename = "admin:offline", rename_all = "camelCase")]
    AdminOffline { admin_id: Uuid },
}

impl ServerEvent {
    /// Serialize to a JSON text frame
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Event name for logging
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Message(_) => "chat:message",
            Self::Read { .. } => "chat:read",
            Self::Typing { .. } => "chat:typing",
            Self::StopTyping { .. } => "chat:stop-typing",
            Self::NewMessage { .. } => "chat:new-message",
            Self::AdminOnline { .. } => "admin:online",
            Self::AdminOffline { .. } => "admin:offline",
        }
    }
}
