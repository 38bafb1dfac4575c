//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use livechat_core::{Chat, Message, Visitor};

use super::responses::{
    ChatDetailResponse, ChatResponse, ChatSummaryResponse, MessageResponse, VisitorResponse,
};

// ============================================================================
// Message Mappers
// ============================================================================

impl From<&Message> for MessageResponse {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id,
            chat_id: message.chat_id,
            sender_id: message.sender_id,
            sender_type: message.sender_kind,
            content: message.content.clone(),
            kind: message.kind,
            is_read: message.is_read,
            read_at: message.read_at,
            created_at: message.created_at,
        }
    }
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self::from(&message)
    }
}

// ============================================================================
// Visitor Mappers
// ============================================================================

impl From<&Visitor> for VisitorResponse {
    fn from(visitor: &Visitor) -> Self {
        Self {
            id: visitor.id,
            fingerprint: visitor.fingerprint.clone(),
            name: visitor.name.clone(),
            email: visitor.email.clone(),
            ip_address: visitor.ip_address.clone(),
            user_agent: visitor.user_agent.clone(),
            is_blocked: visitor.is_blocked,
            created_at: visitor.created_at,
        }
    }
}

impl From<Visitor> for VisitorResponse {
    fn from(visitor: Visitor) -> Self {
        Self::from(&visitor)
    }
}

// ============================================================================
// Chat Mappers
// ============================================================================

impl From<&Chat> for ChatResponse {
    fn from(chat: &Chat) -> Self {
        Self {
            id: chat.id,
            visitor_id: chat.visitor_id,
            admin_id: chat.admin_id,
            subject: chat.subject.clone(),
            status: chat.status,
            priority: chat.priority,
            created_at: chat.created_at,
            updated_at: chat.updated_at,
            closed_at: chat.closed_at,
        }
    }
}

impl From<Chat> for ChatResponse {
    fn from(chat: Chat) -> Self {
        Self::from(&chat)
    }
}

impl ChatDetailResponse {
    /// Assemble a detail response from its parts
    pub fn new(chat: Chat, visitor: Visitor, messages: Vec<Message>) -> Self {
        Self {
            id: chat.id,
            visitor_id: chat.visitor_id,
            admin_id: chat.admin_id,
            subject: chat.subject,
            status: chat.status,
            priority: chat.priority,
            created_at: chat.created_at,
            updated_at: chat.updated_at,
            closed_at: chat.closed_at,
            visitor: VisitorResponse::from(visitor),
            messages: messages.into_iter().map(MessageResponse::from).collect(),
        }
    }
}

impl ChatSummaryResponse {
    /// Assemble a listing row from its parts
    pub fn new(chat: Chat, visitor: Visitor, last_message: Option<Message>) -> Self {
        Self {
            id: chat.id,
            visitor_id: chat.visitor_id,
            admin_id: chat.admin_id,
            subject: chat.subject,
            status: chat.status,
            priority: chat.priority,
            created_at: chat.created_at,
            updated_at: chat.updated_at,
            closed_at: chat.closed_at,
            visitor: VisitorResponse::from(visitor),
            last_message: last_message.map(MessageResponse::from),
        }
    }
}
