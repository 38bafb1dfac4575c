//! Message entity <-> model mapper

use livechat_core::entities::{Message, MessageKind, SenderKind};

use crate::models::MessageModel;

fn parse_sender_kind(s: &str) -> SenderKind {
    s.parse().unwrap_or(SenderKind::System)
}

fn parse_message_kind(s: &str) -> MessageKind {
    s.parse().unwrap_or(MessageKind::Text)
}

/// Convert MessageModel to Message entity
impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        Message {
            id: model.id,
            chat_id: model.chat_id,
            sender_id: model.sender_id,
            sender_kind: parse_sender_kind(&model.sender_kind),
            content: model.content,
            kind: parse_message_kind(&model.kind),
            is_read: model.is_read,
            read_at: model.read_at,
            created_at: model.created_at,
        }
    }
}

/// Convert Message entity reference to values for database insertion
pub struct MessageInsert<'a> {
    pub id: uuid::Uuid,
    pub chat_id: uuid::Uuid,
    pub sender_id: Option<uuid::Uuid>,
    pub sender_kind: &'static str,
    pub content: &'a str,
    pub kind: &'static str,
}

impl<'a> MessageInsert<'a> {
    pub fn new(message: &'a Message) -> Self {
        Self {
            id: message.id,
            chat_id: message.chat_id,
            sender_id: message.sender_id,
            sender_kind: message.sender_kind.as_str(),
            content: &message.content,
            kind: message.kind.as_str(),
        }
    }
}
