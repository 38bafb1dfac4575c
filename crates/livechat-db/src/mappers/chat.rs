//! Chat entity <-> model mapper

use livechat_core::entities::{Chat, ChatPriority, ChatStatus};

use crate::models::ChatModel;

/// Convert a database status string to ChatStatus, falling back to WAITING
/// for values the CHECK constraint should already exclude
fn parse_status(status: &str) -> ChatStatus {
    status.parse().unwrap_or(ChatStatus::Waiting)
}

/// Convert a database priority string to ChatPriority
fn parse_priority(priority: &str) -> ChatPriority {
    priority.parse().unwrap_or(ChatPriority::Normal)
}

/// Convert ChatModel to Chat entity
impl From<ChatModel> for Chat {
    fn from(model: ChatModel) -> Self {
        Chat {
            id: model.id,
            visitor_id: model.visitor_id,
            admin_id: model.admin_id,
            subject: model.subject,
            status: parse_status(&model.status),
            priority: parse_priority(&model.priority),
            created_at: model.created_at,
            updated_at: model.updated_at,
            closed_at: model.closed_at,
        }
    }
}

/// Convert Chat entity reference to values for database insertion
pub struct ChatInsert<'a> {
    pub id: uuid::Uuid,
    pub visitor_id: uuid::Uuid,
    pub admin_id: Option<uuid::Uuid>,
    pub subject: Option<&'a str>,
    pub status: &'static str,
    pub priority: &'static str,
}

impl<'a> ChatInsert<'a> {
    pub fn new(chat: &'a Chat) -> Self {
        Self {
            id: chat.id,
            visitor_id: chat.visitor_id,
            admin_id: chat.admin_id,
            subject: chat.subject.as_deref(),
            status: chat.status.as_str(),
            priority: chat.priority.as_str(),
        }
    }
}
