//! Chat database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for chats table
#[derive(Debug, Clone, FromRow)]
pub struct ChatModel {
    pub id: Uuid,
    pub visitor_id: Uuid,
    pub admin_id: Option<Uuid>,
    pub subject: Option<String>,
    pub status: String,
    pub priority: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl ChatModel {
    /// Check if an admin is assigned
    #[inline]
    pub fn is_assigned(&self) -> bool {
        self.admin_id.is_some()
    }

    /// Check if the chat has been closed out
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed_at.is_some()
    }
}
