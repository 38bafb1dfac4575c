//! Message entity - a single message inside a chat

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SenderKind {
    Visitor,
    Admin,
    System,
}

impl SenderKind {
    /// String form used on the wire and in the database
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Visitor => "VISITOR",
            Self::Admin => "ADMIN",
            Self::System => "SYSTEM",
        }
    }
}

impl fmt::Display for SenderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SenderKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VISITOR" => Ok(Self::Visitor),
            "ADMIN" => Ok(Self::Admin),
            "SYSTEM" => Ok(Self::System),
            other => Err(DomainError::InvalidEnumValue {
                kind: "SenderKind",
                value: other.to_string(),
            }),
        }
    }
}

/// Payload type of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MessageKind {
    Text,
    Image,
    File,
    Emoji,
    System,
}

impl MessageKind {
    /// String form used on the wire and in the database
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Image => "IMAGE",
            Self::File => "FILE",
            Self::Emoji => "EMOJI",
            Self::System => "SYSTEM",
        }
    }
}

impl Default for MessageKind {
    fn default() -> Self {
        Self::Text
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TEXT" => Ok(Self::Text),
            "IMAGE" => Ok(Self::Image),
            "FILE" => Ok(Self::File),
            "EMOJI" => Ok(Self::Emoji),
            "SYSTEM" => Ok(Self::System),
            other => Err(DomainError::InvalidEnumValue {
                kind: "MessageKind",
                value: other.to_string(),
            }),
        }
    }
}

/// Message entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Uuid,
    pub chat_id: Uuid,
    /// Admin id for admin messages; None for visitor and system messages
    pub sender_id: Option<Uuid>,
    pub sender_kind: SenderKind,
    pub content: String,
    pub kind: MessageKind,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new unread Message
    pub fn new(
        id: Uuid,
        chat_id: Uuid,
        sender_id: Option<Uuid>,
        sender_kind: SenderKind,
        content: String,
        kind: MessageKind,
    ) -> Self {
        Self {
            id,
            chat_id,
            sender_id,
            sender_kind,
            content,
            kind,
            is_read: false,
            read_at: None,
            created_at: Utc::now(),
        }
    }

    /// Check if message was sent by the visitor side
    #[inline]
    pub fn is_from_visitor(&self) -> bool {
        self.sender_kind == SenderKind::Visitor
    }

    /// Check if message content is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Mark as read. Read state is monotonic: a second call is a no-op
    /// and `read_at` keeps its original timestamp.
    pub fn mark_read(&mut self, at: DateTime<Utc>) {
        if !self.is_read {
            self.is_read = true;
            self.read_at = Some(at);
        }
    }
}
