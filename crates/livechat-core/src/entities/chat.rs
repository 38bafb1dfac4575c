//! Chat entity - a conversation between a visitor and the support team

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Lifecycle state of a chat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChatStatus {
    /// Created by a visitor, no admin assigned yet
    Waiting,
    /// An admin has been assigned
    Active,
    /// Closed without resolution
    Closed,
    /// Closed as resolved
    Resolved,
}

impl ChatStatus {
    /// String form used on the wire and in the database
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Waiting => "WAITING",
            Self::Active => "ACTIVE",
            Self::Closed => "CLOSED",
            Self::Resolved => "RESOLVED",
        }
    }

    /// CLOSED and RESOLVED are terminal states
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Closed | Self::Resolved)
    }
}

impl fmt::Display for ChatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChatStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WAITING" => Ok(Self::Waiting),
            "ACTIVE" => Ok(Self::Active),
            "CLOSED" => Ok(Self::Closed),
            "RESOLVED" => Ok(Self::Resolved),
            other => Err(DomainError::InvalidEnumValue {
                kind: "ChatStatus",
                value: other.to_string(),
            }),
        }
    }
}

/// Triage priority of a chat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChatPriority {
    Low,
    Normal,
    High,
    Urgent,
}

impl ChatPriority {
    /// String form used on the wire and in the database
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Normal => "NORMAL",
            Self::High => "HIGH",
            Self::Urgent => "URGENT",
        }
    }
}

impl Default for ChatPriority {
    fn default() -> Self {
        Self::Normal
    }
}

impl fmt::Display for ChatPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChatPriority {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(Self::Low),
            "NORMAL" => Ok(Self::Normal),
            "HIGH" => Ok(Self::High),
            "URGENT" => Ok(Self::Urgent),
            other => Err(DomainError::InvalidEnumValue {
                kind: "ChatPriority",
                value: other.to_string(),
            }),
        }
    }
}

/// Chat entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chat {
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

impl Chat {
    /// Create a new Chat in the WAITING state
    pub fn new(id: Uuid, visitor_id: Uuid, subject: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            visitor_id,
            admin_id: None,
            subject,
            status: ChatStatus::Waiting,
            priority: ChatPriority::default(),
            created_at: now,
            updated_at: now,
            closed_at: None,
        }
    }

    /// Check if an admin has been assigned
    #[inline]
    pub fn is_assigned(&self) -> bool {
        self.admin_id.is_some()
    }

    /// Check if the chat can still receive messages
    #[inline]
    pub fn is_open(&self) -> bool {
        !self.status.is_terminal()
    }

    /// Assign an admin and move the chat to ACTIVE
    pub fn assign(&mut self, admin_id: Uuid) {
        self.admin_id = Some(admin_id);
        self.status = ChatStatus::Active;
        self.updated_at = Utc::now();
    }

    /// Apply a status change, stamping `closed_at` on terminal states
    pub fn set_status(&mut self, status: ChatStatus) {
        self.status = status;
        if status.is_terminal() {
            self.closed_at = Some(Utc::now());
        }
        self.updated_at = Utc::now();
    }
}
