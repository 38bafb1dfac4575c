//! Visitor entity - an anonymous website visitor identified by fingerprint

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Visitor entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visitor {
    pub id: Uuid,
    /// Browser fingerprint, unique per visitor
    pub fingerprint: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub is_blocked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Visitor {
    /// Create a new Visitor
    pub fn new(id: Uuid, fingerprint: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            fingerprint,
            name: None,
            email: None,
            ip_address: None,
            user_agent: None,
            is_blocked: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Display name, falling back to a fingerprint-derived label
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => {
                let mut end = 8.min(self.fingerprint.len());
                while !self.fingerprint.is_char_boundary(end) && end > 0 {
                    end -= 1;
                }
                format!("Visitor {}", &self.fingerprint[..end])
            }
        }
    }
}
