//! AdminDevice entity - a push-notification target registered by an admin

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A registered admin device token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminDevice {
    pub id: Uuid,
    pub admin_id: Uuid,
    /// Provider push token, unique across devices
    pub device_token: String,
    /// Platform label, e.g. "web", "android", "ios"
    pub device_type: String,
    pub created_at: DateTime<Utc>,
}

impl AdminDevice {
    /// Create a new AdminDevice
    pub fn new(id: Uuid, admin_id: Uuid, device_token: String, device_type: String) -> Self {
        Self {
            id,
            admin_id,
            device_token,
            device_type,
            created_at: Utc::now(),
        }
    }
}
