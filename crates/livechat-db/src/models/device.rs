//! Admin device database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for admin_devices table
#[derive(Debug, Clone, FromRow)]
pub struct AdminDeviceModel {
    pub id: Uuid,
    pub admin_id: Uuid,
    pub device_token: String,
    pub device_type: String,
    pub created_at: DateTime<Utc>,
}
