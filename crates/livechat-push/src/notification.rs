//! Notification payload and delivery report types

use serde::Serialize;

/// A push notification to deliver to device tokens
#[derive(Debug, Clone, Serialize)]
pub struct PushNotification {
    /// Notification title
    pub title: String,
    /// Notification body text
    pub body: String,
    /// Extra key-value payload delivered alongside the notification
    pub data: serde_json::Value,
}

impl PushNotification {
    /// Create a notification with an empty data payload
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            data: serde_json::json!({}),
        }
    }

    /// Attach a data payload
    #[must_use]
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }
}

/// Outcome of a delivery attempt, aggregated across batches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushReport {
    /// Tokens the provider accepted
    pub success: u32,
    /// Tokens the provider rejected or failed to reach
    pub failure: u32,
    /// Tokens the provider marked permanently dead; callers should
    /// deregister these
    pub invalid_tokens: Vec<String>,
}

impl PushReport {
    /// Fold another batch's report into this one
    pub fn merge(&mut self, other: PushReport) {
        self.success += other.success;
        self.failure += other.failure;
        self.invalid_tokens.extend(other.invalid_tokens);
    }
}
