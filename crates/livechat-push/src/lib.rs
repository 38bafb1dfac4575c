//! # livechat-push
//!
//! Push notification delivery for admin devices.
//!
//! ## Features
//!
//! - **Provider trait**: backends implement [`PushProvider`] and report
//!   per-token outcomes
//! - **FCM**: legacy HTTP API client with 500-token batching and dead-token
//!   detection
//!
//! ## Example
//!
//! ```ignore
//! use livechat_push::{FcmClient, PushNotification, PushProvider};
//!
//! let client = FcmClient::new("https://fcm.googleapis.com/fcm/send", server_key);
//! let notification = PushNotification::new("New Message", "A visitor needs help")
//!     .with_data(serde_json::json!({ "chatId": chat_id }));
//!
//! let report = client.send_to_tokens(&tokens, &notification).await?;
//! println!("delivered {} / failed {}", report.success, report.failure);
//! ```

pub mod error;
pub mod fcm;
pub mod notification;
pub mod provider;

// Re-export the public surface
pub use error::{PushError, PushResult};
pub use fcm::FcmClient;
pub use notification::{PushNotification, PushReport};
pub use provider::PushProvider;
