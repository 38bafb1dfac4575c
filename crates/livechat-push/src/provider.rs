//! Push provider trait

use async_trait::async_trait;

use crate::error::PushResult;
use crate::notification::{PushNotification, PushReport};

/// A push delivery backend.
///
/// Implementations take care of batching and report per-token outcomes so
/// callers can prune tokens the provider declared dead.
#[async_trait]
pub trait PushProvider: Send + Sync {
    /// Deliver a notification to the given device tokens
    async fn send_to_tokens(
        &self,
        tokens: &[String],
        notification: &PushNotification,
    ) -> PushResult<PushReport>;
}
