//! FCM client for the legacy HTTP API.
//!
//! Sends `registration_ids` batches with a server-key Authorization header
//! and reads the per-token `results` array to spot dead tokens.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::error::{PushError, PushResult};
use crate::notification::{PushNotification, PushReport};
use crate::provider::PushProvider;

/// FCM caps `registration_ids` at 1000; we stay well below it
const MAX_TOKENS_PER_REQUEST: usize = 500;

/// Errors FCM reports for tokens that will never work again
const DEAD_TOKEN_ERRORS: [&str; 2] = ["NotRegistered", "InvalidRegistration"];

/// FCM push client
#[derive(Clone)]
pub struct FcmClient {
    client: reqwest::Client,
    endpoint: String,
    server_key: String,
}

impl FcmClient {
    /// Create a new FCM client
    #[must_use]
    pub fn new(endpoint: impl Into<String>, server_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            server_key: server_key.into(),
        }
    }

    /// Create a client from push config; `None` when no server key is set
    #[must_use]
    pub fn from_config(config: &livechat_common::PushConfig) -> Option<Self> {
        config
            .fcm_server_key
            .as_ref()
            .map(|key| Self::new(&config.fcm_endpoint, key))
    }

    async fn send_batch(
        &self,
        tokens: &[String],
        notification: &PushNotification,
    ) -> PushResult<PushReport> {
        let payload = json!({
            "registration_ids": tokens,
            "notification": {
                "title": notification.title,
                "body": notification.body,
            },
            "data": notification.data,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("key={}", self.server_key))
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(PushError::Endpoint { status, body });
        }

        let fcm: FcmResponse = response.json().await?;
        let report = report_from_response(tokens, &fcm);

        tracing::debug!(
            tokens = tokens.len(),
            success = report.success,
            failure = report.failure,
            invalid = report.invalid_tokens.len(),
            "Sent FCM batch"
        );

        Ok(report)
    }
}

impl std::fmt::Debug for FcmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FcmClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PushProvider for FcmClient {
    async fn send_to_tokens(
        &self,
        tokens: &[String],
        notification: &PushNotification,
    ) -> PushResult<PushReport> {
        let mut report = PushReport::default();

        for chunk in tokens.chunks(MAX_TOKENS_PER_REQUEST) {
            let batch = self.send_batch(chunk, notification).await?;
            report.merge(batch);
        }

        Ok(report)
    }
}

/// Response body of the legacy send endpoint
#[derive(Debug, Deserialize)]
struct FcmResponse {
    #[serde(default)]
    success: u32,
    #[serde(default)]
    failure: u32,
    /// Per-token outcomes, in request order
    #[serde(default)]
    results: Vec<FcmTokenResult>,
}

#[derive(Debug, Deserialize)]
struct FcmTokenResult {
    #[serde(default)]
    error: Option<String>,
}

fn report_from_response(tokens: &[String], response: &FcmResponse) -> PushReport {
    let mut report = PushReport {
        success: response.success,
        failure: response.failure,
        invalid_tokens: Vec::new(),
    };

    for (token, result) in tokens.iter().zip(&response.results) {
        if let Some(error) = &result.error {
            if DEAD_TOKEN_ERRORS.contains(&error.as_str()) {
                report.invalid_tokens.push(token.clone());
            }
        }
    }

    report
}
