//! Push service
//!
//! Delivers notifications to registered admin devices and keeps the device
//! table clean by dropping tokens the provider declared dead.

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use livechat_core::AdminDevice;
use livechat_push::PushNotification;

use crate::dto::RegisterDeviceRequest;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Push service
pub struct PushService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PushService<'a> {
    /// Create a new PushService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a device token for an admin. Re-registering an existing
    /// token moves it to the registering admin.
    #[instrument(skip(self, request))]
    pub async fn register_device(&self, request: RegisterDeviceRequest) -> ServiceResult<()> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let admin_id = request.admin_id;
        let device = AdminDevice::new(
            Uuid::new_v4(),
            admin_id,
            request.device_token,
            request.device_type,
        );
        self.ctx.device_repo().register(&device).await?;

        info!(admin_id = %admin_id, device_type = %device.device_type, "Device registered");
        Ok(())
    }

    /// Send a notification to every registered admin device.
    ///
    /// This never fails the caller: push is best-effort and must not abort
    /// the message pipeline. Missing provider, missing devices, and delivery
    /// errors all end here with a log line. Tokens the provider reports as
    /// dead are deleted before returning.
    #[instrument(skip(self, notification))]
    pub async fn notify_admins(&self, notification: PushNotification) {
        let Some(provider) = self.ctx.push_provider() else {
            debug!("Push provider not configured, skipping notification");
            return;
        };

        let devices = match self.ctx.device_repo().find_all().await {
            Ok(devices) => devices,
            Err(e) => {
                warn!(error = %e, "Failed to load admin devices");
                return;
            }
        };
        if devices.is_empty() {
            debug!("No admin devices registered");
            return;
        }

        let tokens: Vec<String> = devices.into_iter().map(|d| d.device_token).collect();

        let report = match provider.send_to_tokens(&tokens, &notification).await {
            Ok(report) => report,
            Err(e) => {
                warn!(error = %e, "Push delivery failed");
                return;
            }
        };

        info!(
            success = report.success,
            failure = report.failure,
            "Push notifications sent"
        );

        if !report.invalid_tokens.is_empty() {
            match self
                .ctx
                .device_repo()
                .delete_by_tokens(&report.invalid_tokens)
                .await
            {
                Ok(deleted) => info!(count = deleted, "Removed dead device tokens"),
                Err(e) => warn!(error = %e, "Failed to remove dead device tokens"),
            }
        }
    }
}
