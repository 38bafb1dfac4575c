//! PostgreSQL implementation of DeviceRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use livechat_core::entities::AdminDevice;
use livechat_core::traits::{DeviceRepository, RepoResult};

use crate::models::AdminDeviceModel;

use super::error::map_db_error;

const DEVICE_COLUMNS: &str = "id, admin_id, device_token, device_type, created_at";

/// PostgreSQL implementation of DeviceRepository
#[derive(Clone)]
pub struct PgDeviceRepository {
    pool: PgPool,
}

impl PgDeviceRepository {
    /// Create a new PgDeviceRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeviceRepository for PgDeviceRepository {
    #[instrument(skip(self))]
    async fn register(&self, device: &AdminDevice) -> RepoResult<()> {
        // Re-registering a token moves it to the registering admin
        sqlx::query(
            r"
            INSERT INTO admin_devices (id, admin_id, device_token, device_type, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (device_token)
            DO UPDATE SET admin_id = EXCLUDED.admin_id, device_type = EXCLUDED.device_type
            ",
        )
        .bind(device.id)
        .bind(device.admin_id)
        .bind(&device.device_token)
        .bind(&device.device_type)
        .bind(device.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<AdminDevice>> {
        let results = sqlx::query_as::<_, AdminDeviceModel>(&format!(
            "SELECT {DEVICE_COLUMNS} FROM admin_devices ORDER BY created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(AdminDevice::from).collect())
    }

    #[instrument(skip(self))]
    async fn delete_by_tokens(&self, tokens: &[String]) -> RepoResult<u64> {
        if tokens.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query("DELETE FROM admin_devices WHERE device_token = ANY($1)")
            .bind(tokens)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
