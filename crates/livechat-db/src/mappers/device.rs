//! Admin device entity <-> model mapper

use livechat_core::entities::AdminDevice;

use crate::models::AdminDeviceModel;

/// Convert AdminDeviceModel to AdminDevice entity
impl From<AdminDeviceModel> for AdminDevice {
    fn from(model: AdminDeviceModel) -> Self {
        AdminDevice {
            id: model.id,
            admin_id: model.admin_id,
            device_token: model.device_token,
            device_type: model.device_type,
            created_at: model.created_at,
        }
    }
}
