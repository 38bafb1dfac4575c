//! Visitor entity <-> model mapper

use livechat_core::entities::Visitor;

use crate::models::VisitorModel;

/// Convert VisitorModel to Visitor entity
impl From<VisitorModel> for Visitor {
    fn from(model: VisitorModel) -> Self {
        Visitor {
            id: model.id,
            fingerprint: model.fingerprint,
            name: model.name,
            email: model.email,
            ip_address: model.ip_address,
            user_agent: model.user_agent,
            is_blocked: model.is_blocked,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
