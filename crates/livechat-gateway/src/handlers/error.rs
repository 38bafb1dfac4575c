//! Handler error types

use livechat_common::AppError;
use livechat_service::ServiceError;
use thiserror::Error;

/// Handler error type
///
/// Only connect-time authentication failures close a socket; everything else
/// is logged by the event loop and the connection continues.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Credential rejection at handshake time
    #[error("Authentication failed: {0}")]
    Auth(#[from] AppError),

    /// Failure from the service layer while handling a client event
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),
}

impl HandlerError {
    /// Get error code for logs
    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::Auth(e) => e.error_code(),
            Self::Service(e) => e.error_code(),
        }
    }
}

/// Handler result type
pub type HandlerResult<T> = Result<T, HandlerError>;
