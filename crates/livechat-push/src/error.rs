//! Error type for push delivery

/// Error type for push operations
#[derive(Debug, thiserror::Error)]
pub enum PushError {
    #[error("Push request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Push endpoint returned {status}: {body}")]
    Endpoint { status: u16, body: String },
}

/// Result type for push operations
pub type PushResult<T> = Result<T, PushError>;
