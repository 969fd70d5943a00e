//! Error types for the controller core.

/// Failure of a list/remove/export call made through a [`crate::ResourceBinding`].
///
/// The controller never retries; every variant is terminal for the
/// invocation that produced it and is surfaced to the user through the
/// notification channel.
#[derive(Debug, thiserror::Error)]
pub enum BindingError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("server rejected request (code {code}): {message}")]
    Rejected { code: i64, message: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error(transparent)]
    Binding(#[from] BindingError),
    #[error("failed to encode list request: {0}")]
    Request(#[from] serde_json::Error),
}
