//! Transport error type and its mapping into the core's binding error.

use listdeck_core::BindingError;

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected response: {0}")]
    InvalidResponse(String),
    #[error("server rejected request (code {code}): {message}")]
    Rejected { code: i64, message: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(String),
}

impl From<ApiClientError> for BindingError {
    fn from(err: ApiClientError) -> Self {
        match err {
            ApiClientError::Rejected { code, message } => BindingError::Rejected { code, message },
            ApiClientError::InvalidResponse(message) => BindingError::Decode(message),
            other => BindingError::Transport(other.to_string()),
        }
    }
}
