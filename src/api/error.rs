use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Api {
        status: StatusCode,
        message: String,
    },

    #[error("invalid API base URL: {0}")]
    BaseUrl(String),
}

impl ApiError {
    /// Error with the server-provided message, or a generic fallback built
    /// from the status code when the body carries none.
    pub fn from_status(status: StatusCode, body_message: Option<String>) -> Self {
        let message = body_message.unwrap_or_else(|| {
            format!(
                "server returned {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status")
            )
        });
        Self::Api { status, message }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
