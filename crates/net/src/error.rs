//! Network error types

/// Network result type
pub type Result<T> = std::result::Result<T, Error>;

/// Generation service errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API key not configured")]
    MissingApiKey,

    #[error("Service returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Prompt blocked: {0}")]
    Blocked(String),

    #[error("Response contained no text")]
    EmptyResponse,
}
