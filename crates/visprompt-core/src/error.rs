//! Centralized error types for visprompt.

use thiserror::Error;

/// Main error type for visprompt operations.
#[derive(Error, Debug)]
pub enum VisPromptError {
    #[error("GEMINI_API_KEY is not set. Export it with: export GEMINI_API_KEY=your-key")]
    MissingApiKey,

    #[error("Not an image media type: '{0}'")]
    InvalidMediaType(String),

    #[error("Malformed data URI: {0}")]
    InvalidDataUri(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Gemini API returned no text")]
    EmptyResponse,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for visprompt operations.
pub type VisPromptResult<T> = Result<T, VisPromptError>;

impl VisPromptError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a clipboard error.
    pub fn clipboard(msg: impl Into<String>) -> Self {
        Self::Clipboard(msg.into())
    }
}
