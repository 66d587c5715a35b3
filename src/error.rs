//! Error types for Lese.

use thiserror::Error;

/// Library-level error type for Lese operations.
///
/// Every failure is scoped to one session or one chat turn; nothing here
/// should take the process down.
#[derive(Error, Debug)]
pub enum LeseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("Vector index error: {0}")]
    Index(String),

    #[error("Completion failed: {0}")]
    Completion(String),

    #[error("Session not found: {0}. Upload a document to start a new session.")]
    SessionNotFound(uuid::Uuid),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Lese operations.
pub type Result<T> = std::result::Result<T, LeseError>;
