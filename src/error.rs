//! Error types for Skape.

use thiserror::Error;

/// Library-level error type for Skape operations.
#[derive(Error, Debug)]
pub enum SkapeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Malformed storage reference: {0}")]
    MalformedReference(String),

    #[error("Task submission failed: {0}")]
    Submission(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Agent error: {0}")]
    Agent(String),
}

/// Result type alias for Skape operations.
pub type Result<T> = std::result::Result<T, SkapeError>;
