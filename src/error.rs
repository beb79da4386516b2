//! Error types for Debrief.

use thiserror::Error;

/// Library-level error type for Debrief operations.
#[derive(Error, Debug)]
pub enum DebriefError {
    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Embedding model failed to initialize: {0}")]
    ModelInit(String),

    #[error("Embedding dimension mismatch at position {position}: expected {expected}, found {found}")]
    DimensionMismatch {
        expected: usize,
        found: usize,
        position: usize,
    },

    #[error("No transcript has been indexed yet")]
    IndexNotReady,

    #[error("Retrieval failed: {0}")]
    Retrieval(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("Insight generation failed: {0}")]
    Insights(String),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMedia(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias for Debrief operations.
pub type Result<T> = std::result::Result<T, DebriefError>;
