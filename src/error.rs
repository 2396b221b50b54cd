//! Error types for Skrift.

use thiserror::Error;

/// Library-level error type for Skrift operations.
#[derive(Error, Debug)]
pub enum SkriftError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Audio processing failed: {0}")]
    Audio(String),

    #[error("Gemini API error: {0}")]
    Gemini(String),

    #[error("Transcription unavailable: {0}")]
    Transcription(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Skrift operations.
pub type Result<T> = std::result::Result<T, SkriftError>;
