//! Error types for mail-triage.

use std::time::Duration;

/// Top-level error type for the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Classification error: {0}")]
    Classify(#[from] ClassifyError),

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Input validation errors — all surfaced to the user, never fatal.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Unsupported file type: {mime}. Only plain text and PDF are accepted")]
    UnsupportedType { mime: String },

    #[error("File too large: {size} bytes (maximum {limit})")]
    TooLarge { size: usize, limit: usize },

    #[error("No email content provided: supply text or attach a file")]
    EmptyInput,
}

/// Classification service errors.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("Network error reaching classification service: {0}")]
    Network(String),

    #[error("Classification service returned {status}: {message}")]
    Service { status: u16, message: String },

    #[error("Invalid response from classification service: {0}")]
    InvalidResponse(String),

    #[error("Classification timed out after {after:?}")]
    Timeout { after: Duration },

    #[error("Classification cancelled")]
    Cancelled,

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractError),
}

/// Text extraction errors.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("File is not valid UTF-8 text: {0}")]
    Encoding(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Pipeline-stage errors — what a single trigger can fail with.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Classification failed: {0}")]
    Classify(#[from] ClassifyError),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
