//! Error types for the SEO health tool.
//!
//! - `AppError`: domain errors for extraction and input loading
//! - `Result<T>`: type alias for Results using AppError
//!
//! The scoring engine itself cannot fail; these errors belong to the
//! layers that build its inputs.

use thiserror::Error;

/// Domain-specific errors for application operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid or malformed URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse a document or input file
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Reading or writing a file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Caller supplied an unusable value
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// Create an invalid URL error
    pub fn invalid_url(url: &str, reason: impl std::fmt::Display) -> Self {
        Self::InvalidUrl(format!("{} ({})", url, reason))
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::ParseError(error.to_string())
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;
