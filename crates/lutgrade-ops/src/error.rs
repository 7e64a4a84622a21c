//! Error types for the grading pipeline.

use thiserror::Error;

/// Error type for grading operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid dimensions specified.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Buffer length does not match its declared size.
    #[error("size mismatch: {0}")]
    SizeMismatch(String),

    /// Parameter outside its documented range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Malformed YAML config.
    #[error("config parse error: {0}")]
    Config(#[from] serde_yaml::Error),

    /// I/O error reading a config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for grading operations.
pub type OpsResult<T> = Result<T, OpsError>;
