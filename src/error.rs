//! Custom error types for Off The Books
//!
//! This module defines the error hierarchy for the application using thiserror.
//! Import validation failures are not errors in this sense: the pipeline
//! reports those as [`crate::import::ImportError`] values.

use thiserror::Error;

/// The main error type for Off The Books operations
#[derive(Error, Debug)]
pub enum OtbError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Validation errors for user-supplied options
    #[error("Validation error: {0}")]
    Validation(String),

    /// Import errors outside the pipeline (missing files, bad review documents)
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl OtbError {
    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for OtbError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for OtbError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for OtbError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

/// Result type alias for Off The Books operations
pub type OtbResult<T> = Result<T, OtbError>;
