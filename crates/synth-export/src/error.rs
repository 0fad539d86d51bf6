//! Error types for JSON export and reading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing or reading dataset files.
#[derive(Error, Debug)]
pub enum ExportError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A collection file did not hold a JSON array.
    #[error("Expected a JSON array in {}", .0.display())]
    NotAnArray(PathBuf),

    /// Session chunk size of zero.
    #[error("Session chunk size must be greater than zero")]
    InvalidChunkSize,
}
