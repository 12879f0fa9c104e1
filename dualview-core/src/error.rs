//! Error types for dualview

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for dualview operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias for dualview operations
pub type Result<T> = std::result::Result<T, Error>;
