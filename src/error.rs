//! Error types for the Pilum library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`PilumError`] enum.
//!
//! # Examples
//!
//! ```
//! use pilum::error::{PilumError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(PilumError::bad_query("unbalanced quote"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Pilum operations.
#[derive(Error, Debug)]
pub enum PilumError {
    /// I/O errors (file operations while writing or reading an index).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Index-related errors (out-of-order indexing, missing or malformed index files).
    #[error("Index error: {0}")]
    Index(String),

    /// The query string could not be parsed.
    #[error("Bad query: {0}")]
    BadQuery(String),

    /// Analysis-related errors (normalization, corpus loading).
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Storage-related errors (decoding the on-disk format).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with PilumError.
pub type Result<T> = std::result::Result<T, PilumError>;

impl PilumError {
    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        PilumError::Index(msg.into())
    }

    /// Create a new bad query error.
    pub fn bad_query<S: Into<String>>(msg: S) -> Self {
        PilumError::BadQuery(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        PilumError::Analysis(msg.into())
    }

    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        PilumError::Storage(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        PilumError::Config(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        PilumError::Other(msg.into())
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        PilumError::Other(format!("Not found: {}", msg.into()))
    }

    /// Whether this error was caused by a malformed query string.
    pub fn is_bad_query(&self) -> bool {
        matches!(self, PilumError::BadQuery(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = PilumError::index("Test index error");
        assert_eq!(error.to_string(), "Index error: Test index error");

        let error = PilumError::bad_query("unbalanced quote");
        assert_eq!(error.to_string(), "Bad query: unbalanced quote");
        assert!(error.is_bad_query());

        let error = PilumError::storage("truncated postings");
        assert_eq!(error.to_string(), "Storage error: truncated postings");
        assert!(!error.is_bad_query());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let pilum_error = PilumError::from(io_error);

        match pilum_error {
            PilumError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
