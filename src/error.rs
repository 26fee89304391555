// src/error.rs

//! Error types for the cookbook crate
//!
//! Only storage and I/O failures are errors. Bad filter input and malformed
//! nutrient blobs degrade to "no constraint" / empty mapping instead.

use thiserror::Error;

/// Crate-wide error type
#[derive(Debug, Error)]
pub enum Error {
    /// SQLite failure (open, prepare, query, row decode)
    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    /// Filesystem failure
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Dataset could not be parsed
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Database could not be initialized
    #[error("Initialization error: {0}")]
    InitError(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ParseError(err.to_string())
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
