//! Error types for ncpr-index
//!
//! Provides a unified error type for all operations.
//!
//! "No data" is never an error: a missing shard, a missing suffix and the
//! decode sentinel are all plain `None` values.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using NcprError
pub type Result<T> = std::result::Result<T, NcprError>;

/// Unified error type for ncpr-index operations
#[derive(Debug, Error)]
pub enum NcprError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read shard {}: {source}", path.display())]
    ShardRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Shard Errors
    // -------------------------------------------------------------------------
    #[error("Corrupt shard {}: {reason}", path.display())]
    CorruptShard { path: PathBuf, reason: String },

    // -------------------------------------------------------------------------
    // Input Errors
    // -------------------------------------------------------------------------
    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // -------------------------------------------------------------------------
    // Server Errors
    // -------------------------------------------------------------------------
    #[error("Server error: {0}")]
    Server(String),
}
