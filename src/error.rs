//! Error types for NestKV
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using NestError
pub type Result<T> = std::result::Result<T, NestError>;

/// Unified error type for NestKV operations
#[derive(Debug, Error)]
pub enum NestError {
    // -------------------------------------------------------------------------
    // Key Errors
    // -------------------------------------------------------------------------
    #[error("invalid key: {0:?}")]
    InvalidKey(String),

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    #[error("entry decode failed: {0}")]
    Decode(String),

    #[error("value encode failed: {0}")]
    Encode(String),

    // -------------------------------------------------------------------------
    // Lookup Errors
    // -------------------------------------------------------------------------
    #[error("entry not found")]
    EntryNotFound,

    #[error("value not found")]
    ValueNotFound,

    // -------------------------------------------------------------------------
    // Type Errors
    // -------------------------------------------------------------------------
    #[error("can't convert type: expected {expected}, got {actual}")]
    TypeConversion {
        expected: &'static str,
        actual: &'static str,
    },
}
