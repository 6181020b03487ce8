//! # Domain Errors
//!
//! Error types for link storage.

use thiserror::Error;

/// Errors from the key-value backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KVStoreError {
    /// Backend I/O failure.
    #[error("IO error: {message}")]
    IOError {
        /// Backend message.
        message: String,
    },

    /// A batch write could not be applied.
    #[error("Batch write failed: {message}")]
    BatchFailed {
        /// Backend message.
        message: String,
    },
}

/// Errors raised by the link store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Requested record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Record failed validation or would break an index invariant.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Stored bytes could not be encoded or decoded.
    #[error("Codec error: {0}")]
    Codec(String),

    /// Backend failure.
    #[error("Storage backend error: {0}")]
    Backend(#[from] KVStoreError),
}
