//! # Runtime Errors
//!
//! Every handler failure is reported as a [`RuntimeError`] and classified by
//! [`ErrorKind`] so callers can tell rejected requests from remote failures.

use pl_01_proof_verification::ProofError;
use pl_02_link_storage::StoreError;
use pl_04_oracle_relay::{RelayError, TransportError};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Environment override could not be parsed.
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue {
        /// Variable name.
        key: &'static str,
        /// Raw value.
        value: String,
    },

    /// Structurally invalid configuration.
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// Unknown storage codec name.
    #[error("Unknown storage codec: {0}")]
    UnknownCodec(String),

    /// Application links would expire too quickly for a production chain.
    #[error("Application link validity of {secs}s is below the production minimum of {min}s")]
    ValidityTooShort {
        /// Configured validity.
        secs: u64,
        /// Production minimum.
        min: u64,
    },
}

/// Error classes callers act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or policy-violating request; nothing changed.
    Validation,
    /// Ownership proof rejected; nothing changed.
    Proof,
    /// Transport could not deliver; nothing was persisted.
    Protocol,
    /// The oracle chain or a counterparty sent something unusable.
    Remote,
    /// Unknown link; may belong to another protocol.
    NotFound,
    /// Storage backend or codec failure.
    Internal,
}

/// Link runtime errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Request rejected.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Ownership proof rejected.
    #[error("Proof error: {0}")]
    Proof(#[from] ProofError),

    /// Transport refused the packet.
    #[error("Protocol error: {0}")]
    Protocol(#[from] TransportError),

    /// Unknown link.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Packet-level failure.
    #[error("Relay error: {0}")]
    Relay(RelayError),

    /// Storage failure.
    #[error("Store error: {0}")]
    Store(StoreError),
}

impl RuntimeError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RuntimeError::Config(_) | RuntimeError::Validation(_) => ErrorKind::Validation,
            RuntimeError::Proof(_) => ErrorKind::Proof,
            RuntimeError::Protocol(_) => ErrorKind::Protocol,
            RuntimeError::NotFound(_) => ErrorKind::NotFound,
            RuntimeError::Relay(RelayError::UnrecognizedPacket(_)) => ErrorKind::Protocol,
            RuntimeError::Relay(_) => ErrorKind::Remote,
            RuntimeError::Store(_) => ErrorKind::Internal,
        }
    }
}

impl From<StoreError> for RuntimeError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => RuntimeError::NotFound(what),
            StoreError::Validation(msg) => RuntimeError::Validation(msg),
            other => RuntimeError::Store(other),
        }
    }
}

impl From<RelayError> for RuntimeError {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::Validation(msg) => RuntimeError::Validation(msg),
            RelayError::Proof(e) => RuntimeError::Proof(e),
            RelayError::Protocol(e) => RuntimeError::Protocol(e),
            RelayError::NotFound(what) => RuntimeError::NotFound(what),
            RelayError::Store(e) => RuntimeError::Store(e),
            other => RuntimeError::Relay(other),
        }
    }
}
