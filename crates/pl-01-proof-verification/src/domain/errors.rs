//! # Domain Errors
//!
//! Every way an ownership proof can be rejected.

use shared_crypto::CryptoError;
use shared_types::IdentifierError;
use thiserror::Error;

/// Proof verification errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProofError {
    /// The address recomputed from the proof key differs from the claimed one.
    #[error("Address mismatch: expected {expected}, derived {derived}")]
    AddressMismatch {
        /// Address claimed by the caller.
        expected: String,
        /// Address derived from the proof public key.
        derived: String,
    },

    /// The signature does not verify against the plain text.
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    /// The signed plain text is not the value the protocol mandates.
    #[error("Unexpected plain text: expected {expected}, got {actual}")]
    UnexpectedPlainText {
        /// Content that had to be signed.
        expected: String,
        /// Content that was signed.
        actual: String,
    },

    /// Plain text is blank or not valid hex.
    #[error("Invalid hex-encoded plain text")]
    InvalidPlainTextEncoding,

    /// Address data failed structural validation.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Chain config failed validation.
    #[error("Invalid chain config: {0}")]
    InvalidChainConfig(String),

    /// Multisig signature shape does not fit the multisig key.
    #[error("Multisig mismatch: {0}")]
    MultisigMismatch(String),

    /// The key type cannot be used with the requested operation.
    #[error("Unsupported key: {0}")]
    UnsupportedKey(String),
}

impl From<CryptoError> for ProofError {
    fn from(err: CryptoError) -> Self {
        ProofError::InvalidSignature(err.to_string())
    }
}

impl From<IdentifierError> for ProofError {
    fn from(err: IdentifierError) -> Self {
        ProofError::InvalidAddress(err.to_string())
    }
}
