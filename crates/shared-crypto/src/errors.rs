//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Invalid key length
    #[error("Invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected key length in bytes
        expected: &'static str,
        /// Actual key length in bytes
        actual: usize,
    },

    /// Public key bytes do not encode a curve point
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Secret key bytes are out of range for the curve
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// Signature bytes are malformed
    #[error("Invalid signature format: {0}")]
    InvalidSignatureFormat(String),

    /// Signature is well formed but does not verify
    #[error("Signature verification failed")]
    SignatureVerificationFailed,
}
