//! # PL-01 Proof Verification
//!
//! Checks that a profile owner controls an address on another chain.
//!
//! **Subsystem ID:** 1  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Verification Steps
//!
//! | Step | Failure |
//! |------|---------|
//! | Re-derive the address from the proof key under the claimed encoding | `AddressMismatch` |
//! | Verify the signature (recursively for multisig, honouring the threshold) | `InvalidSignature` |
//! | Check the signed plain text is the mandated content for the owner | `UnexpectedPlainText` |
//!
//! ## Module Structure
//!
//! ```text
//! pl-01-proof-verification/
//! ├── domain/          # AddressData, PublicKey, Proof, SignatureData, errors
//! ├── ports/           # ProofVerificationApi
//! └── service.rs       # ProofVerifier
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use domain::{
    eip55_checksum, personal_sign_message, AddressData, ChainConfig, Proof, ProofError, PublicKey,
    SignatureData, SignatureValueType,
};
pub use ports::ProofVerificationApi;
pub use service::ProofVerifier;
