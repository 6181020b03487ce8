//! # Shared Crypto
//!
//! Signature schemes and hash functions needed to check ownership proofs of
//! external-chain addresses.
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `ecdsa` | secp256k1 over SHA-256 | Cosmos-style accounts |
//! | `ecdsa` | secp256k1 over Keccak-256 | EVM accounts, `personal_sign` |
//! | `signatures` | Ed25519 | Solana-style accounts |
//! | `hashing` | SHA-256, Keccak-256, RIPEMD-160 | Address derivation |
//!
//! ## Security Properties
//!
//! - **secp256k1**: RFC 6979 deterministic nonces, low-S signatures only
//! - **Ed25519**: deterministic nonces, no RNG dependency for signing

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecdsa;
pub mod errors;
pub mod hashing;
pub mod signatures;

// Re-exports
pub use ecdsa::{Secp256k1KeyPair, Secp256k1PublicKey, Secp256k1Signature};
pub use errors::CryptoError;
pub use hashing::{cosmos_address, evm_address, keccak256, ripemd160, sha256};
pub use signatures::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
