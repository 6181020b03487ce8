//! Domain layer for Proof Verification.

pub mod address;
pub mod errors;
pub mod keys;
pub mod proof;

pub use address::{eip55_checksum, AddressData};
pub use errors::ProofError;
pub use keys::PublicKey;
pub use proof::{personal_sign_message, ChainConfig, Proof, SignatureData, SignatureValueType};
