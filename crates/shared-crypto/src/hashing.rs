//! # Hashing
//!
//! Digest helpers and the two account-address derivations built on them.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use sha3::Keccak256;

/// SHA-256 digest.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Keccak-256 digest (the pre-standard SHA-3 variant used by Ethereum).
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// RIPEMD-160 digest.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(data).into()
}

/// Cosmos account address bytes: `ripemd160(sha256(compressed_key))`.
pub fn cosmos_address(compressed_key: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(compressed_key))
}

/// EVM address bytes: last 20 bytes of `keccak256(uncompressed_key[1..])`.
///
/// `uncompressed_key` is the 65-byte SEC1 encoding; the leading `0x04` tag
/// is skipped when present.
pub fn evm_address(uncompressed_key: &[u8]) -> [u8; 20] {
    let body = match uncompressed_key.first() {
        Some(0x04) if uncompressed_key.len() == 65 => &uncompressed_key[1..],
        _ => uncompressed_key,
    };
    let hash = keccak256(body);
    let mut out = [0u8; 20];
    out.copy_from_slice(&hash[12..]);
    out
}
