//! # ECDSA Signatures (secp256k1)
//!
//! secp256k1 keys in the two digest flavours linked accounts use:
//!
//! - **SHA-256** for Cosmos SDK accounts (`Secp256k1PublicKey::verify`)
//! - **Keccak-256** for EVM accounts (`Secp256k1PublicKey::verify_keccak`)
//!
//! Signatures are 64-byte `r || s`. EVM wallets append a recovery byte `v`;
//! it is accepted and ignored since the public key is always supplied.

use crate::hashing::keccak256;
use crate::CryptoError;
use k256::ecdsa::{
    signature::hazmat::{PrehashSigner, PrehashVerifier},
    signature::{Signer, Verifier},
    Signature, SigningKey, VerifyingKey,
};
use zeroize::Zeroize;

/// secp256k1 public key, held in compressed SEC1 form (33 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Secp256k1PublicKey([u8; 33]);

impl Secp256k1PublicKey {
    /// Parse a compressed (33 bytes) or uncompressed (65 bytes) SEC1 key.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != 33 && bytes.len() != 65 {
            return Err(CryptoError::InvalidKeyLength {
                expected: "33 or 65",
                actual: bytes.len(),
            });
        }
        let key = VerifyingKey::from_sec1_bytes(bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self::from_verifying_key(&key))
    }

    fn from_verifying_key(key: &VerifyingKey) -> Self {
        let point = key.to_encoded_point(true);
        let mut bytes = [0u8; 33];
        bytes.copy_from_slice(point.as_bytes());
        Self(bytes)
    }

    fn verifying_key(&self) -> Result<VerifyingKey, CryptoError> {
        VerifyingKey::from_sec1_bytes(&self.0).map_err(|_| CryptoError::InvalidPublicKey)
    }

    /// Compressed SEC1 bytes.
    pub fn to_compressed(&self) -> [u8; 33] {
        self.0
    }

    /// Uncompressed SEC1 bytes (`0x04 || x || y`).
    pub fn to_uncompressed(&self) -> Result<[u8; 65], CryptoError> {
        let point = self.verifying_key()?.to_encoded_point(false);
        let mut bytes = [0u8; 65];
        bytes.copy_from_slice(point.as_bytes());
        Ok(bytes)
    }

    /// Verify a signature over `sha256(message)`.
    pub fn verify(
        &self,
        message: &[u8],
        signature: &Secp256k1Signature,
    ) -> Result<(), CryptoError> {
        let sig = signature.to_k256()?;
        self.verifying_key()?
            .verify(message, &sig)
            .map_err(|_| CryptoError::SignatureVerificationFailed)
    }

    /// Verify a signature over `keccak256(message)`.
    pub fn verify_keccak(
        &self,
        message: &[u8],
        signature: &Secp256k1Signature,
    ) -> Result<(), CryptoError> {
        let sig = signature.to_k256()?;
        self.verifying_key()?
            .verify_prehash(&keccak256(message), &sig)
            .map_err(|_| CryptoError::SignatureVerificationFailed)
    }
}

/// ECDSA signature (64 bytes, r||s format).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Secp256k1Signature([u8; 64]);

impl Secp256k1Signature {
    /// Parse `r || s`, optionally followed by an EVM recovery byte.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let rs = match bytes.len() {
            64 => bytes,
            65 => &bytes[..64],
            other => {
                return Err(CryptoError::InvalidSignatureFormat(format!(
                    "expected 64 or 65 bytes, got {other}"
                )))
            }
        };
        let mut out = [0u8; 64];
        out.copy_from_slice(rs);
        Ok(Self(out))
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    fn to_k256(self) -> Result<Signature, CryptoError> {
        Signature::from_slice(&self.0)
            .map_err(|e| CryptoError::InvalidSignatureFormat(e.to_string()))
    }
}

/// secp256k1 ECDSA keypair.
pub struct Secp256k1KeyPair {
    signing_key: SigningKey,
}

impl Secp256k1KeyPair {
    /// Generate random keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        Self { signing_key }
    }

    /// Create from secret key bytes (32 bytes).
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, CryptoError> {
        let signing_key =
            SigningKey::from_bytes((&bytes).into()).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// Public key of this pair.
    pub fn public_key(&self) -> Secp256k1PublicKey {
        Secp256k1PublicKey::from_verifying_key(self.signing_key.verifying_key())
    }

    /// Sign `sha256(message)` (deterministic RFC 6979).
    pub fn sign(&self, message: &[u8]) -> Secp256k1Signature {
        let sig: Signature = self.signing_key.sign(message);
        Secp256k1Signature(sig.to_bytes().into())
    }

    /// Sign `keccak256(message)`.
    pub fn sign_keccak(&self, message: &[u8]) -> Result<Secp256k1Signature, CryptoError> {
        let sig: Signature = self
            .signing_key
            .sign_prehash(&keccak256(message))
            .map_err(|e| CryptoError::InvalidSignatureFormat(e.to_string()))?;
        Ok(Secp256k1Signature(sig.to_bytes().into()))
    }
}

impl Drop for Secp256k1KeyPair {
    fn drop(&mut self) {
        let mut bytes: [u8; 32] = self.signing_key.to_bytes().into();
        bytes.zeroize();
    }
}
