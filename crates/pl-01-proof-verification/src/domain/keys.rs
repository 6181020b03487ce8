//! # Public Keys
//!
//! Closed set of key schemes a proof may carry. Each scheme knows how to
//! verify a signature and which bytes its addresses are derived from.

use super::errors::ProofError;
use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use shared_crypto::{
    cosmos_address, evm_address, sha256, Ed25519PublicKey, Ed25519Signature, Secp256k1PublicKey,
    Secp256k1Signature,
};

/// Public key of an external-chain account.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicKey {
    /// Cosmos SDK secp256k1 key; signatures are over SHA-256.
    Secp256k1 {
        /// SEC1 key bytes (compressed or uncompressed).
        #[serde_as(as = "Hex")]
        key: Vec<u8>,
    },
    /// EVM secp256k1 key; signatures are over Keccak-256.
    EthSecp256k1 {
        /// SEC1 key bytes (compressed or uncompressed).
        #[serde_as(as = "Hex")]
        key: Vec<u8>,
    },
    /// Ed25519 key.
    Ed25519 {
        /// 32 key bytes.
        #[serde_as(as = "Hex")]
        key: Vec<u8>,
    },
    /// Threshold multisig over sub-keys.
    Multisig {
        /// Minimum number of sub-signatures.
        threshold: u32,
        /// Ordered sub-keys.
        public_keys: Vec<PublicKey>,
    },
}

impl PublicKey {
    /// Short scheme name.
    pub fn scheme(&self) -> &'static str {
        match self {
            PublicKey::Secp256k1 { .. } => "secp256k1",
            PublicKey::EthSecp256k1 { .. } => "eth_secp256k1",
            PublicKey::Ed25519 { .. } => "ed25519",
            PublicKey::Multisig { .. } => "multisig",
        }
    }

    /// Verify a single signature over `message`.
    ///
    /// Multisig keys are verified through `SignatureData::Multi`, never here.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<(), ProofError> {
        match self {
            PublicKey::Secp256k1 { key } => {
                let key = Secp256k1PublicKey::from_slice(key)?;
                key.verify(message, &Secp256k1Signature::from_slice(signature)?)?;
            }
            PublicKey::EthSecp256k1 { key } => {
                let key = Secp256k1PublicKey::from_slice(key)?;
                key.verify_keccak(message, &Secp256k1Signature::from_slice(signature)?)?;
            }
            PublicKey::Ed25519 { key } => {
                let key = Ed25519PublicKey::from_slice(key)?;
                key.verify(message, &Ed25519Signature::from_slice(signature)?)?;
            }
            PublicKey::Multisig { .. } => {
                return Err(ProofError::MultisigMismatch(
                    "multisig key requires a multi signature".to_string(),
                ))
            }
        }
        Ok(())
    }

    /// Account address bytes as the key's home chain derives them.
    pub fn address_bytes(&self) -> Result<Vec<u8>, ProofError> {
        match self {
            PublicKey::Secp256k1 { key } => {
                let key = Secp256k1PublicKey::from_slice(key)?;
                Ok(cosmos_address(&key.to_compressed()).to_vec())
            }
            PublicKey::EthSecp256k1 { .. } => self.evm_address_bytes(),
            PublicKey::Ed25519 { key } => {
                let key = Ed25519PublicKey::from_slice(key)?;
                Ok(sha256(key.as_bytes())[..20].to_vec())
            }
            PublicKey::Multisig { .. } => {
                self.validate_threshold()?;
                Ok(sha256(&self.multisig_preimage()?)[..20].to_vec())
            }
        }
    }

    /// A multisig threshold must lie in `1..=public_keys.len()`. Other keys
    /// always pass.
    pub fn validate_threshold(&self) -> Result<(), ProofError> {
        let PublicKey::Multisig {
            threshold,
            public_keys,
        } = self
        else {
            return Ok(());
        };
        if *threshold == 0 || *threshold as usize > public_keys.len() {
            return Err(ProofError::MultisigMismatch(format!(
                "threshold {} out of range for {} keys",
                threshold,
                public_keys.len()
            )));
        }
        Ok(())
    }

    /// EVM address bytes; only defined for secp256k1 keys.
    pub fn evm_address_bytes(&self) -> Result<Vec<u8>, ProofError> {
        match self {
            PublicKey::Secp256k1 { key } | PublicKey::EthSecp256k1 { key } => {
                let key = Secp256k1PublicKey::from_slice(key)?;
                Ok(evm_address(&key.to_uncompressed()?).to_vec())
            }
            other => Err(ProofError::UnsupportedKey(format!(
                "{} keys have no EVM address",
                other.scheme()
            ))),
        }
    }

    /// Raw key bytes, used by encodings that apply no hashing.
    pub fn raw_bytes(&self) -> Result<Vec<u8>, ProofError> {
        match self {
            PublicKey::Secp256k1 { key } | PublicKey::EthSecp256k1 { key } => {
                Ok(Secp256k1PublicKey::from_slice(key)?.to_compressed().to_vec())
            }
            PublicKey::Ed25519 { key } => Ok(Ed25519PublicKey::from_slice(key)?.as_bytes().to_vec()),
            PublicKey::Multisig { .. } => Err(ProofError::UnsupportedKey(
                "multisig keys have no raw encoding".to_string(),
            )),
        }
    }

    /// Deterministic byte encoding of a multisig key: threshold, then each
    /// sub-key as `scheme_len || scheme || key_len || key`.
    fn multisig_preimage(&self) -> Result<Vec<u8>, ProofError> {
        let PublicKey::Multisig {
            threshold,
            public_keys,
        } = self
        else {
            return self.raw_bytes();
        };
        let mut out = threshold.to_be_bytes().to_vec();
        for key in public_keys {
            let scheme = key.scheme().as_bytes();
            let bytes = key.multisig_preimage()?;
            out.push(scheme.len() as u8);
            out.extend_from_slice(scheme);
            out.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
            out.extend_from_slice(&bytes);
        }
        Ok(out)
    }
}
