//! # Address Data
//!
//! External-chain address in one of three encodings. The encoding decides
//! which bytes of the proof key are encoded and how, so verifying an address
//! means re-deriving it from the key and comparing.

use super::errors::ProofError;
use super::keys::PublicKey;
use bech32::{Bech32, Hrp};
use serde::{Deserialize, Serialize};
use shared_crypto::keccak256;
use shared_types::validate_key_segment;

/// External-chain address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressData {
    /// Bech32 address over the key's account hash, e.g. `cosmos1...`.
    Bech32 {
        /// Encoded address.
        value: String,
        /// Human-readable part.
        prefix: String,
    },
    /// Base58 address over the raw key bytes, e.g. a Solana account.
    Base58 {
        /// Encoded address.
        value: String,
        /// Hex-encoded version bytes prepended before encoding; empty for none.
        #[serde(default)]
        prefix: String,
    },
    /// Hex address over the EVM account hash, e.g. `0xAb5801...`.
    Hex {
        /// Encoded address, including `prefix`.
        value: String,
        /// Literal prefix such as `0x`; may be empty.
        #[serde(default)]
        prefix: String,
    },
}

impl AddressData {
    /// Canonical external address string.
    pub fn value(&self) -> &str {
        match self {
            AddressData::Bech32 { value, .. }
            | AddressData::Base58 { value, .. }
            | AddressData::Hex { value, .. } => value,
        }
    }

    /// Encoding name.
    pub fn encoding(&self) -> &'static str {
        match self {
            AddressData::Bech32 { .. } => "bech32",
            AddressData::Base58 { .. } => "base58",
            AddressData::Hex { .. } => "hex",
        }
    }

    /// Structural checks that need no key material.
    pub fn validate(&self) -> Result<(), ProofError> {
        validate_key_segment("address", self.value())?;
        match self {
            AddressData::Bech32 { prefix, .. } => {
                if prefix.trim().is_empty() {
                    return Err(ProofError::InvalidAddress(
                        "bech32 prefix cannot be empty or blank".to_string(),
                    ));
                }
            }
            AddressData::Base58 { prefix, .. } => {
                hex::decode(prefix).map_err(|_| {
                    ProofError::InvalidAddress(format!("base58 prefix is not hex: {prefix}"))
                })?;
            }
            AddressData::Hex { value, prefix } => {
                let body = value.strip_prefix(prefix.as_str()).ok_or_else(|| {
                    ProofError::InvalidAddress(format!("{value} does not start with {prefix}"))
                })?;
                hex::decode(body)
                    .map_err(|_| ProofError::InvalidAddress(format!("{value} is not hex")))?;
            }
        }
        Ok(())
    }

    /// Encode the address `key` would have under this variant's encoding.
    pub fn derive_from(&self, key: &PublicKey) -> Result<String, ProofError> {
        match self {
            AddressData::Bech32 { prefix, .. } => {
                let hrp = Hrp::parse(&prefix.to_lowercase())
                    .map_err(|e| ProofError::InvalidAddress(e.to_string()))?;
                bech32::encode::<Bech32>(hrp, &key.address_bytes()?)
                    .map_err(|e| ProofError::InvalidAddress(e.to_string()))
            }
            AddressData::Base58 { prefix, .. } => {
                let mut bytes = hex::decode(prefix)
                    .map_err(|e| ProofError::InvalidAddress(e.to_string()))?;
                bytes.extend(key.raw_bytes()?);
                Ok(bs58::encode(bytes).into_string())
            }
            AddressData::Hex { value, prefix } => {
                let body = hex::encode(key.evm_address_bytes()?);
                let claimed = value.strip_prefix(prefix.as_str()).unwrap_or(value);
                if is_mixed_case(claimed) {
                    Ok(format!("{prefix}{}", eip55_checksum(&body)))
                } else {
                    Ok(format!("{prefix}{body}"))
                }
            }
        }
    }

    /// Check that this address belongs to `key`.
    pub fn verify_public_key(&self, key: &PublicKey) -> Result<(), ProofError> {
        let derived = self.derive_from(key)?;
        let matches = match self {
            AddressData::Bech32 { value, .. } => value.to_lowercase() == derived,
            AddressData::Base58 { value, .. } => *value == derived,
            AddressData::Hex { value, prefix } => {
                let claimed = value.strip_prefix(prefix.as_str()).unwrap_or(value);
                let derived_body = derived.strip_prefix(prefix.as_str()).unwrap_or(&derived);
                if is_mixed_case(claimed) {
                    claimed == derived_body
                } else {
                    claimed.eq_ignore_ascii_case(derived_body)
                }
            }
        };
        if matches {
            Ok(())
        } else {
            Err(ProofError::AddressMismatch {
                expected: self.value().to_string(),
                derived,
            })
        }
    }
}

fn is_mixed_case(body: &str) -> bool {
    body.chars().any(|c| c.is_ascii_lowercase()) && body.chars().any(|c| c.is_ascii_uppercase())
}

/// EIP-55 mixed-case checksum of a lower-case hex address body.
pub fn eip55_checksum(lower_hex: &str) -> String {
    let hash = keccak256(lower_hex.as_bytes());
    lower_hex
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let nibble = (hash[i / 2] >> (if i % 2 == 0 { 4 } else { 0 })) & 0x0f;
            if c.is_ascii_alphabetic() && nibble >= 8 {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect()
}
