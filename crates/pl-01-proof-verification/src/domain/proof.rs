//! # Proofs
//!
//! A proof is a public key, a signature and the hex-encoded plain text that
//! was signed. The signature's value type fixes what the plain text must be.

use super::errors::ProofError;
use super::keys::PublicKey;
use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use shared_types::validate_key_segment;

/// Lower-case identifier of the external chain, e.g. `cosmos`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Chain name.
    pub name: String,
}

impl ChainConfig {
    /// Create a chain config.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Name must be non-blank, lower-case and usable as a key segment.
    pub fn validate(&self) -> Result<(), ProofError> {
        validate_key_segment("chain name", &self.name)
            .map_err(|e| ProofError::InvalidChainConfig(e.to_string()))?;
        if self.name != self.name.to_lowercase() {
            return Err(ProofError::InvalidChainConfig(
                "chain name must be lowercase".to_string(),
            ));
        }
        Ok(())
    }
}

/// How the signed bytes relate to the owner address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureValueType {
    /// Plain text is the owner address itself.
    Raw,
    /// Plain text is an amino JSON sign document whose memo is the owner.
    CosmosAmino,
    /// Plain text is the owner wrapped in the `personal_sign` envelope.
    EvmPersonalSign,
}

impl SignatureValueType {
    /// Check that `plain_text` is what this value type requires for `owner`.
    pub fn check_plain_text(&self, plain_text: &[u8], owner: &str) -> Result<(), ProofError> {
        let unexpected = |expected: String| ProofError::UnexpectedPlainText {
            expected,
            actual: String::from_utf8_lossy(plain_text).into_owned(),
        };
        match self {
            SignatureValueType::Raw => {
                if plain_text != owner.as_bytes() {
                    return Err(unexpected(owner.to_string()));
                }
            }
            SignatureValueType::CosmosAmino => {
                let doc: AminoSignDoc = serde_json::from_slice(plain_text)
                    .map_err(|_| unexpected(format!("sign document with memo {owner}")))?;
                if doc.memo != owner {
                    return Err(unexpected(format!("sign document with memo {owner}")));
                }
            }
            SignatureValueType::EvmPersonalSign => {
                let expected = personal_sign_message(owner);
                if plain_text != expected.as_bytes() {
                    return Err(unexpected(expected));
                }
            }
        }
        Ok(())
    }
}

/// Only the memo of an amino sign document matters here.
#[derive(Deserialize)]
struct AminoSignDoc {
    memo: String,
}

/// `personal_sign` envelope for `message`.
pub fn personal_sign_message(message: &str) -> String {
    format!("\x19Ethereum Signed Message:\n{}{}", message.len(), message)
}

/// Signature attached to a proof.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureData {
    /// One signature by a single key.
    Single {
        /// Relation between plain text and owner.
        value_type: SignatureValueType,
        /// Signature bytes.
        #[serde_as(as = "Hex")]
        signature: Vec<u8>,
    },
    /// Signatures by a subset of a multisig key's sub-keys.
    Multi {
        /// One flag per sub-key, set when that sub-key signed.
        signers: Vec<bool>,
        /// Signatures of the flagged sub-keys, in sub-key order.
        signatures: Vec<SignatureData>,
    },
}

impl SignatureData {
    /// Check the plain text against every value type used in this signature.
    pub fn check_plain_text(&self, plain_text: &[u8], owner: &str) -> Result<(), ProofError> {
        match self {
            SignatureData::Single { value_type, .. } => {
                value_type.check_plain_text(plain_text, owner)
            }
            SignatureData::Multi { signatures, .. } => {
                if signatures.is_empty() {
                    return Err(ProofError::InvalidSignature(
                        "multi signature carries no signatures".to_string(),
                    ));
                }
                signatures
                    .iter()
                    .try_for_each(|sig| sig.check_plain_text(plain_text, owner))
            }
        }
    }

    /// Verify this signature with `key` over `plain_text`.
    pub fn verify(&self, key: &PublicKey, plain_text: &[u8]) -> Result<(), ProofError> {
        match (self, key) {
            (SignatureData::Single { signature, .. }, key) => key.verify(plain_text, signature),
            (
                SignatureData::Multi {
                    signers,
                    signatures,
                },
                PublicKey::Multisig {
                    threshold,
                    public_keys,
                },
            ) => {
                key.validate_threshold()?;
                if signers.len() != public_keys.len() {
                    return Err(ProofError::MultisigMismatch(format!(
                        "{} signer flags for {} keys",
                        signers.len(),
                        public_keys.len()
                    )));
                }
                let signing_keys: Vec<&PublicKey> = public_keys
                    .iter()
                    .zip(signers)
                    .filter_map(|(key, signed)| signed.then_some(key))
                    .collect();
                if signing_keys.len() != signatures.len() {
                    return Err(ProofError::MultisigMismatch(format!(
                        "{} flagged signers but {} signatures",
                        signing_keys.len(),
                        signatures.len()
                    )));
                }
                if (signatures.len() as u32) < *threshold {
                    return Err(ProofError::InvalidSignature(format!(
                        "{} signatures below threshold {}",
                        signatures.len(),
                        threshold
                    )));
                }
                signing_keys
                    .into_iter()
                    .zip(signatures)
                    .try_for_each(|(key, sig)| sig.verify(key, plain_text))
            }
            (SignatureData::Multi { .. }, other) => Err(ProofError::MultisigMismatch(format!(
                "multi signature with {} key",
                other.scheme()
            ))),
        }
    }
}

/// Ownership proof of an external address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    /// Key that produced the signature.
    pub public_key: PublicKey,
    /// Signature over the decoded plain text.
    pub signature: SignatureData,
    /// Hex encoding of the exact signed bytes.
    pub plain_text: String,
}

impl Proof {
    /// Create a proof over raw `plain_text` bytes.
    pub fn new(public_key: PublicKey, signature: SignatureData, plain_text: &[u8]) -> Self {
        Self {
            public_key,
            signature,
            plain_text: hex::encode(plain_text),
        }
    }

    /// Plain text must be non-blank hex.
    pub fn validate(&self) -> Result<(), ProofError> {
        self.decoded_plain_text().map(|_| ())
    }

    /// Bytes that were signed.
    pub fn decoded_plain_text(&self) -> Result<Vec<u8>, ProofError> {
        if self.plain_text.trim().is_empty() {
            return Err(ProofError::InvalidPlainTextEncoding);
        }
        hex::decode(&self.plain_text).map_err(|_| ProofError::InvalidPlainTextEncoding)
    }
}
