//! # Proof Verifier Service
//!
//! Implements [`ProofVerificationApi`].

use crate::domain::{AddressData, Proof, ProofError, PublicKey};
use crate::ports::ProofVerificationApi;
use tracing::debug;

/// Stateless ownership-proof verifier.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProofVerifier;

impl ProofVerifier {
    /// Create a verifier.
    pub fn new() -> Self {
        Self
    }
}

impl ProofVerificationApi for ProofVerifier {
    fn verify(
        &self,
        proof: &Proof,
        address: &AddressData,
        expected_signer: &str,
    ) -> Result<(), ProofError> {
        address.validate()?;
        let plain_text = proof.decoded_plain_text()?;

        address.verify_public_key(&proof.public_key)?;
        proof.signature.verify(&proof.public_key, &plain_text)?;
        proof
            .signature
            .check_plain_text(&plain_text, expected_signer)?;

        debug!(
            address = address.value(),
            encoding = address.encoding(),
            scheme = proof.public_key.scheme(),
            "[pl-01] proof verified"
        );
        Ok(())
    }

    fn verify_signature(
        &self,
        public_key: &PublicKey,
        message: &[u8],
        signature: &[u8],
    ) -> Result<(), ProofError> {
        public_key.verify(message, signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{personal_sign_message, SignatureData, SignatureValueType};
    use proptest::prelude::*;
    use shared_crypto::{Ed25519KeyPair, Secp256k1KeyPair};

    const OWNER: &str = "desmos1owner";

    fn cosmos_proof(pair: &Secp256k1KeyPair, plain_text: &[u8]) -> (Proof, AddressData) {
        let public_key = PublicKey::Secp256k1 {
            key: pair.public_key().to_compressed().to_vec(),
        };
        let template = AddressData::Bech32 {
            value: String::new(),
            prefix: "cosmos".to_string(),
        };
        let value = template.derive_from(&public_key).unwrap();
        let signature = SignatureData::Single {
            value_type: SignatureValueType::Raw,
            signature: pair.sign(plain_text).as_bytes().to_vec(),
        };
        (
            Proof::new(public_key, signature, plain_text),
            AddressData::Bech32 {
                value,
                prefix: "cosmos".to_string(),
            },
        )
    }

    #[test]
    fn test_cosmos_raw_proof() {
        let pair = Secp256k1KeyPair::generate();
        let (proof, address) = cosmos_proof(&pair, OWNER.as_bytes());
        assert!(ProofVerifier::new().verify(&proof, &address, OWNER).is_ok());
    }

    #[test]
    fn test_wrong_owner_is_unexpected_plain_text() {
        let pair = Secp256k1KeyPair::generate();
        let (proof, address) = cosmos_proof(&pair, OWNER.as_bytes());
        assert!(matches!(
            ProofVerifier::new().verify(&proof, &address, "desmos1someone"),
            Err(ProofError::UnexpectedPlainText { .. })
        ));
    }

    #[test]
    fn test_foreign_address_is_mismatch() {
        let pair = Secp256k1KeyPair::generate();
        let (proof, _) = cosmos_proof(&pair, OWNER.as_bytes());
        let (_, foreign) = cosmos_proof(&Secp256k1KeyPair::generate(), OWNER.as_bytes());
        assert!(matches!(
            ProofVerifier::new().verify(&proof, &foreign, OWNER),
            Err(ProofError::AddressMismatch { .. })
        ));
    }

    #[test]
    fn test_evm_personal_sign_proof() {
        let pair = Secp256k1KeyPair::generate();
        let public_key = PublicKey::EthSecp256k1 {
            key: pair.public_key().to_compressed().to_vec(),
        };
        let message = personal_sign_message(OWNER);
        let signature = SignatureData::Single {
            value_type: SignatureValueType::EvmPersonalSign,
            signature: pair.sign_keccak(message.as_bytes()).unwrap().as_bytes().to_vec(),
        };
        let body = hex::encode(public_key.evm_address_bytes().unwrap());
        let address = AddressData::Hex {
            value: format!("0x{}", crate::domain::eip55_checksum(&body)),
            prefix: "0x".to_string(),
        };
        let proof = Proof::new(public_key, signature, message.as_bytes());
        assert!(ProofVerifier::new().verify(&proof, &address, OWNER).is_ok());
    }

    #[test]
    fn test_solana_style_proof() {
        let pair = Ed25519KeyPair::generate();
        let public_key = PublicKey::Ed25519 {
            key: pair.public_key().as_bytes().to_vec(),
        };
        let address = AddressData::Base58 {
            value: bs58::encode(pair.public_key().as_bytes()).into_string(),
            prefix: String::new(),
        };
        let signature = SignatureData::Single {
            value_type: SignatureValueType::Raw,
            signature: pair.sign(OWNER.as_bytes()).as_bytes().to_vec(),
        };
        let proof = Proof::new(public_key, signature, OWNER.as_bytes());
        assert!(ProofVerifier::new().verify(&proof, &address, OWNER).is_ok());
    }

    fn multisig_fixture(signed_by: &[bool]) -> (Proof, AddressData) {
        let pairs: Vec<Secp256k1KeyPair> = (0..3).map(|_| Secp256k1KeyPair::generate()).collect();
        let public_key = PublicKey::Multisig {
            threshold: 2,
            public_keys: pairs
                .iter()
                .map(|p| PublicKey::Secp256k1 {
                    key: p.public_key().to_compressed().to_vec(),
                })
                .collect(),
        };
        let signatures = pairs
            .iter()
            .zip(signed_by)
            .filter(|(_, signed)| **signed)
            .map(|(p, _)| SignatureData::Single {
                value_type: SignatureValueType::Raw,
                signature: p.sign(OWNER.as_bytes()).as_bytes().to_vec(),
            })
            .collect();
        let template = AddressData::Bech32 {
            value: String::new(),
            prefix: "cosmos".to_string(),
        };
        let value = template.derive_from(&public_key).unwrap();
        let signature = SignatureData::Multi {
            signers: signed_by.to_vec(),
            signatures,
        };
        (
            Proof::new(public_key, signature, OWNER.as_bytes()),
            AddressData::Bech32 {
                value,
                prefix: "cosmos".to_string(),
            },
        )
    }

    #[test]
    fn test_multisig_meets_threshold() {
        let (proof, address) = multisig_fixture(&[true, false, true]);
        assert!(ProofVerifier::new().verify(&proof, &address, OWNER).is_ok());
    }

    #[test]
    fn test_multisig_below_threshold() {
        let (proof, address) = multisig_fixture(&[false, true, false]);
        assert!(matches!(
            ProofVerifier::new().verify(&proof, &address, OWNER),
            Err(ProofError::InvalidSignature(_))
        ));
    }

    #[test]
    fn test_multisig_zero_threshold_rejected() {
        let (mut proof, address) = multisig_fixture(&[false, false, false]);
        if let PublicKey::Multisig { threshold, .. } = &mut proof.public_key {
            *threshold = 0;
        }
        proof.plain_text = hex::encode(b"anything-at-all");
        assert!(matches!(
            ProofVerifier::new().verify(&proof, &address, "desmos1attacker"),
            Err(ProofError::MultisigMismatch(_))
        ));
    }

    #[test]
    fn test_multisig_threshold_above_key_count_rejected() {
        let (mut proof, address) = multisig_fixture(&[true, true, true]);
        if let PublicKey::Multisig { threshold, .. } = &mut proof.public_key {
            *threshold = 4;
        }
        assert!(matches!(
            ProofVerifier::new().verify(&proof, &address, OWNER),
            Err(ProofError::MultisigMismatch(_))
        ));
    }

    #[test]
    fn test_degenerate_threshold_has_no_address() {
        let key = PublicKey::Multisig {
            threshold: 0,
            public_keys: vec![PublicKey::Secp256k1 {
                key: Secp256k1KeyPair::generate().public_key().to_compressed().to_vec(),
            }],
        };
        let template = AddressData::Bech32 {
            value: String::new(),
            prefix: "cosmos".to_string(),
        };
        assert!(matches!(
            template.derive_from(&key),
            Err(ProofError::MultisigMismatch(_))
        ));
    }

    #[test]
    fn test_multisig_flag_count_mismatch() {
        let (mut proof, address) = multisig_fixture(&[true, true, false]);
        if let SignatureData::Multi { signers, .. } = &mut proof.signature {
            signers[2] = true;
        }
        assert!(matches!(
            ProofVerifier::new().verify(&proof, &address, OWNER),
            Err(ProofError::MultisigMismatch(_))
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_generated_proof_verifies_and_tampering_fails(
            secret in any::<[u8; 32]>(),
            flip_at in 0usize..64,
            flip_bits in 1u8..=255,
        ) {
            let pair = match Secp256k1KeyPair::from_bytes(secret) {
                Ok(pair) => pair,
                Err(_) => return Ok(()),
            };
            let (proof, address) = cosmos_proof(&pair, OWNER.as_bytes());
            let verifier = ProofVerifier::new();
            prop_assert!(verifier.verify(&proof, &address, OWNER).is_ok());

            let mut tampered = proof.clone();
            if let SignatureData::Single { signature, .. } = &mut tampered.signature {
                signature[flip_at] ^= flip_bits;
            }
            prop_assert!(verifier.verify(&tampered, &address, OWNER).is_err());

            let reprefixed = AddressData::Bech32 {
                value: address.value().to_string(),
                prefix: "osmo".to_string(),
            };
            prop_assert!(verifier.verify(&proof, &reprefixed, OWNER).is_err());
        }
    }
}
