//! # Inbound Ports (Driving Ports / API)
//!
//! Verification entry points used by the chain-link transaction handlers and
//! by the oracle relay.

use crate::domain::{AddressData, ProofError, Proof, PublicKey};

/// Ownership proof verification.
///
/// Every method is a pure function of its inputs.
pub trait ProofVerificationApi {
    /// Verify that `proof` shows control of `address` and that its plain text
    /// is the value mandated for `expected_signer`.
    ///
    /// Fails with `AddressMismatch` when the proof key does not derive
    /// `address`, `InvalidSignature` when the signature does not verify, and
    /// `UnexpectedPlainText` when the signed content is not the mandated one.
    fn verify(
        &self,
        proof: &Proof,
        address: &AddressData,
        expected_signer: &str,
    ) -> Result<(), ProofError>;

    /// Verify a bare signature over `message` with a single (non-multisig) key.
    fn verify_signature(
        &self,
        public_key: &PublicKey,
        message: &[u8],
        signature: &[u8],
    ) -> Result<(), ProofError>;
}
