//! Ports layer for Proof Verification.

pub mod inbound;

pub use inbound::ProofVerificationApi;
