//! # Messages
//!
//! Transactions accepted by the link module. `validate_basic` runs before
//! any state is read.

use crate::errors::RuntimeError;
use pl_01_proof_verification::{AddressData, ChainConfig, Proof};
use pl_02_link_storage::ApplicationLinkData;
use serde::{Deserialize, Serialize};
use shared_types::OwnerId;

/// Link an external-chain address to the signer's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgLinkChainAccount {
    /// External address being linked.
    pub chain_address: AddressData,
    /// Proof that the address owner signed the signer's profile address.
    pub proof: Proof,
    /// External chain.
    pub chain_config: ChainConfig,
    /// Profile owner.
    pub signer: OwnerId,
}

impl MsgLinkChainAccount {
    /// Stateless checks.
    pub fn validate_basic(&self) -> Result<(), RuntimeError> {
        not_blank("signer", &self.signer)?;
        self.chain_address.validate().map_err(invalid)?;
        self.proof.validate().map_err(invalid)?;
        self.chain_config.validate().map_err(invalid)
    }
}

/// Remove one of the owner's chain links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgUnlinkChainAccount {
    /// Profile owner.
    pub owner: OwnerId,
    /// Chain of the link.
    pub chain_name: String,
    /// Linked external address.
    pub target: String,
}

impl MsgUnlinkChainAccount {
    /// Stateless checks.
    pub fn validate_basic(&self) -> Result<(), RuntimeError> {
        not_blank("owner", &self.owner)?;
        not_blank("chain name", &self.chain_name)?;
        not_blank("target", &self.target)
    }
}

/// Start oracle verification of an application account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgLinkApplication {
    /// Profile owner.
    pub sender: OwnerId,
    /// Application account.
    pub link_data: ApplicationLinkData,
    /// Application-specific call data for the oracle script.
    pub call_data: String,
    /// Port of the oracle channel.
    pub source_port: String,
    /// Oracle channel.
    pub source_channel: String,
    /// Counterparty height bound; 0 for none.
    pub timeout_height: u64,
    /// Counterparty time bound in seconds; 0 for none.
    pub timeout_timestamp: u64,
}

impl MsgLinkApplication {
    /// Stateless checks.
    pub fn validate_basic(&self) -> Result<(), RuntimeError> {
        not_blank("sender", &self.sender)?;
        self.link_data.validate()?;
        not_blank("call data", &self.call_data)?;
        not_blank("source port", &self.source_port)?;
        not_blank("source channel", &self.source_channel)
    }
}

/// Remove one of the signer's application links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgUnlinkApplication {
    /// Application name.
    pub application: String,
    /// Account name on the application.
    pub username: String,
    /// Profile owner.
    pub signer: OwnerId,
}

impl MsgUnlinkApplication {
    /// Stateless checks.
    pub fn validate_basic(&self) -> Result<(), RuntimeError> {
        not_blank("application", &self.application)?;
        not_blank("username", &self.username)?;
        not_blank("signer", &self.signer)
    }
}

fn invalid(err: impl std::fmt::Display) -> RuntimeError {
    RuntimeError::Validation(err.to_string())
}

fn not_blank(field: &str, value: &str) -> Result<(), RuntimeError> {
    if value.trim().is_empty() {
        return Err(RuntimeError::Validation(format!(
            "{field} cannot be empty or blank"
        )));
    }
    Ok(())
}
