//! # Domain Entities
//!
//! Persisted link records.

use super::errors::StoreError;
use super::value_objects::{LinkResult, LinkState};
use pl_01_proof_verification::{AddressData, ChainConfig, Proof};
use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use shared_types::{validate_key_segment, OwnerId, Timestamp};

/// Verified binding of a profile to an external-chain address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainLink {
    /// Profile owner.
    pub user: OwnerId,
    /// External address.
    pub address: AddressData,
    /// Proof accepted when the link was created.
    pub proof: Proof,
    /// External chain.
    pub chain_config: ChainConfig,
    /// Creation time.
    pub creation_time: Timestamp,
}

impl ChainLink {
    /// Create a chain link.
    pub fn new(
        user: impl Into<OwnerId>,
        address: AddressData,
        proof: Proof,
        chain_config: ChainConfig,
        creation_time: Timestamp,
    ) -> Self {
        Self {
            user: user.into(),
            address,
            proof,
            chain_config,
            creation_time,
        }
    }

    /// Structural validation. Proof cryptography is checked by the verifier.
    pub fn validate(&self) -> Result<(), StoreError> {
        validate_key_segment("user", &self.user).map_err(validation)?;
        self.address.validate().map_err(validation)?;
        self.proof.validate().map_err(validation)?;
        self.chain_config.validate().map_err(validation)?;
        Ok(())
    }
}

/// External centralized-application account.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationLinkData {
    /// Application name, lower-case (e.g. `twitter`).
    pub application: String,
    /// Account name on the application.
    pub username: String,
}

impl ApplicationLinkData {
    /// Create link data; the application name is lower-cased.
    pub fn new(application: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            application: application.into().to_lowercase(),
            username: username.into(),
        }
    }

    /// Both parts must be usable as key segments; the application name must
    /// be lower-case.
    pub fn validate(&self) -> Result<(), StoreError> {
        validate_key_segment("application", &self.application).map_err(validation)?;
        validate_key_segment("username", &self.username).map_err(validation)?;
        if self.application != self.application.to_lowercase() {
            return Err(StoreError::Validation(
                "application must be lowercase".to_string(),
            ));
        }
        Ok(())
    }
}

/// Oracle request tracked by an application link.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleRequest {
    /// Oracle-assigned id; `0` until acknowledged.
    pub id: u64,
    /// Oracle script executed by the oracle chain.
    pub oracle_script_id: u64,
    /// Encoded call data sent to the oracle script.
    #[serde_as(as = "Hex")]
    pub call_data: Vec<u8>,
    /// Correlation token echoed by the oracle chain.
    pub client_id: String,
}

/// Oracle-verified binding of a profile to an application account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationLink {
    /// Profile owner.
    pub user: OwnerId,
    /// Linked application account.
    pub data: ApplicationLinkData,
    /// Verification state.
    pub state: LinkState,
    /// Tracked oracle request.
    pub oracle_request: OracleRequest,
    /// Outcome, set once the link reaches a terminal state.
    pub result: Option<LinkResult>,
    /// Creation time.
    pub creation_time: Timestamp,
    /// Time at or after which the link is swept.
    pub expiration_time: Timestamp,
}

impl ApplicationLink {
    /// Create an application link in the `Initialized` state.
    pub fn new(
        user: impl Into<OwnerId>,
        data: ApplicationLinkData,
        oracle_request: OracleRequest,
        creation_time: Timestamp,
        expiration_time: Timestamp,
    ) -> Self {
        Self {
            user: user.into(),
            data,
            state: LinkState::Initialized,
            oracle_request,
            result: None,
            creation_time,
            expiration_time,
        }
    }

    /// Correlation token of the tracked request.
    pub fn client_id(&self) -> &str {
        &self.oracle_request.client_id
    }

    /// Whether the link is due for removal at `now`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expiration_time <= now
    }

    /// Structural validation.
    pub fn validate(&self) -> Result<(), StoreError> {
        validate_key_segment("user", &self.user).map_err(validation)?;
        self.data.validate()?;
        validate_key_segment("client id", &self.oracle_request.client_id).map_err(validation)?;
        if self.expiration_time <= self.creation_time {
            return Err(StoreError::Validation(format!(
                "expiration time {} must be after creation time {}",
                self.expiration_time, self.creation_time
            )));
        }
        if self.state.is_terminal() != self.result.is_some() {
            return Err(StoreError::Validation(format!(
                "state {} inconsistent with result {:?}",
                self.state, self.result
            )));
        }
        Ok(())
    }
}

fn validation(err: impl std::fmt::Display) -> StoreError {
    StoreError::Validation(err.to_string())
}
