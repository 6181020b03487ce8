//! # Packets
//!
//! Wire shapes exchanged over the packet channel. Payloads are JSON and
//! reject unknown fields, so each shape only decodes from its own payloads
//! and a dispatcher can try handlers in turn.

use super::errors::TransportError;
use super::params::Coin;
use pl_01_proof_verification::{AddressData, ChainConfig, Proof};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use std::fmt;

/// One end of a packet channel.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChannelEndpoint {
    /// Port id.
    pub port_id: String,
    /// Channel id.
    pub channel_id: String,
}

impl ChannelEndpoint {
    /// Create an endpoint.
    pub fn new(port_id: impl Into<String>, channel_id: impl Into<String>) -> Self {
        Self {
            port_id: port_id.into(),
            channel_id: channel_id.into(),
        }
    }
}

impl fmt::Display for ChannelEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.port_id, self.channel_id)
    }
}

/// Absolute timeout of a packet on the counterparty chain. Zero disables a
/// bound; at least one must be set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PacketTimeout {
    /// Counterparty block height.
    pub height: u64,
    /// Counterparty block time, in seconds.
    pub timestamp: u64,
}

impl PacketTimeout {
    /// Create a timeout.
    pub fn new(height: u64, timestamp: u64) -> Self {
        Self { height, timestamp }
    }

    /// At least one bound must be set.
    pub fn validate(&self) -> Result<(), TransportError> {
        if self.height == 0 && self.timestamp == 0 {
            return Err(TransportError::InvalidTimeout);
        }
        Ok(())
    }
}

/// Packet as delivered by the transport.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Packet {
    /// Send sequence on the source channel.
    pub sequence: u64,
    /// Sending end.
    pub source: ChannelEndpoint,
    /// Receiving end.
    pub destination: ChannelEndpoint,
    /// Timeout the sender set.
    pub timeout: PacketTimeout,
    /// Encoded payload.
    #[serde_as(as = "Hex")]
    pub data: Vec<u8>,
}

/// Request sent to the oracle chain.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OracleRequestPacketData {
    /// Correlation token echoed in the response.
    pub client_id: String,
    /// Oracle script to execute.
    pub oracle_script_id: u64,
    /// OBI-encoded script input.
    #[serde_as(as = "Hex")]
    pub calldata: Vec<u8>,
    /// Validators asked to report.
    pub ask_count: u64,
    /// Reports required to resolve.
    pub min_count: u64,
    /// Maximum fee paid to data providers.
    pub fee_limit: Vec<Coin>,
    /// Account paying the fee on the oracle chain; empty for the relayer.
    #[serde(default)]
    pub fee_payer: String,
    /// Prepare-phase gas.
    pub prepare_gas: u64,
    /// Execute-phase gas.
    pub execute_gas: u64,
}

/// Success acknowledgement body of an oracle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OracleRequestPacketAcknowledgement {
    /// Request id assigned by the oracle chain.
    pub request_id: u64,
}

/// Oracle outcome classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveStatus {
    /// Reports gathered and script executed.
    Success,
    /// Script execution failed.
    Failure,
    /// Not enough reports before the deadline.
    Expired,
}

impl fmt::Display for ResolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResolveStatus::Success => "success",
            ResolveStatus::Failure => "failure",
            ResolveStatus::Expired => "expired",
        })
    }
}

/// Response sent back by the oracle chain.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OracleResponsePacketData {
    /// Correlation token of the request.
    pub client_id: String,
    /// Oracle request id.
    pub request_id: u64,
    /// Reports received.
    pub ans_count: u64,
    /// Time the request was made on the oracle chain.
    pub request_time: u64,
    /// Time the request resolved.
    pub resolve_time: u64,
    /// Outcome.
    pub resolve_status: ResolveStatus,
    /// OBI-encoded script output; empty unless the request succeeded.
    #[serde_as(as = "Hex")]
    #[serde(default)]
    pub result: Vec<u8>,
}

/// Chain link created on a counterparty chain and relayed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkChainAccountPacketData {
    /// External address being linked.
    pub source_address: AddressData,
    /// Proof by the external address, signing the destination address.
    pub source_proof: Proof,
    /// External chain.
    pub source_chain_config: ChainConfig,
    /// Host-chain profile receiving the link.
    pub destination_address: String,
    /// Proof by the destination account, signing the source address.
    pub destination_proof: Proof,
}

/// Success acknowledgement body of a chain link packet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkChainAccountPacketAck {
    /// Linked external address.
    pub source_address: String,
}

/// Packet acknowledgement written by the receiving chain.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Acknowledgement {
    /// Packet processed; opaque protocol-specific body.
    Result(#[serde_as(as = "Hex")] Vec<u8>),
    /// Packet rejected.
    Error(String),
}

impl Acknowledgement {
    /// Acknowledgement confirming receipt of an oracle response.
    pub fn received() -> Self {
        Acknowledgement::Result(vec![1])
    }

    /// Success acknowledgement carrying `body` as JSON.
    pub fn json<T: Serialize>(body: &T) -> Result<Self, serde_json::Error> {
        Ok(Acknowledgement::Result(serde_json::to_vec(body)?))
    }

    /// Error acknowledgement.
    pub fn error(message: impl Into<String>) -> Self {
        Acknowledgement::Error(message.into())
    }

    /// Whether this is a success acknowledgement.
    pub fn is_success(&self) -> bool {
        matches!(self, Acknowledgement::Result(_))
    }
}

/// JSON-encode a payload.
pub fn encode_json<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(value)
}

/// JSON-decode a payload; `None` when it is not of shape `T`.
pub fn try_decode<T: DeserializeOwned>(bytes: &[u8]) -> Option<T> {
    serde_json::from_slice(bytes).ok()
}
