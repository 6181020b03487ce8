//! # Local Devnet
//!
//! Drives a [`LinksModule`] over in-memory adapters on a tokio block timer.
//! A scripted profile owner links a chain account and requests an
//! application link in block 1; a simulated oracle chain acknowledges every
//! request one block after it is sent and answers it one block later.
//! Expired links are swept by the begin-block hook as blocks advance.

use crate::container::{LinksConfig, LinksModule};
use crate::errors::RuntimeError;
use crate::msgs::{MsgLinkApplication, MsgLinkChainAccount};
use pl_01_proof_verification::{
    AddressData, ChainConfig, Proof, PublicKey, SignatureData, SignatureValueType,
};
use pl_02_link_storage::{ApplicationLinkData, InMemoryKVStore};
use pl_04_oracle_relay::{
    encode_json, Acknowledgement, ChannelEndpoint, InMemoryAccountKeys, LoopbackTransport,
    OracleRequestPacketAcknowledgement, OracleRequestPacketData, OracleResponsePacketData,
    OracleScriptResult, Packet, RelayError, ResolveStatus,
};
use shared_crypto::Secp256k1KeyPair;
use shared_types::{BlockContext, LinkEvent, Timestamp};
use std::time::Duration;
use tracing::{debug, info};

/// Profile owner used by the devnet script.
pub const DEVNET_OWNER: &str = "desmos1devnetowner";
/// Application account the devnet script links.
pub const DEVNET_APPLICATION: (&str, &str) = ("twitter", "devnet_user");

/// Devnet timing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevnetOptions {
    /// Wall-clock time between blocks.
    pub block_interval: Duration,
    /// Chain time between blocks, in seconds.
    pub block_secs: u64,
    /// Blocks to produce.
    pub blocks: u64,
    /// Chain time of the genesis block.
    pub genesis_time: Timestamp,
}

impl Default for DevnetOptions {
    fn default() -> Self {
        Self {
            block_interval: Duration::from_secs(1),
            block_secs: 5,
            blocks: 10,
            genesis_time: 1_700_000_000,
        }
    }
}

/// What happened in one devnet block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockReport {
    /// Block context.
    pub block: BlockContext,
    /// Application links swept at the start of the block.
    pub swept: usize,
    /// Events committed during the block.
    pub events: Vec<LinkEvent>,
}

/// Devnet run summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DevnetReport {
    /// Produced blocks, in order.
    pub blocks: Vec<BlockReport>,
}

impl DevnetReport {
    /// Every event of the run, in order.
    pub fn events(&self) -> impl Iterator<Item = &LinkEvent> {
        self.blocks.iter().flat_map(|b| b.events.iter())
    }
}

type DevnetModule = LinksModule<InMemoryKVStore, LoopbackTransport>;

/// Run the devnet script to completion.
pub async fn run_devnet(
    config: LinksConfig,
    options: DevnetOptions,
) -> Result<DevnetReport, RuntimeError> {
    let owner_key = Secp256k1KeyPair::generate();
    let mut accounts = InMemoryAccountKeys::new();
    accounts.insert(DEVNET_OWNER, secp256k1_public_key(&owner_key));

    let local = ChannelEndpoint::new("profiles", "channel-0");
    let counterparty = ChannelEndpoint::new("oracle", "channel-0");
    let mut transport = LoopbackTransport::new();
    transport.open_channel(local.clone(), counterparty.clone());

    let mut module = LinksModule::new(config, InMemoryKVStore::new(), transport, Box::new(accounts))?;
    let mut oracle = SimulatedOracle::new(owner_key, counterparty, local);

    info!(
        blocks = options.blocks,
        block_secs = options.block_secs,
        "[runtime] devnet starting"
    );
    let mut ticker = tokio::time::interval(options.block_interval);
    let mut block = BlockContext::new(0, options.genesis_time);
    let mut report = DevnetReport::default();

    for _ in 0..options.blocks {
        ticker.tick().await;
        block = block.advance(options.block_secs);
        let swept = module.begin_block(block)?;

        if block.height == 1 {
            submit_owner_messages(&mut module)?;
        }
        oracle.relay(&mut module)?;

        let events = module.end_block();
        for event in &events {
            info!(height = block.height, kind = event.kind(), "[runtime] event");
        }
        report.blocks.push(BlockReport {
            block,
            swept,
            events,
        });
    }

    info!(blocks = report.blocks.len(), "[runtime] devnet finished");
    Ok(report)
}

fn submit_owner_messages(module: &mut DevnetModule) -> Result<(), RuntimeError> {
    let external = Secp256k1KeyPair::generate();
    let link = module.link_chain_account(&chain_link_message(&external, DEVNET_OWNER, "cosmos")?)?;
    debug!(address = link.address.value(), "[runtime] devnet chain link submitted");

    let (application, username) = DEVNET_APPLICATION;
    let request = module.link_application(&MsgLinkApplication {
        sender: DEVNET_OWNER.to_string(),
        link_data: ApplicationLinkData::new(application, username),
        call_data: hex::encode(format!("{{\"username\":\"{username}\"}}")),
        source_port: "profiles".to_string(),
        source_channel: "channel-0".to_string(),
        timeout_height: 0,
        timeout_timestamp: 0,
    })?;
    debug!(client_id = %request.client_id, "[runtime] devnet application link submitted");
    Ok(())
}

/// Counterparty oracle chain. Requests are acknowledged in the block after
/// they are sent and answered in the block after that.
struct SimulatedOracle {
    owner_key: Secp256k1KeyPair,
    local: ChannelEndpoint,
    counterparty: ChannelEndpoint,
    next_request_id: u64,
    next_sequence: u64,
    awaiting_response: Vec<(Packet, u64)>,
    awaiting_ack: Vec<Packet>,
}

impl SimulatedOracle {
    fn new(owner_key: Secp256k1KeyPair, counterparty: ChannelEndpoint, local: ChannelEndpoint) -> Self {
        Self {
            owner_key,
            local,
            counterparty,
            next_request_id: 1,
            next_sequence: 1,
            awaiting_response: Vec::new(),
            awaiting_ack: Vec::new(),
        }
    }

    fn relay(&mut self, module: &mut DevnetModule) -> Result<(), RuntimeError> {
        for (request, request_id) in std::mem::take(&mut self.awaiting_response) {
            let response = self.response(&request, request_id)?;
            let ack = module.recv_packet(&response)?;
            debug!(request_id, success = ack.is_success(), "[runtime] devnet oracle response delivered");
        }

        for request in std::mem::take(&mut self.awaiting_ack) {
            let request_id = self.next_request_id;
            self.next_request_id += 1;
            let ack = Acknowledgement::json(&OracleRequestPacketAcknowledgement { request_id })
                .map_err(RelayError::from)?;
            let ack = serde_json::to_vec(&ack).map_err(RelayError::from)?;
            module.acknowledge_packet(&request, &ack)?;
            self.awaiting_response.push((request, request_id));
        }

        self.awaiting_ack = module.transport_mut().take_sent();
        Ok(())
    }

    fn response(&mut self, request: &Packet, request_id: u64) -> Result<Packet, RuntimeError> {
        let data: OracleRequestPacketData =
            serde_json::from_slice(&request.data).map_err(RelayError::from)?;
        let (_, username) = DEVNET_APPLICATION;
        let response = OracleResponsePacketData {
            client_id: data.client_id,
            request_id,
            ans_count: data.ask_count,
            request_time: request.timeout.timestamp,
            resolve_time: request.timeout.timestamp,
            resolve_status: ResolveStatus::Success,
            result: oracle_attestation(&self.owner_key, username, username)?,
        };

        let sequence = self.next_sequence;
        self.next_sequence += 1;
        Ok(Packet {
            sequence,
            source: self.counterparty.clone(),
            destination: self.local.clone(),
            timeout: request.timeout,
            data: encode_json(&response).map_err(RelayError::from)?,
        })
    }
}

// =============================================================================
// SCRIPT HELPERS
// =============================================================================

/// Compressed secp256k1 account key.
pub fn secp256k1_public_key(pair: &Secp256k1KeyPair) -> PublicKey {
    PublicKey::Secp256k1 {
        key: pair.public_key().to_compressed().to_vec(),
    }
}

/// Raw-mode proof: `pair` signs `plain_text` as is.
pub fn raw_proof(pair: &Secp256k1KeyPair, plain_text: &str) -> Proof {
    Proof::new(
        secp256k1_public_key(pair),
        SignatureData::Single {
            value_type: SignatureValueType::Raw,
            signature: pair.sign(plain_text.as_bytes()).as_bytes().to_vec(),
        },
        plain_text.as_bytes(),
    )
}

/// Chain link message in which the bech32 address of `external` on `chain`
/// proves itself to `profile`.
pub fn chain_link_message(
    external: &Secp256k1KeyPair,
    profile: &str,
    chain: &str,
) -> Result<MsgLinkChainAccount, RuntimeError> {
    let key = secp256k1_public_key(external);
    let template = AddressData::Bech32 {
        value: String::new(),
        prefix: chain.to_string(),
    };
    let chain_address = AddressData::Bech32 {
        value: template.derive_from(&key)?,
        prefix: chain.to_string(),
    };
    Ok(MsgLinkChainAccount {
        chain_address,
        proof: raw_proof(external, profile),
        chain_config: ChainConfig::new(chain),
        signer: profile.to_string(),
    })
}

/// OBI-encoded oracle result in which the account owner signed the raw
/// bytes of `value`; the result carries them hex-encoded.
pub fn oracle_attestation(
    owner: &Secp256k1KeyPair,
    value: &str,
    username: &str,
) -> Result<Vec<u8>, RuntimeError> {
    let result = OracleScriptResult {
        signature: hex::encode(owner.sign(value.as_bytes()).as_bytes()),
        value: hex::encode(value),
        username: username.to_string(),
    };
    result
        .encode()
        .map_err(|e| RuntimeError::Relay(RelayError::Obi(e)))
}
