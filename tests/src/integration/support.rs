//! World fixture: a links module on loopback adapters plus builders for the
//! packets the oracle chain would send back.

use link_runtime::devnet::{oracle_attestation, secp256k1_public_key};
use link_runtime::{LinksConfig, LinksModule, MsgLinkApplication};
use pl_02_link_storage::{ApplicationLink, ApplicationLinkData, InMemoryKVStore};
use pl_04_oracle_relay::{
    encode_json, Acknowledgement, ChannelEndpoint, InMemoryAccountKeys, LoopbackTransport,
    OracleRequestPacketAcknowledgement, OracleRequestPacketData, OracleResponsePacketData,
    Packet, PacketTimeout, ResolveStatus,
};
use shared_crypto::Secp256k1KeyPair;
use shared_types::{BlockContext, LinkEvent};

pub const OWNER: &str = "desmos1owner";
pub const TTL: u64 = 240;

pub struct World {
    pub module: LinksModule<InMemoryKVStore, LoopbackTransport>,
    pub owner_key: Secp256k1KeyPair,
    pub accounts: Vec<(String, Secp256k1KeyPair)>,
}

impl World {
    /// Module at `t=0` with application links living `TTL` seconds.
    pub fn new() -> Self {
        let mut config = LinksConfig::default();
        config.app_links.validity_duration_secs = TTL;
        Self::with_config(config, &[])
    }

    /// Module with extra registered profile accounts.
    pub fn with_config(config: LinksConfig, extra_profiles: &[&str]) -> Self {
        let owner_key = Secp256k1KeyPair::generate();
        let mut keys = InMemoryAccountKeys::new();
        keys.insert(OWNER, secp256k1_public_key(&owner_key));
        let mut accounts = Vec::new();
        for profile in extra_profiles {
            let pair = Secp256k1KeyPair::generate();
            keys.insert(*profile, secp256k1_public_key(&pair));
            accounts.push((profile.to_string(), pair));
        }

        let mut transport = LoopbackTransport::new();
        transport.open_channel(local(), oracle());
        let mut module =
            LinksModule::new(config, InMemoryKVStore::new(), transport, Box::new(keys)).unwrap();
        module.begin_block(BlockContext::new(1, 0)).unwrap();
        Self {
            module,
            owner_key,
            accounts,
        }
    }

    pub fn account(&self, profile: &str) -> &Secp256k1KeyPair {
        &self
            .accounts
            .iter()
            .find(|(p, _)| p == profile)
            .unwrap()
            .1
    }

    /// Submit an application link for `(twitter, username)` and return the
    /// request packet put on the wire.
    pub fn submit(&mut self, username: &str) -> Packet {
        self.module
            .link_application(&MsgLinkApplication {
                sender: OWNER.to_string(),
                link_data: ApplicationLinkData::new("twitter", username),
                call_data: hex::encode(format!("{{\"username\":\"{username}\"}}")),
                source_port: "profiles".to_string(),
                source_channel: "channel-0".to_string(),
                timeout_height: 0,
                timeout_timestamp: 0,
            })
            .unwrap();
        self.module.transport_mut().take_sent().pop().unwrap()
    }

    pub fn ack(&mut self, request: &Packet, request_id: u64) {
        let ack = Acknowledgement::json(&OracleRequestPacketAcknowledgement { request_id }).unwrap();
        self.module
            .acknowledge_packet(request, &serde_json::to_vec(&ack).unwrap())
            .unwrap();
    }

    /// Oracle response to `request`.
    pub fn response(
        &self,
        request: &Packet,
        request_id: u64,
        status: ResolveStatus,
        result: Vec<u8>,
    ) -> Packet {
        let data: OracleRequestPacketData = serde_json::from_slice(&request.data).unwrap();
        inbound(
            encode_json(&OracleResponsePacketData {
                client_id: data.client_id,
                request_id,
                ans_count: 1,
                request_time: 1,
                resolve_time: 2,
                resolve_status: status,
                result,
            })
            .unwrap(),
        )
    }

    /// Successful oracle result attesting `value` for `username`, signed by
    /// the profile owner.
    pub fn attestation(&self, value: &str, username: &str) -> Vec<u8> {
        oracle_attestation(&self.owner_key, value, username).unwrap()
    }

    pub fn link(&self, username: &str) -> ApplicationLink {
        self.module
            .application_link(OWNER, "twitter", username)
            .unwrap()
    }

    pub fn advance_to(&mut self, height: u64, time: u64) -> usize {
        self.module
            .begin_block(BlockContext::new(height, time))
            .unwrap()
    }

    pub fn state_changes(&self) -> usize {
        self.module
            .events()
            .iter()
            .filter(|e| matches!(e, LinkEvent::ApplicationLinkStateChanged { .. }))
            .count()
    }
}

pub fn local() -> ChannelEndpoint {
    ChannelEndpoint::new("profiles", "channel-0")
}

pub fn oracle() -> ChannelEndpoint {
    ChannelEndpoint::new("oracle", "channel-5")
}

/// Packet arriving on the local channel.
pub fn inbound(data: Vec<u8>) -> Packet {
    Packet {
        sequence: 1,
        source: oracle(),
        destination: local(),
        timeout: PacketTimeout::new(0, 10_000),
        data,
    }
}
