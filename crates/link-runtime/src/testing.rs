//! Shared fixtures for the runtime's unit tests.

use crate::container::{LinksConfig, LinksModule};
use crate::devnet::{chain_link_message, oracle_attestation, secp256k1_public_key};
use crate::msgs::{MsgLinkApplication, MsgLinkChainAccount};
use pl_02_link_storage::{ApplicationLinkData, InMemoryKVStore};
use pl_04_oracle_relay::{
    ChannelEndpoint, InMemoryAccountKeys, LoopbackTransport, Packet, PacketTimeout,
};
use shared_crypto::Secp256k1KeyPair;

pub const OWNER: &str = "desmos1owner";
pub const CLIENT: &str = "desmos1owner-twitter-alice";

pub struct Fixture {
    pub module: LinksModule<InMemoryKVStore, LoopbackTransport>,
    pub owner_key: Secp256k1KeyPair,
}

impl Fixture {
    pub fn new() -> Self {
        let owner_key = Secp256k1KeyPair::generate();
        let mut accounts = InMemoryAccountKeys::new();
        accounts.insert(OWNER, secp256k1_public_key(&owner_key));
        let mut transport = LoopbackTransport::new();
        transport.open_channel(
            ChannelEndpoint::new("profiles", "channel-0"),
            ChannelEndpoint::new("oracle", "channel-9"),
        );
        let module = LinksModule::new(
            LinksConfig::default(),
            InMemoryKVStore::new(),
            transport,
            Box::new(accounts),
        )
        .unwrap();
        Self { module, owner_key }
    }

    /// Packet arriving from the oracle chain.
    pub fn inbound(&self, data: Vec<u8>) -> Packet {
        Packet {
            sequence: 1,
            source: ChannelEndpoint::new("oracle", "channel-9"),
            destination: ChannelEndpoint::new("profiles", "channel-0"),
            timeout: PacketTimeout::new(0, 10_000),
            data,
        }
    }
}

pub fn chain_link_msg(external: &Secp256k1KeyPair, profile: &str) -> MsgLinkChainAccount {
    chain_link_message(external, profile, "cosmos").unwrap()
}

pub fn link_application_msg() -> MsgLinkApplication {
    MsgLinkApplication {
        sender: OWNER.to_string(),
        link_data: ApplicationLinkData::new("twitter", "alice"),
        call_data: "7b22757365726e616d65223a22616c696365227d".to_string(),
        source_port: "profiles".to_string(),
        source_channel: "channel-0".to_string(),
        timeout_height: 0,
        timeout_timestamp: 0,
    }
}

pub fn attestation(owner: &Secp256k1KeyPair, value: &str, username: &str) -> Vec<u8> {
    oracle_attestation(owner, value, username).unwrap()
}
