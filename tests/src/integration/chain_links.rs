//! Chain links created by message and by inbound packet.

use super::support::{inbound, World, OWNER};
use link_runtime::devnet::{chain_link_message, raw_proof, secp256k1_public_key};
use link_runtime::{ErrorKind, LinksConfig, MsgUnlinkChainAccount};
use pl_01_proof_verification::ChainConfig;
use pl_04_oracle_relay::{encode_json, Acknowledgement, LinkChainAccountPacketAck, LinkChainAccountPacketData};
use shared_crypto::Secp256k1KeyPair;
use shared_types::LinkEvent;

const BOB: &str = "desmos1bob";

fn packet_data(world: &World, external: &Secp256k1KeyPair) -> LinkChainAccountPacketData {
    let msg = chain_link_message(external, BOB, "cosmos").unwrap();
    LinkChainAccountPacketData {
        destination_proof: raw_proof(world.account(BOB), msg.chain_address.value()),
        source_address: msg.chain_address,
        source_proof: msg.proof,
        source_chain_config: ChainConfig::new("cosmos"),
        destination_address: BOB.to_string(),
    }
}

#[test]
fn test_default_address_moves_on_unlink() {
    let mut world = World::new();
    let first = chain_link_message(&Secp256k1KeyPair::generate(), OWNER, "cosmos").unwrap();
    world.module.link_chain_account(&first).unwrap();
    world.advance_to(2, 50);
    let second = chain_link_message(&Secp256k1KeyPair::generate(), OWNER, "cosmos").unwrap();
    world.module.link_chain_account(&second).unwrap();

    let default = world.module.default_external_address(OWNER, "cosmos").unwrap();
    assert_eq!(default.as_deref(), Some(first.chain_address.value()));

    world
        .module
        .unlink_chain_account(&MsgUnlinkChainAccount {
            owner: OWNER.to_string(),
            chain_name: "cosmos".to_string(),
            target: first.chain_address.value().to_string(),
        })
        .unwrap();
    let default = world.module.default_external_address(OWNER, "cosmos").unwrap();
    assert_eq!(default.as_deref(), Some(second.chain_address.value()));
}

#[test]
fn test_same_address_links_once_per_profile() {
    let mut world = World::with_config(LinksConfig::default(), &[BOB]);
    let external = Secp256k1KeyPair::generate();
    let msg = chain_link_message(&external, OWNER, "cosmos").unwrap();
    world.module.link_chain_account(&msg).unwrap();
    let err = world.module.link_chain_account(&msg).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    // Another profile may link the same address.
    let for_bob = chain_link_message(&external, BOB, "cosmos").unwrap();
    world.module.link_chain_account(&for_bob).unwrap();
    let mut owners = world
        .module
        .chain_link_owners("cosmos", msg.chain_address.value())
        .unwrap();
    owners.sort();
    assert_eq!(owners, vec![BOB.to_string(), OWNER.to_string()]);
}

#[test]
fn test_chain_link_over_packet() {
    let mut world = World::with_config(LinksConfig::default(), &[BOB]);
    let data = packet_data(&world, &Secp256k1KeyPair::generate());
    let address = data.source_address.value().to_string();

    let ack = world
        .module
        .recv_packet(&inbound(encode_json(&data).unwrap()))
        .unwrap();
    assert_eq!(
        ack,
        Acknowledgement::json(&LinkChainAccountPacketAck {
            source_address: address.clone()
        })
        .unwrap()
    );
    assert_eq!(world.module.chain_links(BOB).unwrap().len(), 1);
    assert!(matches!(
        world.module.events().last(),
        Some(LinkEvent::ChainLinkPacketReceived { destination_address, .. }) if destination_address == BOB
    ));
}

#[test]
fn test_chain_link_packet_with_foreign_destination_key() {
    let mut world = World::with_config(LinksConfig::default(), &[BOB]);
    let mut data = packet_data(&world, &Secp256k1KeyPair::generate());
    let impostor = Secp256k1KeyPair::generate();
    data.destination_proof = raw_proof(&impostor, data.source_address.value());
    assert_ne!(data.destination_proof.public_key, secp256k1_public_key(world.account(BOB)));

    let ack = world
        .module
        .recv_packet(&inbound(encode_json(&data).unwrap()))
        .unwrap();
    assert!(!ack.is_success());
    assert!(world.module.chain_links(BOB).unwrap().is_empty());
    assert!(world.module.events().is_empty());
}
