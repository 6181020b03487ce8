//! Store and state machine properties observed through the runtime.

use super::support::{World, OWNER, TTL};
use pl_02_link_storage::LinkState;
use pl_04_oracle_relay::{Acknowledgement, ResolveStatus};
use shared_types::LinkEvent;

#[test]
fn test_resubmission_keeps_one_link_per_account() {
    let mut world = World::new();
    world.submit("alice");
    world.advance_to(2, 10);
    world.submit("alice");

    let links = world.module.application_links(OWNER).unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].creation_time, 10);
    assert_eq!(links[0].client_id(), "desmos1owner-twitter-alice-1");
    assert!(world
        .module
        .application_link_by_client_id("desmos1owner-twitter-alice")
        .is_err());
    assert!(world
        .module
        .events()
        .iter()
        .any(|e| matches!(e, LinkEvent::ApplicationLinkDeleted { .. })));
}

#[test]
fn test_duplicate_response_is_idempotent() {
    let mut world = World::new();
    let request = world.submit("alice");
    world.ack(&request, 7);
    let response = world.response(
        &request,
        7,
        ResolveStatus::Success,
        world.attestation("alice", "alice"),
    );

    world.module.recv_packet(&response).unwrap();
    let once = world.link("alice");
    let changes = world.state_changes();

    let ack = world.module.recv_packet(&response).unwrap();
    assert_eq!(ack, Acknowledgement::received());
    assert_eq!(world.link("alice"), once);
    assert_eq!(world.state_changes(), changes);
}

#[test]
fn test_terminal_link_ignores_later_signals() {
    let mut world = World::new();
    let request = world.submit("alice");
    world.ack(&request, 7);
    let failure = world.response(&request, 7, ResolveStatus::Failure, vec![]);
    world.module.recv_packet(&failure).unwrap();
    let terminal = world.link("alice");
    assert_eq!(terminal.state, LinkState::VerificationError);

    world.module.timeout_packet(&request).unwrap();
    world.ack(&request, 7);
    assert_eq!(world.link("alice"), terminal);
}

#[test]
fn test_response_with_other_request_id_changes_nothing() {
    let mut world = World::new();
    let request = world.submit("alice");
    world.ack(&request, 7);
    let changes = world.state_changes();

    let response = world.response(&request, 8, ResolveStatus::Failure, vec![]);
    let ack = world.module.recv_packet(&response).unwrap();
    assert!(!ack.is_success());
    assert_eq!(world.link("alice").state, LinkState::VerificationStarted);
    assert_eq!(world.state_changes(), changes);
}

#[test]
fn test_sweep_boundary() {
    let mut world = World::new();
    world.submit("early");
    world.advance_to(2, 1);
    world.submit("exact");
    world.advance_to(3, 2);
    world.submit("late");

    // Expirations are TTL, TTL + 1 and TTL + 2; sweep at TTL + 1.
    assert_eq!(world.advance_to(4, TTL + 1), 2);
    let left: Vec<_> = world
        .module
        .application_links(OWNER)
        .unwrap()
        .into_iter()
        .map(|l| l.data.username)
        .collect();
    assert_eq!(left, vec!["late".to_string()]);

    assert_eq!(world.advance_to(5, TTL + 1), 0);
}
