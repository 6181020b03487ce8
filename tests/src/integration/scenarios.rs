//! End-to-end application link scenarios.

use super::support::{World, OWNER, TTL};
use pl_02_link_storage::{LinkResult, LinkState};
use pl_03_app_link_verification::{REASON_REQUEST_EXPIRED, REASON_TIMEOUT};
use pl_04_oracle_relay::{
    Acknowledgement, OracleScriptResult, ResolveStatus, REASON_INVALID_SIGNATURE,
};
use shared_types::LinkEvent;

#[test]
fn test_scenario_a_verified_link() {
    let mut world = World::new();
    let request = world.submit("alice");
    let link = world.link("alice");
    assert_eq!(link.state, LinkState::Initialized);
    assert_eq!(link.expiration_time, TTL);

    world.ack(&request, 7);
    let link = world.link("alice");
    assert_eq!(link.state, LinkState::VerificationStarted);
    assert_eq!(link.oracle_request.id, 7);

    let result = world.attestation("alice", "alice");
    let response = world.response(&request, 7, ResolveStatus::Success, result);
    assert_eq!(
        world.module.recv_packet(&response).unwrap(),
        Acknowledgement::received()
    );

    let link = world.link("alice");
    assert_eq!(link.state, LinkState::VerificationSuccess);
    match link.result {
        Some(LinkResult::Success { value, signature }) => {
            assert_eq!(value, hex::encode("alice"));
            assert_eq!(signature.len(), 128);
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn test_scenario_b_expired_request() {
    let mut world = World::new();
    let request = world.submit("alice");
    world.ack(&request, 7);

    let response = world.response(&request, 7, ResolveStatus::Expired, vec![]);
    world.module.recv_packet(&response).unwrap();

    let link = world.link("alice");
    assert_eq!(link.state, LinkState::VerificationError);
    assert_eq!(link.result, Some(LinkResult::failed(REASON_REQUEST_EXPIRED)));
}

#[test]
fn test_scenario_c_stale_link_swept() {
    let mut world = World::new();
    let request = world.submit("alice");
    world.ack(&request, 7);
    assert_eq!(world.link("alice").state, LinkState::VerificationStarted);

    assert_eq!(world.advance_to(2, TTL - 1), 0);
    assert_eq!(world.advance_to(3, TTL + 1), 1);
    assert!(world.module.application_links(OWNER).unwrap().is_empty());
    assert!(matches!(
        world.module.events().last(),
        Some(LinkEvent::ApplicationLinkDeleted { expiration_time, .. }) if *expiration_time == TTL
    ));
}

#[test]
fn test_forged_signature_fails_link() {
    let mut world = World::new();
    let request = world.submit("alice");
    world.ack(&request, 7);

    // Signed value differs from the attested one.
    let mut attested = OracleScriptResult::decode(&world.attestation("mallory", "alice")).unwrap();
    attested.value = hex::encode("alice");
    let forged_response = attested.encode().unwrap();
    let response = world.response(&request, 7, ResolveStatus::Success, forged_response);
    world.module.recv_packet(&response).unwrap();

    let link = world.link("alice");
    assert_eq!(link.state, LinkState::VerificationError);
    assert_eq!(link.result, Some(LinkResult::failed(REASON_INVALID_SIGNATURE)));
}

#[test]
fn test_request_timeout() {
    let mut world = World::new();
    let request = world.submit("alice");
    world.ack(&request, 7);

    world.module.timeout_packet(&request).unwrap();
    let link = world.link("alice");
    assert_eq!(link.state, LinkState::VerificationTimedOut);
}

#[test]
fn test_timeout_before_ack() {
    let mut world = World::new();
    let request = world.submit("alice");

    world.module.timeout_packet(&request).unwrap();
    let link = world.link("alice");
    assert_eq!(link.state, LinkState::VerificationError);
    assert_eq!(link.result, Some(LinkResult::failed(REASON_TIMEOUT)));
}
