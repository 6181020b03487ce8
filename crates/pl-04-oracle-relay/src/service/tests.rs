use super::*;
use crate::adapters::{InMemoryAccountKeys, LoopbackTransport};
use crate::domain::TransportError;
use pl_01_proof_verification::PublicKey;
use pl_02_link_storage::{InMemoryKVStore, JsonLinkCodec, LinkResult, LinkState};
use shared_crypto::Secp256k1KeyPair;
use shared_types::{BlockContext, EventManager};
use std::sync::Arc;

const OWNER: &str = "desmos1owner";
const CLIENT: &str = "desmos1owner-twitter-alice";
const TTL: u64 = 240;

struct Fixture {
    store: LinkStore<InMemoryKVStore>,
    events: EventManager,
    accounts: InMemoryAccountKeys,
    transport: LoopbackTransport,
    relay: OracleRelay,
    owner_key: Secp256k1KeyPair,
    block: BlockContext,
}

impl Fixture {
    fn new() -> Self {
        let owner_key = Secp256k1KeyPair::generate();
        let mut accounts = InMemoryAccountKeys::new();
        accounts.insert(
            OWNER,
            PublicKey::Secp256k1 {
                key: owner_key.public_key().to_compressed().to_vec(),
            },
        );
        let mut transport = LoopbackTransport::new();
        transport.open_channel(source(), ChannelEndpoint::new("oracle", "channel-9"));
        Self {
            store: LinkStore::new(InMemoryKVStore::new(), Arc::new(JsonLinkCodec)),
            events: EventManager::new(),
            accounts,
            transport,
            relay: OracleRelay::new(OracleParams::default(), TTL),
            owner_key,
            block: BlockContext::new(1, 0),
        }
    }

    fn send(&mut self) -> Result<OracleRequest, RelayError> {
        let request = request();
        let mut env = RelayEnv {
            store: &mut self.store,
            events: &mut self.events,
            block: self.block,
            accounts: &self.accounts,
        };
        self.relay
            .send_verification_request(&mut env, &mut self.transport, &request)
    }

    fn sent_request(&self) -> OracleRequestPacketData {
        let packet = self.transport.last_sent().unwrap();
        serde_json::from_slice(&packet.data).unwrap()
    }

    fn ack(&mut self, ack: Acknowledgement) -> Result<TransitionOutcome, RelayError> {
        let request = self.sent_request();
        let mut env = RelayEnv {
            store: &mut self.store,
            events: &mut self.events,
            block: self.block,
            accounts: &self.accounts,
        };
        self.relay.handle_acknowledgement(&mut env, &request, &ack)
    }

    fn ack_id(&mut self, request_id: u64) -> Result<TransitionOutcome, RelayError> {
        let body = OracleRequestPacketAcknowledgement { request_id };
        self.ack(Acknowledgement::json(&body).unwrap())
    }

    fn respond(&mut self, response: &OracleResponsePacketData) -> Result<TransitionOutcome, RelayError> {
        let mut env = RelayEnv {
            store: &mut self.store,
            events: &mut self.events,
            block: self.block,
            accounts: &self.accounts,
        };
        self.relay.handle_response(&mut env, response)
    }

    fn timeout(&mut self) -> Result<TransitionOutcome, RelayError> {
        let request = self.sent_request();
        let mut env = RelayEnv {
            store: &mut self.store,
            events: &mut self.events,
            block: self.block,
            accounts: &self.accounts,
        };
        self.relay.handle_timeout(&mut env, &request)
    }

    fn attestation(&self, value: &str, username: &str) -> Vec<u8> {
        OracleScriptResult {
            signature: hex::encode(self.owner_key.sign(value.as_bytes()).as_bytes()),
            value: hex::encode(value),
            username: username.to_string(),
        }
        .encode()
        .unwrap()
    }

    fn link(&self) -> ApplicationLink {
        self.store.get_application_link_by_client_id(CLIENT).unwrap()
    }
}

fn source() -> ChannelEndpoint {
    ChannelEndpoint::new("profiles", "channel-0")
}

fn request() -> VerificationRequest {
    VerificationRequest {
        user: OWNER.to_string(),
        data: ApplicationLinkData::new("Twitter", "alice"),
        call_data: "7b22757365726e616d65223a22616c696365227d".to_string(),
        source: source(),
        timeout: PacketTimeout::new(0, 600),
    }
}

fn response(request_id: u64, status: ResolveStatus, result: Vec<u8>) -> OracleResponsePacketData {
    OracleResponsePacketData {
        client_id: CLIENT.to_string(),
        request_id,
        ans_count: 1,
        request_time: 10,
        resolve_time: 20,
        resolve_status: status,
        result,
    }
}

fn failed(link: &ApplicationLink) -> &str {
    match &link.result {
        Some(LinkResult::Failed { error }) => error,
        other => panic!("expected failed result, got {other:?}"),
    }
}

// =============================================================================
// OUTBOUND
// =============================================================================

#[test]
fn test_send_stores_initialized_link_and_packet() {
    let mut fx = Fixture::new();
    let oracle_request = fx.send().unwrap();
    assert_eq!(oracle_request.client_id, CLIENT);
    assert_eq!(oracle_request.id, 0);

    let link = fx.link();
    assert_eq!(link.state, LinkState::Initialized);
    assert_eq!(link.data.application, "twitter");
    assert_eq!(link.expiration_time, TTL);

    let packet = fx.sent_request();
    let params = OracleParams::default();
    assert_eq!(packet.client_id, CLIENT);
    assert_eq!(packet.oracle_script_id, params.script_id);
    assert_eq!(packet.fee_limit, params.fee_amount);
    assert_eq!(packet.prepare_gas, params.prepare_gas);
    let call_data = OracleScriptCallData::decode(&packet.calldata).unwrap();
    assert_eq!(call_data.application, "twitter");
    assert_eq!(call_data.call_data, request().call_data);

    assert!(matches!(
        fx.events.events()[0],
        LinkEvent::ApplicationLinkCreated { packet_sequence: 1, .. }
    ));
}

#[test]
fn test_transport_failure_persists_nothing() {
    let mut fx = Fixture::new();
    fx.transport.release_capability(&source());

    let err = fx.send().unwrap_err();
    assert!(matches!(
        err,
        RelayError::Protocol(TransportError::CapabilityNotFound { .. })
    ));
    assert!(!fx.store.has_client_id(CLIENT).unwrap());
    assert!(fx.events.is_empty());
}

#[test]
fn test_blank_call_data_rejected_before_sending() {
    let mut fx = Fixture::new();
    let mut request = request();
    request.call_data = "  ".to_string();
    let mut env = RelayEnv {
        store: &mut fx.store,
        events: &mut fx.events,
        block: fx.block,
        accounts: &fx.accounts,
    };
    let err = fx
        .relay
        .send_verification_request(&mut env, &mut fx.transport, &request)
        .unwrap_err();
    assert!(matches!(err, RelayError::Validation(_)));
    assert!(fx.transport.sent().is_empty());
}

#[test]
fn test_resubmission_supersedes_with_fresh_client_id() {
    let mut fx = Fixture::new();
    fx.send().unwrap();
    let second = fx.send().unwrap();

    assert_eq!(second.client_id, format!("{CLIENT}-1"));
    assert!(!fx.store.has_client_id(CLIENT).unwrap());
    let link = fx
        .store
        .get_application_link(OWNER, "twitter", "alice")
        .unwrap();
    assert_eq!(link.client_id(), second.client_id);
}

// =============================================================================
// COMPLETIONS
// =============================================================================

#[test]
fn test_verified_response_succeeds() {
    let mut fx = Fixture::new();
    fx.send().unwrap();
    fx.ack_id(7).unwrap();
    assert_eq!(fx.link().state, LinkState::VerificationStarted);
    assert_eq!(fx.link().oracle_request.id, 7);

    let result = fx.attestation("alice", "alice");
    let outcome = fx
        .respond(&response(7, ResolveStatus::Success, result))
        .unwrap();

    assert_eq!(outcome.state(), LinkState::VerificationSuccess);
    match fx.link().result {
        Some(LinkResult::Success { value, .. }) => assert_eq!(value, hex::encode("alice")),
        other => panic!("expected success, got {other:?}"),
    }
}

#[test]
fn test_username_match_is_case_insensitive() {
    let mut fx = Fixture::new();
    fx.send().unwrap();
    fx.ack_id(7).unwrap();
    let result = fx.attestation("alice", "ALICE");
    fx.respond(&response(7, ResolveStatus::Success, result))
        .unwrap();
    assert_eq!(fx.link().state, LinkState::VerificationSuccess);
}

#[test]
fn test_other_username_rejected() {
    let mut fx = Fixture::new();
    fx.send().unwrap();
    fx.ack_id(7).unwrap();
    let result = fx.attestation("alice", "bob");
    fx.respond(&response(7, ResolveStatus::Success, result))
        .unwrap();

    let link = fx.link();
    assert_eq!(link.state, LinkState::VerificationError);
    assert_eq!(failed(&link), REASON_INVALID_USERNAME);
}

#[test]
fn test_signature_by_other_key_rejected() {
    let mut fx = Fixture::new();
    fx.send().unwrap();
    fx.ack_id(7).unwrap();
    let result = OracleScriptResult {
        signature: hex::encode(Secp256k1KeyPair::generate().sign(b"alice").as_bytes()),
        value: hex::encode("alice"),
        username: "alice".to_string(),
    }
    .encode()
    .unwrap();
    fx.respond(&response(7, ResolveStatus::Success, result))
        .unwrap();

    let link = fx.link();
    assert_eq!(link.state, LinkState::VerificationError);
    assert_eq!(failed(&link), REASON_INVALID_SIGNATURE);
}

#[test]
fn test_missing_account_key_rejected() {
    let mut fx = Fixture::new();
    fx.send().unwrap();
    fx.ack_id(7).unwrap();
    let result = fx.attestation("alice", "alice");
    fx.accounts = InMemoryAccountKeys::new();
    fx.respond(&response(7, ResolveStatus::Success, result))
        .unwrap();
    assert_eq!(failed(&fx.link()), REASON_UNKNOWN_ACCOUNT_KEY);
}

#[test]
fn test_signature_over_hex_text_rejected() {
    let mut fx = Fixture::new();
    fx.send().unwrap();
    fx.ack_id(7).unwrap();
    let value = hex::encode("alice");
    let result = OracleScriptResult {
        signature: hex::encode(fx.owner_key.sign(value.as_bytes()).as_bytes()),
        value,
        username: "alice".to_string(),
    }
    .encode()
    .unwrap();
    fx.respond(&response(7, ResolveStatus::Success, result))
        .unwrap();
    assert_eq!(failed(&fx.link()), REASON_INVALID_SIGNATURE);
}

#[test]
fn test_non_hex_value_rejected() {
    let mut fx = Fixture::new();
    fx.send().unwrap();
    fx.ack_id(7).unwrap();
    let result = OracleScriptResult {
        signature: hex::encode(fx.owner_key.sign(b"alice").as_bytes()),
        value: "alice".to_string(),
        username: "alice".to_string(),
    }
    .encode()
    .unwrap();
    fx.respond(&response(7, ResolveStatus::Success, result))
        .unwrap();

    let link = fx.link();
    assert_eq!(link.state, LinkState::VerificationError);
    assert_eq!(failed(&link), REASON_INVALID_RESULT);
}

#[test]
fn test_undecodable_result_rejected() {
    let mut fx = Fixture::new();
    fx.send().unwrap();
    fx.ack_id(7).unwrap();
    fx.respond(&response(7, ResolveStatus::Success, vec![0, 0, 0, 9]))
        .unwrap();
    assert_eq!(failed(&fx.link()), REASON_INVALID_RESULT);
}

#[test]
fn test_expired_response_fails_link() {
    let mut fx = Fixture::new();
    fx.send().unwrap();
    fx.ack_id(7).unwrap();
    fx.respond(&response(7, ResolveStatus::Expired, vec![]))
        .unwrap();

    let link = fx.link();
    assert_eq!(link.state, LinkState::VerificationError);
    assert_eq!(failed(&link), "request expired");
}

#[test]
fn test_failure_response_fails_link() {
    let mut fx = Fixture::new();
    fx.send().unwrap();
    fx.ack_id(7).unwrap();
    fx.respond(&response(7, ResolveStatus::Failure, vec![]))
        .unwrap();
    assert_eq!(failed(&fx.link()), "request failed");
}

#[test]
fn test_duplicate_response_is_noop() {
    let mut fx = Fixture::new();
    fx.send().unwrap();
    fx.ack_id(7).unwrap();
    let expired = response(7, ResolveStatus::Expired, vec![]);
    fx.respond(&expired).unwrap();
    let link = fx.link();
    let events = fx.events.len();

    let second = fx.respond(&expired).unwrap();
    assert_eq!(
        second,
        TransitionOutcome::Ignored {
            state: LinkState::VerificationError
        }
    );
    assert_eq!(fx.link(), link);
    assert_eq!(fx.events.len(), events);
}

#[test]
fn test_request_id_mismatch_leaves_link_started() {
    let mut fx = Fixture::new();
    fx.send().unwrap();
    fx.ack_id(7).unwrap();

    let err = fx
        .respond(&response(8, ResolveStatus::Expired, vec![]))
        .unwrap_err();
    assert!(matches!(err, RelayError::RequestIdMismatch { expected: 7, got: 8, .. }));
    assert_eq!(fx.link().state, LinkState::VerificationStarted);
}

#[test]
fn test_response_before_ack_adopts_request_id() {
    let mut fx = Fixture::new();
    fx.send().unwrap();
    let result = fx.attestation("alice", "alice");
    fx.respond(&response(9, ResolveStatus::Success, result))
        .unwrap();

    let link = fx.link();
    assert_eq!(link.state, LinkState::VerificationSuccess);
    assert_eq!(link.oracle_request.id, 9);
}

#[test]
fn test_error_ack_fails_link() {
    let mut fx = Fixture::new();
    fx.send().unwrap();
    fx.ack(Acknowledgement::error("oracle script not found"))
        .unwrap();

    let link = fx.link();
    assert_eq!(link.state, LinkState::VerificationError);
    assert_eq!(failed(&link), "oracle script not found");
}

#[test]
fn test_malformed_ack_body_is_codec_error() {
    let mut fx = Fixture::new();
    fx.send().unwrap();
    let err = fx.ack(Acknowledgement::Result(b"nope".to_vec())).unwrap_err();
    assert!(matches!(err, RelayError::Codec(_)));
    assert_eq!(fx.link().state, LinkState::Initialized);
}

#[test]
fn test_timeout_after_start() {
    let mut fx = Fixture::new();
    fx.send().unwrap();
    fx.ack_id(7).unwrap();
    fx.timeout().unwrap();

    let link = fx.link();
    assert_eq!(link.state, LinkState::VerificationTimedOut);
    assert_eq!(failed(&link), "timeout");
}

#[test]
fn test_unknown_client_id_is_not_found() {
    let mut fx = Fixture::new();
    fx.send().unwrap();
    let mut stray = response(7, ResolveStatus::Expired, vec![]);
    stray.client_id = "someone-else".to_string();

    assert!(fx.respond(&stray).unwrap_err().is_not_found());
    assert_eq!(fx.link().state, LinkState::Initialized);
}
