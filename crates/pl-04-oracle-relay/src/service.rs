//! # Oracle Relay Service
//!
//! Sends oracle verification requests for application links and turns the
//! transport's three completions (acknowledgement, response, timeout) into
//! state machine signals.

use crate::domain::{
    encode_json, try_decode, Acknowledgement, ChannelEndpoint, OracleParams,
    OracleRequestPacketAcknowledgement, OracleRequestPacketData, OracleResponsePacketData,
    OracleScriptCallData, OracleScriptResult, Packet, PacketTimeout, RelayError, ResolveStatus,
};
use crate::ports::{AccountKeys, HandleOutcome, PacketHandler, PacketTransport, RelayEnv};
use pl_01_proof_verification::{ProofVerificationApi, ProofVerifier};
use pl_02_link_storage::{
    ApplicationLink, ApplicationLinkData, KeyValueStore, LinkStore, OracleRequest,
};
use pl_03_app_link_verification::{
    ApplicationLinkStateMachine, ResponseOutcome, TransitionOutcome, VerificationSignal,
};
use shared_types::{validate_key_segment, LinkEvent, OwnerId};
use tracing::{debug, error, info, warn};

/// Failure reason when the oracle read a different account.
pub const REASON_INVALID_USERNAME: &str = "invalid application username";
/// Failure reason when the attested signature does not verify.
pub const REASON_INVALID_SIGNATURE: &str = "invalid signature";
/// Failure reason when the oracle result cannot be decoded.
pub const REASON_INVALID_RESULT: &str = "invalid oracle result";
/// Failure reason when the profile owner has no account key to check with.
pub const REASON_UNKNOWN_ACCOUNT_KEY: &str = "account public key not found";

/// User request to verify an application account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRequest {
    /// Profile owner.
    pub user: OwnerId,
    /// Application account to verify.
    pub data: ApplicationLinkData,
    /// Application-specific call data for the oracle script.
    pub call_data: String,
    /// Local end of the oracle channel.
    pub source: ChannelEndpoint,
    /// Packet timeout.
    pub timeout: PacketTimeout,
}

/// Oracle request protocol.
#[derive(Debug, Clone)]
pub struct OracleRelay {
    params: OracleParams,
    validity_duration: u64,
    state_machine: ApplicationLinkStateMachine,
    verifier: ProofVerifier,
}

impl OracleRelay {
    /// Create a relay sending requests with `params`. Links expire
    /// `validity_duration` seconds after creation.
    pub fn new(params: OracleParams, validity_duration: u64) -> Self {
        Self {
            params,
            validity_duration,
            state_machine: ApplicationLinkStateMachine::new(),
            verifier: ProofVerifier::new(),
        }
    }

    /// Oracle parameters in use.
    pub fn params(&self) -> &OracleParams {
        &self.params
    }

    // =========================================================================
    // OUTBOUND
    // =========================================================================

    /// Send an oracle request for `request` and store the link as
    /// `Initialized`, superseding any link for the same application account.
    ///
    /// Nothing is stored when the transport refuses the packet.
    pub fn send_verification_request<S, T>(
        &self,
        env: &mut RelayEnv<'_, S>,
        transport: &mut T,
        request: &VerificationRequest,
    ) -> Result<OracleRequest, RelayError>
    where
        S: KeyValueStore,
        T: PacketTransport + ?Sized,
    {
        validate_key_segment("user", &request.user)
            .map_err(|e| RelayError::Validation(e.to_string()))?;
        request.data.validate()?;
        if request.call_data.trim().is_empty() {
            return Err(RelayError::Validation("call data must not be blank".to_string()));
        }

        let client_id = unique_client_id(env.store, &request.user, &request.data)?;
        let calldata = OracleScriptCallData {
            application: request.data.application.clone(),
            call_data: request.call_data.clone(),
        }
        .encode()?;

        let oracle_request = OracleRequest {
            id: 0,
            oracle_script_id: self.params.script_id,
            call_data: calldata.clone(),
            client_id: client_id.clone(),
        };
        let now = env.block.time;
        let link = ApplicationLink::new(
            request.user.clone(),
            request.data.clone(),
            oracle_request.clone(),
            now,
            now.saturating_add(self.validity_duration),
        );
        link.validate()?;

        let packet = OracleRequestPacketData {
            client_id: client_id.clone(),
            oracle_script_id: self.params.script_id,
            calldata,
            ask_count: self.params.ask_count,
            min_count: self.params.min_count,
            fee_limit: self.params.fee_amount.clone(),
            fee_payer: String::new(),
            prepare_gas: self.params.prepare_gas,
            execute_gas: self.params.execute_gas,
        };
        let sequence = transport.send_packet(&request.source, request.timeout, encode_json(&packet)?)?;

        self.state_machine
            .initialize(env.store, env.events, &link, sequence)?;
        info!(
            user = %request.user,
            client_id,
            sequence,
            source = %request.source,
            "[pl-04] oracle request sent"
        );
        Ok(oracle_request)
    }

    // =========================================================================
    // COMPLETIONS
    // =========================================================================

    /// Apply the oracle chain's acknowledgement of a request.
    pub fn handle_acknowledgement<S: KeyValueStore>(
        &self,
        env: &mut RelayEnv<'_, S>,
        request: &OracleRequestPacketData,
        acknowledgement: &Acknowledgement,
    ) -> Result<TransitionOutcome, RelayError> {
        let signal = match acknowledgement {
            Acknowledgement::Result(body) => {
                let ack: OracleRequestPacketAcknowledgement = serde_json::from_slice(body)?;
                VerificationSignal::Acknowledged {
                    request_id: ack.request_id,
                }
            }
            Acknowledgement::Error(error) => VerificationSignal::AckError {
                error: error.clone(),
            },
        };
        Ok(self
            .state_machine
            .apply(env.store, env.events, &request.client_id, &signal)?)
    }

    /// Apply an oracle response. Successful results are only accepted once
    /// the attested username and signature check out.
    pub fn handle_response<S: KeyValueStore>(
        &self,
        env: &mut RelayEnv<'_, S>,
        response: &OracleResponsePacketData,
    ) -> Result<TransitionOutcome, RelayError> {
        let link = env
            .store
            .get_application_link_by_client_id(&response.client_id)?;
        if link.state.is_terminal() {
            warn!(
                client_id = %response.client_id,
                state = %link.state,
                "[pl-04] response for completed link ignored"
            );
            return Ok(TransitionOutcome::Ignored { state: link.state });
        }

        let outcome = match response.resolve_status {
            ResolveStatus::Failure => ResponseOutcome::Failure,
            ResolveStatus::Expired => ResponseOutcome::Expired,
            ResolveStatus::Success => self.check_attestation(env.accounts, &link, &response.result),
        };
        let signal = VerificationSignal::OracleResponse {
            request_id: response.request_id,
            outcome,
        };
        Ok(self
            .state_machine
            .apply(env.store, env.events, &response.client_id, &signal)?)
    }

    /// Apply the transport's timeout of a request.
    pub fn handle_timeout<S: KeyValueStore>(
        &self,
        env: &mut RelayEnv<'_, S>,
        request: &OracleRequestPacketData,
    ) -> Result<TransitionOutcome, RelayError> {
        Ok(self.state_machine.apply(
            env.store,
            env.events,
            &request.client_id,
            &VerificationSignal::Timeout,
        )?)
    }

    fn check_attestation(
        &self,
        accounts: &dyn AccountKeys,
        link: &ApplicationLink,
        result: &[u8],
    ) -> ResponseOutcome {
        let rejected = |reason: &str| ResponseOutcome::Rejected {
            reason: reason.to_string(),
        };

        let Ok(attested) = OracleScriptResult::decode(result) else {
            return rejected(REASON_INVALID_RESULT);
        };
        if attested.username.to_lowercase() != link.data.username.to_lowercase() {
            return rejected(REASON_INVALID_USERNAME);
        }
        let Some(key) = accounts.public_key(&link.user) else {
            return rejected(REASON_UNKNOWN_ACCOUNT_KEY);
        };
        let Ok(value) = hex::decode(&attested.value) else {
            return rejected(REASON_INVALID_RESULT);
        };
        let Ok(signature) = hex::decode(&attested.signature) else {
            return rejected(REASON_INVALID_SIGNATURE);
        };
        if let Err(e) = self.verifier.verify_signature(&key, &value, &signature) {
            debug!(client_id = link.client_id(), error = %e, "[pl-04] attestation rejected");
            return rejected(REASON_INVALID_SIGNATURE);
        }

        ResponseOutcome::Verified {
            value: attested.value,
            signature: attested.signature,
        }
    }
}

/// `{user}-{application}-{username}`, suffixed with `-{n}` while the id is
/// still tracking another link.
fn unique_client_id<S: KeyValueStore>(
    store: &LinkStore<S>,
    user: &str,
    data: &ApplicationLinkData,
) -> Result<String, RelayError> {
    let base = format!("{user}-{}-{}", data.application, data.username);
    let mut candidate = base.clone();
    let mut n = 0u64;
    while store.has_client_id(&candidate)? {
        n += 1;
        candidate = format!("{base}-{n}");
    }
    Ok(candidate)
}

impl<S: KeyValueStore> PacketHandler<S> for OracleRelay {
    fn name(&self) -> &'static str {
        "oracle"
    }

    fn on_recv(&self, env: &mut RelayEnv<'_, S>, packet: &Packet) -> HandleOutcome<Acknowledgement> {
        let Some(response) = try_decode::<OracleResponsePacketData>(&packet.data) else {
            return HandleOutcome::NotMine;
        };
        debug!(
            client_id = %response.client_id,
            request_id = response.request_id,
            status = %response.resolve_status,
            "[pl-04] oracle response received"
        );

        let ack = match self.handle_response(env, &response) {
            Ok(_) => Acknowledgement::received(),
            Err(e) => {
                error!(client_id = %response.client_id, error = %e, "[pl-04] oracle response failed");
                Acknowledgement::error(e.to_string())
            }
        };
        env.events.emit(LinkEvent::OraclePacketReceived {
            client_id: response.client_id.clone(),
            request_id: response.request_id,
            resolve_status: response.resolve_status.to_string(),
        });
        HandleOutcome::Handled(ack)
    }

    fn on_acknowledgement(
        &self,
        env: &mut RelayEnv<'_, S>,
        packet: &Packet,
        acknowledgement: &[u8],
    ) -> HandleOutcome<Result<(), RelayError>> {
        let Some(request) = try_decode::<OracleRequestPacketData>(&packet.data) else {
            return HandleOutcome::NotMine;
        };
        let result = serde_json::from_slice::<Acknowledgement>(acknowledgement)
            .map_err(RelayError::from)
            .and_then(|ack| self.handle_acknowledgement(env, &request, &ack))
            .map(|_| ());
        HandleOutcome::Handled(result)
    }

    fn on_timeout(
        &self,
        env: &mut RelayEnv<'_, S>,
        packet: &Packet,
    ) -> HandleOutcome<Result<(), RelayError>> {
        let Some(request) = try_decode::<OracleRequestPacketData>(&packet.data) else {
            return HandleOutcome::NotMine;
        };
        HandleOutcome::Handled(self.handle_timeout(env, &request).map(|_| ()))
    }
}

#[cfg(test)]
mod tests;
