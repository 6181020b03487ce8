//! # Transition Rules
//!
//! Pure computation of the next state of an application link. Nothing here
//! touches storage; the state machine service persists the result.
//!
//! | From | Signal | To |
//! |------|--------|----|
//! | `Initialized` | acknowledgement | `VerificationStarted` |
//! | `Initialized` | error acknowledgement | `VerificationError` |
//! | `Initialized` | timeout | `VerificationError` |
//! | `Initialized` | oracle response | `VerificationStarted`, then as below |
//! | `VerificationStarted` | response, verified | `VerificationSuccess` |
//! | `VerificationStarted` | response, rejected/failed/expired | `VerificationError` |
//! | `VerificationStarted` | timeout | `VerificationTimedOut` |
//! | terminal | anything | no change |

use super::errors::StateMachineError;
use super::signals::{
    ResponseOutcome, VerificationSignal, REASON_REQUEST_EXPIRED, REASON_REQUEST_FAILED,
    REASON_TIMEOUT,
};
use pl_02_link_storage::{ApplicationLink, LinkResult, LinkState};

/// One applied state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// State before.
    pub from: LinkState,
    /// State after.
    pub to: LinkState,
}

/// Apply `signal` to `link` in place and return the steps taken.
///
/// An empty list means the signal was a no-op: a replay against a terminal
/// link, or a duplicate acknowledgement. `link` is left unchanged on error.
pub fn apply_signal(
    link: &mut ApplicationLink,
    signal: &VerificationSignal,
) -> Result<Vec<Step>, StateMachineError> {
    if link.state.is_terminal() {
        return Ok(Vec::new());
    }

    let mut next = link.clone();
    let mut steps = Vec::with_capacity(2);

    match (next.state, signal) {
        (LinkState::Initialized, VerificationSignal::Acknowledged { request_id }) => {
            next.oracle_request.id = *request_id;
            steps.push(move_to(&mut next, LinkState::VerificationStarted, None)?);
        }
        (LinkState::Initialized, VerificationSignal::AckError { error }) => {
            steps.push(move_to(
                &mut next,
                LinkState::VerificationError,
                Some(LinkResult::failed(error.clone())),
            )?);
        }
        (LinkState::Initialized, VerificationSignal::Timeout) => {
            steps.push(move_to(
                &mut next,
                LinkState::VerificationError,
                Some(LinkResult::failed(REASON_TIMEOUT)),
            )?);
        }
        (LinkState::Initialized, VerificationSignal::OracleResponse { request_id, outcome }) => {
            // Response overtook the acknowledgement: adopt its id first.
            next.oracle_request.id = *request_id;
            steps.push(move_to(&mut next, LinkState::VerificationStarted, None)?);
            steps.push(resolve(&mut next, outcome)?);
        }
        (LinkState::VerificationStarted, VerificationSignal::Acknowledged { request_id }) => {
            check_request_id(&next, *request_id)?;
        }
        (LinkState::VerificationStarted, VerificationSignal::OracleResponse { request_id, outcome }) => {
            check_request_id(&next, *request_id)?;
            steps.push(resolve(&mut next, outcome)?);
        }
        (LinkState::VerificationStarted, VerificationSignal::Timeout) => {
            steps.push(move_to(
                &mut next,
                LinkState::VerificationTimedOut,
                Some(LinkResult::failed(REASON_TIMEOUT)),
            )?);
        }
        (state, signal) => {
            return Err(StateMachineError::UnexpectedSignal {
                state,
                signal: signal.name(),
            })
        }
    }

    *link = next;
    Ok(steps)
}

fn resolve(link: &mut ApplicationLink, outcome: &ResponseOutcome) -> Result<Step, StateMachineError> {
    let (to, result) = match outcome {
        ResponseOutcome::Verified { value, signature } => (
            LinkState::VerificationSuccess,
            LinkResult::Success {
                value: value.clone(),
                signature: signature.clone(),
            },
        ),
        ResponseOutcome::Rejected { reason } => {
            (LinkState::VerificationError, LinkResult::failed(reason.clone()))
        }
        ResponseOutcome::Failure => (
            LinkState::VerificationError,
            LinkResult::failed(REASON_REQUEST_FAILED),
        ),
        ResponseOutcome::Expired => (
            LinkState::VerificationError,
            LinkResult::failed(REASON_REQUEST_EXPIRED),
        ),
    };
    move_to(link, to, Some(result))
}

fn move_to(
    link: &mut ApplicationLink,
    to: LinkState,
    result: Option<LinkResult>,
) -> Result<Step, StateMachineError> {
    let from = link.state;
    if !from.can_transition_to(to) {
        return Err(StateMachineError::InvalidTransition { from, to });
    }
    link.state = to;
    if result.is_some() {
        link.result = result;
    }
    Ok(Step { from, to })
}

fn check_request_id(link: &ApplicationLink, request_id: u64) -> Result<(), StateMachineError> {
    if link.oracle_request.id != request_id {
        return Err(StateMachineError::RequestIdMismatch {
            client_id: link.client_id().to_string(),
            expected: link.oracle_request.id,
            got: request_id,
        });
    }
    Ok(())
}
