//! # Value Objects
//!
//! Verification state of an application link and the oracle outcome.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Verification state of an application link.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkState {
    /// Request stored, oracle request id not assigned yet.
    #[default]
    Initialized,
    /// Oracle chain accepted the request and assigned an id.
    VerificationStarted,
    /// Oracle attested ownership and the attestation verified.
    VerificationSuccess,
    /// Request rejected or the oracle reported failure.
    VerificationError,
    /// Transport timed the request packet out.
    VerificationTimedOut,
}

impl LinkState {
    /// Whether a single step from `self` to `target` is legal.
    ///
    /// Terminal states have no outgoing transition; removal by expiry is a
    /// deletion, not a transition.
    pub fn can_transition_to(&self, target: LinkState) -> bool {
        matches!(
            (self, target),
            (
                LinkState::Initialized,
                LinkState::VerificationStarted | LinkState::VerificationError
            ) | (
                LinkState::VerificationStarted,
                LinkState::VerificationSuccess
                    | LinkState::VerificationError
                    | LinkState::VerificationTimedOut
            )
        )
    }

    /// Check if terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            LinkState::VerificationSuccess
                | LinkState::VerificationError
                | LinkState::VerificationTimedOut
        )
    }

    /// All states, in declaration order.
    pub const ALL: [LinkState; 5] = [
        LinkState::Initialized,
        LinkState::VerificationStarted,
        LinkState::VerificationSuccess,
        LinkState::VerificationError,
        LinkState::VerificationTimedOut,
    ];
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LinkState::Initialized => "initialized",
            LinkState::VerificationStarted => "verification_started",
            LinkState::VerificationSuccess => "verification_success",
            LinkState::VerificationError => "verification_error",
            LinkState::VerificationTimedOut => "verification_timed_out",
        };
        f.write_str(name)
    }
}

/// Outcome recorded on a terminal application link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkResult {
    /// Oracle-attested value and the hex-encoded signature over it.
    Success {
        /// Hex-encoded attested value.
        value: String,
        /// Hex-encoded signature over the value.
        signature: String,
    },
    /// Human-readable failure reason.
    Failed {
        /// Reason.
        error: String,
    },
}

impl LinkResult {
    /// Build a failure result.
    pub fn failed(error: impl Into<String>) -> Self {
        LinkResult::Failed {
            error: error.into(),
        }
    }
}
