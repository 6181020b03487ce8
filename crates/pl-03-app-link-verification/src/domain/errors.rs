//! # Domain Errors
//!
//! Error types for application link verification.

use pl_02_link_storage::{LinkState, StoreError};
use thiserror::Error;

/// State machine errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateMachineError {
    /// Transition not allowed from the current state.
    #[error("Invalid link transition: {from} -> {to}")]
    InvalidTransition {
        /// Current state.
        from: LinkState,
        /// Requested state.
        to: LinkState,
    },

    /// Signal carries a request id different from the tracked one.
    #[error("Request id mismatch for {client_id}: tracked {expected}, got {got}")]
    RequestIdMismatch {
        /// Correlation token.
        client_id: String,
        /// Tracked oracle request id.
        expected: u64,
        /// Id carried by the signal.
        got: u64,
    },

    /// Signal that cannot occur in the current state.
    #[error("Unexpected {signal} signal in state {state}")]
    UnexpectedSignal {
        /// Current state.
        state: LinkState,
        /// Signal name.
        signal: &'static str,
    },

    /// New link is not in the initial state.
    #[error("New application links must start as initialized, got {0}")]
    NotInitial(LinkState),

    /// Storage failure, including unknown client ids.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl StateMachineError {
    /// Whether the error is an unknown link.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StateMachineError::Store(StoreError::NotFound(_)))
    }
}
