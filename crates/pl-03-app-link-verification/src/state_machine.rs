//! # Application Link State Machine
//!
//! Loads a link through the store, applies a signal with
//! [`apply_signal`](crate::domain::apply_signal), writes the result back in
//! one store operation and emits one event per step.

use crate::domain::{apply_signal, StateMachineError, Step, VerificationSignal};
use pl_02_link_storage::{ApplicationLink, KeyValueStore, LinkState, LinkStore};
use shared_types::{EventManager, LinkEvent};
use tracing::{info, warn};

/// Result of delivering a signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The link changed state.
    Applied {
        /// Steps taken, in order.
        steps: Vec<Step>,
        /// Link as persisted.
        link: ApplicationLink,
    },
    /// The signal was already applied (or is a duplicate); nothing changed.
    Ignored {
        /// Current state of the link.
        state: LinkState,
    },
}

impl TransitionOutcome {
    /// State after delivery.
    pub fn state(&self) -> LinkState {
        match self {
            TransitionOutcome::Applied { link, .. } => link.state,
            TransitionOutcome::Ignored { state } => *state,
        }
    }
}

/// Drives application links through their verification states.
#[derive(Debug, Default, Clone, Copy)]
pub struct ApplicationLinkStateMachine;

impl ApplicationLinkStateMachine {
    /// Create a state machine.
    pub fn new() -> Self {
        Self
    }

    /// Store a new `Initialized` link, replacing any link the user already
    /// holds for the same application account.
    ///
    /// `packet_sequence` is the transport sequence of the request packet
    /// already sent for this link.
    pub fn initialize<S: KeyValueStore>(
        &self,
        store: &mut LinkStore<S>,
        events: &mut EventManager,
        link: &ApplicationLink,
        packet_sequence: u64,
    ) -> Result<(), StateMachineError> {
        if link.state != LinkState::Initialized || link.result.is_some() {
            return Err(StateMachineError::NotInitial(link.state));
        }
        link.validate()?;

        if let Some(previous) = store.replace_application_link(link)? {
            info!(
                user = %previous.user,
                client_id = previous.client_id(),
                "[pl-03] superseded application link"
            );
            events.emit(deleted_event(&previous));
        }
        events.emit(LinkEvent::ApplicationLinkCreated {
            user: link.user.clone(),
            application: link.data.application.clone(),
            username: link.data.username.clone(),
            client_id: link.client_id().to_string(),
            packet_sequence,
            expiration_time: link.expiration_time,
        });
        info!(
            user = %link.user,
            client_id = link.client_id(),
            expiration_time = link.expiration_time,
            "[pl-03] application link initialized"
        );
        Ok(())
    }

    /// Deliver `signal` to the link tracked by `client_id`.
    ///
    /// Unknown client ids fail with a `NotFound` store error and change
    /// nothing. Replays against terminal links succeed as `Ignored`.
    pub fn apply<S: KeyValueStore>(
        &self,
        store: &mut LinkStore<S>,
        events: &mut EventManager,
        client_id: &str,
        signal: &VerificationSignal,
    ) -> Result<TransitionOutcome, StateMachineError> {
        let mut link = store.get_application_link_by_client_id(client_id)?;
        let steps = apply_signal(&mut link, signal)?;

        if steps.is_empty() {
            warn!(
                client_id,
                state = %link.state,
                signal = signal.name(),
                "[pl-03] signal ignored"
            );
            return Ok(TransitionOutcome::Ignored { state: link.state });
        }

        store.put_application_link(&link)?;
        for step in &steps {
            info!(client_id, from = %step.from, to = %step.to, "[pl-03] application link transition");
            events.emit(LinkEvent::ApplicationLinkStateChanged {
                user: link.user.clone(),
                application: link.data.application.clone(),
                username: link.data.username.clone(),
                client_id: client_id.to_string(),
                from: step.from.to_string(),
                to: step.to.to_string(),
            });
        }
        Ok(TransitionOutcome::Applied { steps, link })
    }
}

/// Deletion event for `link`.
pub fn deleted_event(link: &ApplicationLink) -> LinkEvent {
    LinkEvent::ApplicationLinkDeleted {
        user: link.user.clone(),
        application: link.data.application.clone(),
        username: link.data.username.clone(),
        expiration_time: link.expiration_time,
    }
}
