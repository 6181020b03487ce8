//! # PL-03 Application Link Verification
//!
//! Lifecycle of oracle-verified application links.
//!
//! **Subsystem ID:** 3  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## States
//!
//! | State | Terminal | Entered on |
//! |-------|----------|------------|
//! | `Initialized` | no | link creation |
//! | `VerificationStarted` | no | request acknowledged |
//! | `VerificationSuccess` | yes | verified oracle response |
//! | `VerificationError` | yes | error ack, failed/expired/rejected response |
//! | `VerificationTimedOut` | yes | packet timeout after start |
//!
//! Signals are delivered at most once per state change: replays against a
//! terminal link succeed without touching storage or emitting events.
//!
//! ## Module Structure
//!
//! ```text
//! pl-03-app-link-verification/
//! ├── domain/           # signals, transition rules, errors
//! ├── state_machine.rs  # ApplicationLinkStateMachine
//! └── sweeper.rs        # ExpirySweeper
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod state_machine;
pub mod sweeper;

// Re-exports
pub use domain::{
    apply_signal, ResponseOutcome, StateMachineError, Step, VerificationSignal,
    REASON_REQUEST_EXPIRED, REASON_REQUEST_FAILED, REASON_TIMEOUT,
};
pub use state_machine::{deleted_event, ApplicationLinkStateMachine, TransitionOutcome};
pub use sweeper::ExpirySweeper;
