//! Domain layer for Application Link Verification.

pub mod errors;
pub mod signals;
pub mod transitions;

pub use errors::StateMachineError;
pub use signals::{
    ResponseOutcome, VerificationSignal, REASON_REQUEST_EXPIRED, REASON_REQUEST_FAILED,
    REASON_TIMEOUT,
};
pub use transitions::{apply_signal, Step};
