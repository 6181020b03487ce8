//! # Verification Signals
//!
//! Inputs that drive an application link out of its current state.

use serde::{Deserialize, Serialize};

/// Failure reason recorded when the oracle reports a failed request.
pub const REASON_REQUEST_FAILED: &str = "request failed";
/// Failure reason recorded when the oracle reports an expired request.
pub const REASON_REQUEST_EXPIRED: &str = "request expired";
/// Failure reason recorded when the transport times the request out.
pub const REASON_TIMEOUT: &str = "timeout";

/// Oracle verdict, after the relay checked any attested evidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseOutcome {
    /// Oracle succeeded and the attestation verified.
    Verified {
        /// Hex-encoded attested value.
        value: String,
        /// Hex-encoded signature.
        signature: String,
    },
    /// Oracle succeeded but the attestation was rejected.
    Rejected {
        /// Reason.
        reason: String,
    },
    /// Oracle reported failure.
    Failure,
    /// Oracle reported the request expired.
    Expired,
}

/// Completion signal delivered for a tracked oracle request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationSignal {
    /// Oracle chain accepted the request and assigned an id.
    Acknowledged {
        /// Assigned request id.
        request_id: u64,
    },
    /// Oracle chain rejected the request packet.
    AckError {
        /// Error message from the acknowledgement.
        error: String,
    },
    /// Oracle response packet.
    OracleResponse {
        /// Request id the response answers.
        request_id: u64,
        /// Verdict.
        outcome: ResponseOutcome,
    },
    /// Transport timed the request packet out.
    Timeout,
}

impl VerificationSignal {
    /// Short name, for logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            VerificationSignal::Acknowledged { .. } => "acknowledgement",
            VerificationSignal::AckError { .. } => "error acknowledgement",
            VerificationSignal::OracleResponse { .. } => "oracle response",
            VerificationSignal::Timeout => "timeout",
        }
    }
}
