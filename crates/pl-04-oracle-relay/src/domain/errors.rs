//! # Domain Errors
//!
//! Error types for the oracle relay.

use pl_01_proof_verification::ProofError;
use pl_02_link_storage::StoreError;
use pl_03_app_link_verification::StateMachineError;
use thiserror::Error;

/// Failures of the packet transport when sending.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// No channel is open on the endpoint.
    #[error("Channel not found: port {port}, channel {channel}")]
    ChannelNotFound {
        /// Port id.
        port: String,
        /// Channel id.
        channel: String,
    },

    /// The module does not own the channel capability.
    #[error("Channel capability not found: port {port}, channel {channel}")]
    CapabilityNotFound {
        /// Port id.
        port: String,
        /// Channel id.
        channel: String,
    },

    /// The channel has no next send sequence.
    #[error("Send sequence unavailable: port {port}, channel {channel}")]
    SequenceUnavailable {
        /// Port id.
        port: String,
        /// Channel id.
        channel: String,
    },

    /// Timeout has neither a height nor a timestamp.
    #[error("Packet timeout must set a height or a timestamp")]
    InvalidTimeout,
}

/// OBI decoding failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObiError {
    /// Input ended before a field was complete.
    #[error("Unexpected end of OBI input: needed {needed} bytes, {remaining} left")]
    UnexpectedEnd {
        /// Bytes required.
        needed: usize,
        /// Bytes available.
        remaining: usize,
    },

    /// String field is not UTF-8.
    #[error("OBI string is not valid UTF-8")]
    InvalidUtf8,

    /// Bytes left after the last field.
    #[error("{0} trailing bytes after OBI value")]
    TrailingBytes(usize),

    /// String longer than a `u32` length prefix can describe.
    #[error("OBI string of {0} bytes is too long")]
    TooLong(usize),
}

/// Oracle relay errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// Malformed or policy-violating request.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Ownership proof rejected.
    #[error("Proof error: {0}")]
    Proof(#[from] ProofError),

    /// Transport refused the packet.
    #[error("Protocol error: {0}")]
    Protocol(#[from] TransportError),

    /// No link is tracked for the callback.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Callback names a different oracle request than the link tracks.
    #[error("Request id mismatch for {client_id}: tracked {expected}, got {got}")]
    RequestIdMismatch {
        /// Correlation token.
        client_id: String,
        /// Tracked oracle request id.
        expected: u64,
        /// Id carried by the callback.
        got: u64,
    },

    /// OBI encoding failure.
    #[error("OBI error: {0}")]
    Obi(#[from] ObiError),

    /// Packet or acknowledgement payload could not be encoded or decoded.
    #[error("Codec error: {0}")]
    Codec(String),

    /// Storage failure.
    #[error("Store error: {0}")]
    Store(StoreError),

    /// State machine refused the signal.
    #[error("State machine error: {0}")]
    StateMachine(StateMachineError),

    /// No registered handler recognised the packet.
    #[error("Unrecognized packet: {0}")]
    UnrecognizedPacket(String),
}

impl RelayError {
    /// Whether the error is an unknown link.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RelayError::NotFound(_))
    }
}

impl From<StoreError> for RelayError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => RelayError::NotFound(what),
            StoreError::Validation(msg) => RelayError::Validation(msg),
            other => RelayError::Store(other),
        }
    }
}

impl From<StateMachineError> for RelayError {
    fn from(err: StateMachineError) -> Self {
        match err {
            StateMachineError::Store(store) => store.into(),
            StateMachineError::RequestIdMismatch {
                client_id,
                expected,
                got,
            } => RelayError::RequestIdMismatch {
                client_id,
                expected,
                got,
            },
            other => RelayError::StateMachine(other),
        }
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        RelayError::Codec(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_not_found_maps_to_not_found() {
        let err: RelayError = StoreError::NotFound("client id x".to_string()).into();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_nested_store_error_is_flattened() {
        let err: RelayError =
            StateMachineError::Store(StoreError::NotFound("client id x".to_string())).into();
        assert_eq!(err, RelayError::NotFound("client id x".to_string()));
    }

    #[test]
    fn test_request_id_mismatch_is_preserved() {
        let err: RelayError = StateMachineError::RequestIdMismatch {
            client_id: "c".to_string(),
            expected: 7,
            got: 8,
        }
        .into();
        assert!(matches!(err, RelayError::RequestIdMismatch { expected: 7, got: 8, .. }));
    }
}
