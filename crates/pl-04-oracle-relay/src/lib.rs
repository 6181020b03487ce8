//! # PL-04 Oracle Relay
//!
//! Cross-chain packet protocol between the host chain and the oracle chain.
//!
//! **Subsystem ID:** 4  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Packet Life-Cycle
//!
//! ```text
//! send_verification_request ──► OracleRequestPacketData ──► oracle chain
//!                                        │
//!            ┌───────────────────────────┼──────────────────────────┐
//!            ▼                           ▼                          ▼
//!     acknowledgement          OracleResponsePacketData          timeout
//!   (request id or error)    (success / failure / expired)
//! ```
//!
//! Each completion becomes a signal for the application link state machine.
//! Successful oracle results are accepted only after the attested username
//! and the owner's signature over the attested value are checked.
//!
//! ## Dispatch
//!
//! | Handler | Receives | Acknowledges/Times out |
//! |---------|----------|------------------------|
//! | `ChainLinkPacketHandler` | `LinkChainAccountPacketData` | - |
//! | `OracleRelay` | `OracleResponsePacketData` | `OracleRequestPacketData` |
//!
//! ## Module Structure
//!
//! ```text
//! pl-04-oracle-relay/
//! ├── domain/               # packets, OBI codec, params, errors
//! ├── ports/                # PacketHandler, PacketTransport, AccountKeys
//! ├── adapters/             # LoopbackTransport, InMemoryAccountKeys
//! ├── service.rs            # OracleRelay
//! ├── chain_link_handler.rs # ChainLinkPacketHandler
//! └── dispatcher.rs         # PacketDispatcher
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod chain_link_handler;
pub mod dispatcher;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{InMemoryAccountKeys, LoopbackTransport};
pub use chain_link_handler::ChainLinkPacketHandler;
pub use dispatcher::PacketDispatcher;
pub use domain::{
    encode_json, try_decode, Acknowledgement, ChannelEndpoint, Coin, LinkChainAccountPacketAck,
    LinkChainAccountPacketData, ObiError, OracleParams, OracleRequestPacketAcknowledgement, OracleRequestPacketData,
    OracleResponsePacketData, OracleScriptCallData, OracleScriptResult, Packet, PacketTimeout,
    RelayError, ResolveStatus, TransportError,
};
pub use ports::{AccountKeys, HandleOutcome, PacketHandler, PacketTransport, RelayEnv};
pub use service::{
    OracleRelay, VerificationRequest, REASON_INVALID_RESULT, REASON_INVALID_SIGNATURE,
    REASON_INVALID_USERNAME, REASON_UNKNOWN_ACCOUNT_KEY,
};
