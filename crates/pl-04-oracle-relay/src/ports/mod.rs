//! Ports for the Oracle Relay.

pub mod inbound;
pub mod outbound;

pub use inbound::{HandleOutcome, PacketHandler, RelayEnv};
pub use outbound::{AccountKeys, PacketTransport};
