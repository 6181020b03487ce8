//! Adapters for the Oracle Relay.

pub mod accounts;
pub mod loopback;

pub use accounts::InMemoryAccountKeys;
pub use loopback::LoopbackTransport;
