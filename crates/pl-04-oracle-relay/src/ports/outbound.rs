//! # Outbound Ports
//!
//! Dependencies the relay needs from the host chain.

use crate::domain::{ChannelEndpoint, PacketTimeout, TransportError};
use pl_01_proof_verification::PublicKey;

/// Packet transport (the cross-chain messaging layer).
pub trait PacketTransport: Send + Sync {
    /// Hand `data` to the channel at `source`. Returns the packet's send
    /// sequence; nothing is sent on error.
    fn send_packet(
        &mut self,
        source: &ChannelEndpoint,
        timeout: PacketTimeout,
        data: Vec<u8>,
    ) -> Result<u64, TransportError>;
}

/// Account public keys known to the host chain.
pub trait AccountKeys: Send + Sync {
    /// Public key of `owner`, if the account has one.
    fn public_key(&self, owner: &str) -> Option<PublicKey>;
}
