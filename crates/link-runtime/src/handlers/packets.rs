//! Packet callbacks from the transport.

use crate::container::LinksModule;
use crate::errors::{ErrorKind, RuntimeError};
use pl_02_link_storage::KeyValueStore;
use pl_04_oracle_relay::{Acknowledgement, Packet, PacketTransport};
use tracing::{error, warn};

impl<S: KeyValueStore, T: PacketTransport> LinksModule<S, T> {
    /// Inbound packet. Handler failures become error acknowledgements; only
    /// a packet no handler recognises is an error.
    pub fn recv_packet(&mut self, packet: &Packet) -> Result<Acknowledgement, RuntimeError> {
        self.with_env(|dispatcher, env| Ok(dispatcher.recv(env, packet)?))
            .inspect_err(|e| log_failure("recv", packet, e))
    }

    /// Acknowledgement of a packet this module sent.
    pub fn acknowledge_packet(
        &mut self,
        packet: &Packet,
        acknowledgement: &[u8],
    ) -> Result<(), RuntimeError> {
        self.with_env(|dispatcher, env| Ok(dispatcher.acknowledge(env, packet, acknowledgement)?))
            .inspect_err(|e| log_failure("acknowledgement", packet, e))
    }

    /// Timeout of a packet this module sent.
    pub fn timeout_packet(&mut self, packet: &Packet) -> Result<(), RuntimeError> {
        self.with_env(|dispatcher, env| Ok(dispatcher.timeout(env, packet)?))
            .inspect_err(|e| log_failure("timeout", packet, e))
    }
}

fn log_failure(callback: &str, packet: &Packet, err: &RuntimeError) {
    match err.kind() {
        ErrorKind::NotFound => {
            warn!(callback, sequence = packet.sequence, error = %err, "[runtime] packet for unknown link")
        }
        _ => error!(callback, sequence = packet.sequence, error = %err, "[runtime] packet callback failed"),
    }
}
