//! # Inbound Ports
//!
//! Packet callbacks the transport drives. Every callback is total: a packet
//! that does not decode as this handler's protocol yields
//! [`HandleOutcome::NotMine`] so the next handler can try it.

use crate::domain::{Acknowledgement, Packet, RelayError};
use pl_02_link_storage::{KeyValueStore, LinkStore};
use shared_types::{BlockContext, EventManager};

use super::outbound::AccountKeys;

/// Result of offering a packet to a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleOutcome<T> {
    /// The packet belongs to this handler's protocol.
    Handled(T),
    /// Not this handler's packet.
    NotMine,
}

impl<T> HandleOutcome<T> {
    /// Whether the packet was recognised.
    pub fn is_handled(&self) -> bool {
        matches!(self, HandleOutcome::Handled(_))
    }
}

/// Everything a handler may touch while processing one packet.
pub struct RelayEnv<'a, S: KeyValueStore> {
    /// Link store.
    pub store: &'a mut LinkStore<S>,
    /// Event collector of the enclosing transaction.
    pub events: &'a mut EventManager,
    /// Current block.
    pub block: BlockContext,
    /// Host-chain account keys.
    pub accounts: &'a dyn AccountKeys,
}

/// Packet protocol handler.
pub trait PacketHandler<S: KeyValueStore>: Send + Sync {
    /// Protocol name, for logs.
    fn name(&self) -> &'static str;

    /// Inbound packet. `Handled` always carries the acknowledgement to write
    /// back; processing failures become error acknowledgements.
    fn on_recv(&self, env: &mut RelayEnv<'_, S>, packet: &Packet) -> HandleOutcome<Acknowledgement> {
        let _ = (env, packet);
        HandleOutcome::NotMine
    }

    /// Acknowledgement of a packet this chain sent.
    fn on_acknowledgement(
        &self,
        env: &mut RelayEnv<'_, S>,
        packet: &Packet,
        acknowledgement: &[u8],
    ) -> HandleOutcome<Result<(), RelayError>> {
        let _ = (env, packet, acknowledgement);
        HandleOutcome::NotMine
    }

    /// Timeout of a packet this chain sent.
    fn on_timeout(
        &self,
        env: &mut RelayEnv<'_, S>,
        packet: &Packet,
    ) -> HandleOutcome<Result<(), RelayError>> {
        let _ = (env, packet);
        HandleOutcome::NotMine
    }
}
