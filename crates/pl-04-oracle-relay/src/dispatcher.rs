//! # Packet Dispatcher
//!
//! Offers each packet callback to the registered handlers in order. The
//! first handler that recognises the packet decides the outcome.

use crate::domain::{Acknowledgement, Packet, RelayError};
use crate::ports::{HandleOutcome, PacketHandler, RelayEnv};
use pl_02_link_storage::KeyValueStore;
use tracing::{debug, warn};

/// Ordered list of packet handlers sharing one transport port.
pub struct PacketDispatcher<S: KeyValueStore> {
    handlers: Vec<Box<dyn PacketHandler<S>>>,
}

impl<S: KeyValueStore> Default for PacketDispatcher<S> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }
}

impl<S: KeyValueStore> PacketDispatcher<S> {
    /// Create a dispatcher with no handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler; earlier handlers are tried first.
    pub fn with_handler(mut self, handler: impl PacketHandler<S> + 'static) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    /// Number of handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Inbound packet. Fails only when no handler recognises it.
    pub fn recv(
        &self,
        env: &mut RelayEnv<'_, S>,
        packet: &Packet,
    ) -> Result<Acknowledgement, RelayError> {
        for handler in &self.handlers {
            if let HandleOutcome::Handled(ack) = handler.on_recv(env, packet) {
                debug!(handler = handler.name(), sequence = packet.sequence, "[pl-04] packet received");
                return Ok(ack);
            }
        }
        Err(unrecognized(packet))
    }

    /// Acknowledgement of a sent packet.
    pub fn acknowledge(
        &self,
        env: &mut RelayEnv<'_, S>,
        packet: &Packet,
        acknowledgement: &[u8],
    ) -> Result<(), RelayError> {
        for handler in &self.handlers {
            if let HandleOutcome::Handled(result) =
                handler.on_acknowledgement(env, packet, acknowledgement)
            {
                return result;
            }
        }
        Err(unrecognized(packet))
    }

    /// Timeout of a sent packet.
    pub fn timeout(&self, env: &mut RelayEnv<'_, S>, packet: &Packet) -> Result<(), RelayError> {
        for handler in &self.handlers {
            if let HandleOutcome::Handled(result) = handler.on_timeout(env, packet) {
                return result;
            }
        }
        Err(unrecognized(packet))
    }
}

fn unrecognized(packet: &Packet) -> RelayError {
    warn!(sequence = packet.sequence, source = %packet.source, "[pl-04] no handler for packet");
    RelayError::UnrecognizedPacket(format!(
        "sequence {} from {}",
        packet.sequence, packet.source
    ))
}
