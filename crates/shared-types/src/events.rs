//! # Link Events
//!
//! Every event the link subsystems emit while processing a block.
//!
//! Handlers never publish directly; they push onto the [`EventManager`] of
//! the transaction (or block hook) they run in. A failed transaction drops
//! its manager, so events only survive when the state change they describe
//! was committed.

use crate::entities::{OwnerId, Timestamp};
use serde::{Deserialize, Serialize};

/// Events emitted by the link subsystems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkEvent {
    // =========================================================================
    // CHAIN LINKS
    // =========================================================================
    /// A chain link passed proof verification and was stored.
    ChainLinkSaved {
        /// Profile owner.
        user: OwnerId,
        /// External chain name.
        chain: String,
        /// External address.
        address: String,
        /// Creation time of the link.
        creation_time: Timestamp,
    },

    /// A chain link was removed by its owner.
    ChainLinkDeleted {
        /// Profile owner.
        user: OwnerId,
        /// External chain name.
        chain: String,
        /// External address.
        address: String,
    },

    // =========================================================================
    // APPLICATION LINKS
    // =========================================================================
    /// An application link request was stored in its initial state and the
    /// oracle request packet was handed to the transport.
    ApplicationLinkCreated {
        /// Profile owner.
        user: OwnerId,
        /// Application name.
        application: String,
        /// Username on the application.
        username: String,
        /// Correlation token embedded in the oracle call data.
        client_id: String,
        /// Transport sequence of the outbound packet.
        packet_sequence: u64,
        /// Time after which the link is swept.
        expiration_time: Timestamp,
    },

    /// An application link moved between verification states.
    ApplicationLinkStateChanged {
        /// Profile owner.
        user: OwnerId,
        /// Application name.
        application: String,
        /// Username on the application.
        username: String,
        /// Correlation token.
        client_id: String,
        /// Previous state.
        from: String,
        /// New state.
        to: String,
    },

    /// An application link was removed, by expiry or by its owner.
    ApplicationLinkDeleted {
        /// Profile owner.
        user: OwnerId,
        /// Application name.
        application: String,
        /// Username on the application.
        username: String,
        /// Expiration time the link carried.
        expiration_time: Timestamp,
    },

    // =========================================================================
    // PACKETS
    // =========================================================================
    /// An oracle response packet was processed.
    OraclePacketReceived {
        /// Correlation token echoed by the oracle chain.
        client_id: String,
        /// Oracle request id.
        request_id: u64,
        /// Resolve status reported by the oracle chain.
        resolve_status: String,
    },

    /// A chain link arrived over a packet and was stored.
    ChainLinkPacketReceived {
        /// Address on the counterparty chain that signed the link.
        source_address: String,
        /// Counterparty chain name.
        source_chain: String,
        /// Host-chain profile receiving the link.
        destination_address: OwnerId,
    },
}

impl LinkEvent {
    /// Short event type name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            LinkEvent::ChainLinkSaved { .. } => "chain_link_saved",
            LinkEvent::ChainLinkDeleted { .. } => "chain_link_deleted",
            LinkEvent::ApplicationLinkCreated { .. } => "application_link_created",
            LinkEvent::ApplicationLinkStateChanged { .. } => "application_link_state_changed",
            LinkEvent::ApplicationLinkDeleted { .. } => "application_link_deleted",
            LinkEvent::OraclePacketReceived { .. } => "oracle_packet_received",
            LinkEvent::ChainLinkPacketReceived { .. } => "chain_link_packet_received",
        }
    }
}

/// Ordered collector of events for one transaction or block hook.
#[derive(Debug, Default, Clone)]
pub struct EventManager {
    events: Vec<LinkEvent>,
}

impl EventManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event.
    pub fn emit(&mut self, event: LinkEvent) {
        tracing::debug!(kind = event.kind(), "[events] emitted");
        self.events.push(event);
    }

    /// Append all events of a committed child scope.
    pub fn absorb(&mut self, child: EventManager) {
        self.events.extend(child.events);
    }

    /// Events recorded so far, in emission order.
    pub fn events(&self) -> &[LinkEvent] {
        &self.events
    }

    /// Take all recorded events, leaving the manager empty.
    pub fn drain(&mut self) -> Vec<LinkEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no event was recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
