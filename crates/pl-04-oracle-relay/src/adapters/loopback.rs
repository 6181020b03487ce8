//! # Loopback Transport
//!
//! In-process [`PacketTransport`] that records sent packets instead of
//! relaying them. Channels must be opened explicitly.

use crate::domain::{ChannelEndpoint, Packet, PacketTimeout, TransportError};
use crate::ports::PacketTransport;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone)]
struct ChannelState {
    counterparty: ChannelEndpoint,
    owns_capability: bool,
    next_sequence: Option<u64>,
}

/// Packet transport that keeps everything in memory.
#[derive(Debug, Default, Clone)]
pub struct LoopbackTransport {
    channels: BTreeMap<ChannelEndpoint, ChannelState>,
    sent: Vec<Packet>,
}

impl LoopbackTransport {
    /// Create a transport with no open channels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a channel from `source` to `counterparty`. Sequences start at 1.
    pub fn open_channel(&mut self, source: ChannelEndpoint, counterparty: ChannelEndpoint) {
        self.channels.insert(
            source,
            ChannelState {
                counterparty,
                owns_capability: true,
                next_sequence: Some(1),
            },
        );
    }

    /// Drop ownership of the channel capability at `source`.
    pub fn release_capability(&mut self, source: &ChannelEndpoint) {
        if let Some(channel) = self.channels.get_mut(source) {
            channel.owns_capability = false;
        }
    }

    /// Forget the next send sequence at `source`.
    pub fn clear_sequence(&mut self, source: &ChannelEndpoint) {
        if let Some(channel) = self.channels.get_mut(source) {
            channel.next_sequence = None;
        }
    }

    /// Packets sent so far, oldest first.
    pub fn sent(&self) -> &[Packet] {
        &self.sent
    }

    /// Most recently sent packet.
    pub fn last_sent(&self) -> Option<&Packet> {
        self.sent.last()
    }

    /// Remove and return every sent packet.
    pub fn take_sent(&mut self) -> Vec<Packet> {
        std::mem::take(&mut self.sent)
    }
}

impl PacketTransport for LoopbackTransport {
    fn send_packet(
        &mut self,
        source: &ChannelEndpoint,
        timeout: PacketTimeout,
        data: Vec<u8>,
    ) -> Result<u64, TransportError> {
        timeout.validate()?;
        let channel = self
            .channels
            .get_mut(source)
            .ok_or_else(|| TransportError::ChannelNotFound {
                port: source.port_id.clone(),
                channel: source.channel_id.clone(),
            })?;
        if !channel.owns_capability {
            return Err(TransportError::CapabilityNotFound {
                port: source.port_id.clone(),
                channel: source.channel_id.clone(),
            });
        }
        let sequence = channel
            .next_sequence
            .ok_or_else(|| TransportError::SequenceUnavailable {
                port: source.port_id.clone(),
                channel: source.channel_id.clone(),
            })?;
        channel.next_sequence = Some(sequence + 1);

        let packet = Packet {
            sequence,
            source: source.clone(),
            destination: channel.counterparty.clone(),
            timeout,
            data,
        };
        debug!(sequence, source = %packet.source, destination = %packet.destination, "[pl-04] packet sent");
        self.sent.push(packet);
        Ok(sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> (ChannelEndpoint, ChannelEndpoint) {
        (
            ChannelEndpoint::new("profiles", "channel-0"),
            ChannelEndpoint::new("oracle", "channel-9"),
        )
    }

    fn timeout() -> PacketTimeout {
        PacketTimeout::new(0, 600)
    }

    #[test]
    fn test_sequences_increase_per_channel() {
        let (source, counterparty) = endpoints();
        let mut transport = LoopbackTransport::new();
        transport.open_channel(source.clone(), counterparty.clone());

        assert_eq!(transport.send_packet(&source, timeout(), vec![1]).unwrap(), 1);
        assert_eq!(transport.send_packet(&source, timeout(), vec![2]).unwrap(), 2);
        let last = transport.last_sent().unwrap();
        assert_eq!(last.destination, counterparty);
        assert_eq!(last.data, vec![2]);
    }

    #[test]
    fn test_missing_channel() {
        let (source, _) = endpoints();
        let err = LoopbackTransport::new()
            .send_packet(&source, timeout(), vec![])
            .unwrap_err();
        assert!(matches!(err, TransportError::ChannelNotFound { .. }));
    }

    #[test]
    fn test_missing_capability_sends_nothing() {
        let (source, counterparty) = endpoints();
        let mut transport = LoopbackTransport::new();
        transport.open_channel(source.clone(), counterparty);
        transport.release_capability(&source);

        let err = transport.send_packet(&source, timeout(), vec![]).unwrap_err();
        assert!(matches!(err, TransportError::CapabilityNotFound { .. }));
        assert!(transport.sent().is_empty());
    }

    #[test]
    fn test_missing_sequence() {
        let (source, counterparty) = endpoints();
        let mut transport = LoopbackTransport::new();
        transport.open_channel(source.clone(), counterparty);
        transport.clear_sequence(&source);

        let err = transport.send_packet(&source, timeout(), vec![]).unwrap_err();
        assert!(matches!(err, TransportError::SequenceUnavailable { .. }));
    }

    #[test]
    fn test_unbounded_timeout_rejected() {
        let (source, counterparty) = endpoints();
        let mut transport = LoopbackTransport::new();
        transport.open_channel(source.clone(), counterparty);
        assert_eq!(
            transport.send_packet(&source, PacketTimeout::default(), vec![]),
            Err(TransportError::InvalidTimeout)
        );
    }
}
