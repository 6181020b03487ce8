//! Application link messages.

use crate::container::LinksModule;
use crate::errors::RuntimeError;
use crate::msgs::{MsgLinkApplication, MsgUnlinkApplication};
use pl_02_link_storage::{ApplicationLink, KeyValueStore, OracleRequest};
use pl_03_app_link_verification::deleted_event;
use pl_04_oracle_relay::{
    ChannelEndpoint, PacketTimeout, PacketTransport, RelayEnv, VerificationRequest,
};
use shared_types::EventManager;
use tracing::info;

impl<S: KeyValueStore, T: PacketTransport> LinksModule<S, T> {
    /// Send an oracle verification request for the sender's application
    /// account. The link is stored as `Initialized` once the packet is out.
    pub fn link_application(
        &mut self,
        msg: &MsgLinkApplication,
    ) -> Result<OracleRequest, RuntimeError> {
        msg.validate_basic()?;
        let request = VerificationRequest {
            user: msg.sender.clone(),
            data: msg.link_data.clone(),
            call_data: msg.call_data.clone(),
            source: ChannelEndpoint::new(msg.source_port.clone(), msg.source_channel.clone()),
            timeout: self.packet_timeout(msg.timeout_height, msg.timeout_timestamp),
        };

        let mut events = EventManager::new();
        let result = {
            let mut env = RelayEnv {
                store: &mut self.store,
                events: &mut events,
                block: self.block,
                accounts: &*self.accounts,
            };
            self.relay
                .send_verification_request(&mut env, &mut self.transport, &request)
                .map_err(RuntimeError::from)
        };
        self.commit(events, result)
    }

    /// Remove one of the signer's application links.
    pub fn unlink_application(
        &mut self,
        msg: &MsgUnlinkApplication,
    ) -> Result<ApplicationLink, RuntimeError> {
        msg.validate_basic()?;
        let application = msg.application.to_lowercase();
        let link = self
            .store
            .get_application_link(&msg.signer, &application, &msg.username)?;

        let mut events = EventManager::new();
        let result = self
            .store
            .delete_application_link(&link)
            .map_err(RuntimeError::from);
        if result.is_ok() {
            events.emit(deleted_event(&link));
            info!(
                user = %link.user,
                application,
                username = %link.data.username,
                client_id = link.client_id(),
                "[runtime] application link deleted"
            );
        }
        self.commit(events, result.map(|_| link))
    }

    /// Timeout for a request: the message's bounds, or the configured
    /// defaults relative to the current block when the message sets none.
    fn packet_timeout(&self, height: u64, timestamp: u64) -> PacketTimeout {
        if height != 0 || timestamp != 0 {
            return PacketTimeout::new(height, timestamp);
        }
        let relay = &self.config.relay;
        let height = match relay.default_timeout_height_offset {
            0 => 0,
            offset => self.block.height.saturating_add(offset),
        };
        let timestamp = match relay.default_timeout_secs {
            0 => 0,
            secs => self.block.time.saturating_add(secs),
        };
        PacketTimeout::new(height, timestamp)
    }
}
