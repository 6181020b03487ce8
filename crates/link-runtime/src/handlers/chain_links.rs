//! Chain link messages.

use crate::container::LinksModule;
use crate::errors::RuntimeError;
use crate::msgs::{MsgLinkChainAccount, MsgUnlinkChainAccount};
use pl_01_proof_verification::ProofVerificationApi;
use pl_02_link_storage::{ChainLink, KeyValueStore};
use pl_04_oracle_relay::PacketTransport;
use shared_types::{EventManager, LinkEvent};
use tracing::info;

impl<S: KeyValueStore, T: PacketTransport> LinksModule<S, T> {
    /// Verify the proof and store the chain link for the signer.
    pub fn link_chain_account(
        &mut self,
        msg: &MsgLinkChainAccount,
    ) -> Result<ChainLink, RuntimeError> {
        msg.validate_basic()?;
        self.verifier
            .verify(&msg.proof, &msg.chain_address, &msg.signer)?;

        let chain = msg.chain_config.name.as_str();
        let address = msg.chain_address.value();
        if self.store.has_chain_link(&msg.signer, chain, address)? {
            return Err(RuntimeError::Validation(format!(
                "chain link {}/{chain}/{address} already exists",
                msg.signer
            )));
        }

        let link = ChainLink::new(
            msg.signer.clone(),
            msg.chain_address.clone(),
            msg.proof.clone(),
            msg.chain_config.clone(),
            self.block.time,
        );
        let mut events = EventManager::new();
        let result = self.store.put_chain_link(&link).map_err(RuntimeError::from);
        if result.is_ok() {
            events.emit(LinkEvent::ChainLinkSaved {
                user: link.user.clone(),
                chain: chain.to_string(),
                address: address.to_string(),
                creation_time: link.creation_time,
            });
            info!(user = %link.user, chain, address, "[runtime] chain link saved");
        }
        self.commit(events, result.map(|_| link))
    }

    /// Remove one of the owner's chain links.
    pub fn unlink_chain_account(
        &mut self,
        msg: &MsgUnlinkChainAccount,
    ) -> Result<ChainLink, RuntimeError> {
        msg.validate_basic()?;
        let mut events = EventManager::new();
        let result = self
            .store
            .delete_chain_link(&msg.owner, &msg.chain_name, &msg.target)
            .map_err(RuntimeError::from);
        if let Ok(link) = &result {
            events.emit(LinkEvent::ChainLinkDeleted {
                user: link.user.clone(),
                chain: link.chain_config.name.clone(),
                address: link.address.value().to_string(),
            });
            info!(user = %link.user, chain = %msg.chain_name, address = %msg.target, "[runtime] chain link deleted");
        }
        self.commit(events, result)
    }
}
