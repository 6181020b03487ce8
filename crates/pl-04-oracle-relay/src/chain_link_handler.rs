//! # Chain Link Packet Handler
//!
//! Receives chain links proven on a counterparty chain. The packet carries
//! two proofs: the external address signs the destination profile, and the
//! destination account signs the external address.

use crate::domain::{
    try_decode, Acknowledgement, LinkChainAccountPacketAck, LinkChainAccountPacketData, Packet,
    RelayError,
};
use crate::ports::{HandleOutcome, PacketHandler, RelayEnv};
use pl_01_proof_verification::{ProofError, ProofVerificationApi, ProofVerifier};
use pl_02_link_storage::{ChainLink, KeyValueStore};
use shared_types::{validate_key_segment, LinkEvent};
use tracing::{error, info};

/// Handler for [`LinkChainAccountPacketData`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ChainLinkPacketHandler {
    verifier: ProofVerifier,
}

impl ChainLinkPacketHandler {
    /// Create a handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Verify both proofs and store the chain link for the destination
    /// profile.
    pub fn link_chain_account<S: KeyValueStore>(
        &self,
        env: &mut RelayEnv<'_, S>,
        data: &LinkChainAccountPacketData,
    ) -> Result<ChainLink, RelayError> {
        let destination = data.destination_address.as_str();
        validate_key_segment("destination address", destination)
            .map_err(|e| RelayError::Validation(e.to_string()))?;
        data.source_chain_config.validate()?;

        self.verifier
            .verify(&data.source_proof, &data.source_address, destination)?;

        let account_key = env.accounts.public_key(destination).ok_or_else(|| {
            RelayError::NotFound(format!("account public key for {destination}"))
        })?;
        let destination_proof = &data.destination_proof;
        if destination_proof.public_key != account_key {
            return Err(ProofError::InvalidSignature(
                "destination proof key does not belong to the destination account".to_string(),
            )
            .into());
        }
        let plain_text = destination_proof.decoded_plain_text()?;
        destination_proof.signature.verify(&account_key, &plain_text)?;
        destination_proof
            .signature
            .check_plain_text(&plain_text, data.source_address.value())?;

        let link = ChainLink::new(
            destination,
            data.source_address.clone(),
            data.source_proof.clone(),
            data.source_chain_config.clone(),
            env.block.time,
        );
        let chain = link.chain_config.name.as_str();
        let address = link.address.value();
        if env.store.has_chain_link(destination, chain, address)? {
            return Err(RelayError::Validation(format!(
                "chain link {destination}/{chain}/{address} already exists"
            )));
        }
        env.store.put_chain_link(&link)?;
        env.events.emit(LinkEvent::ChainLinkSaved {
            user: link.user.clone(),
            chain: chain.to_string(),
            address: address.to_string(),
            creation_time: link.creation_time,
        });
        info!(user = destination, chain, address, "[pl-04] chain link received over packet");
        Ok(link)
    }
}

impl<S: KeyValueStore> PacketHandler<S> for ChainLinkPacketHandler {
    fn name(&self) -> &'static str {
        "chain_link"
    }

    fn on_recv(&self, env: &mut RelayEnv<'_, S>, packet: &Packet) -> HandleOutcome<Acknowledgement> {
        let Some(data) = try_decode::<LinkChainAccountPacketData>(&packet.data) else {
            return HandleOutcome::NotMine;
        };

        let ack = match self.link_chain_account(env, &data) {
            Ok(link) => {
                env.events.emit(LinkEvent::ChainLinkPacketReceived {
                    source_address: link.address.value().to_string(),
                    source_chain: link.chain_config.name.clone(),
                    destination_address: link.user.clone(),
                });
                Acknowledgement::json(&LinkChainAccountPacketAck {
                    source_address: link.address.value().to_string(),
                })
                .unwrap_or_else(|e| Acknowledgement::error(e.to_string()))
            }
            Err(e) => {
                error!(
                    destination = %data.destination_address,
                    error = %e,
                    "[pl-04] chain link packet rejected"
                );
                Acknowledgement::error(e.to_string())
            }
        };
        HandleOutcome::Handled(ack)
    }
}
