//! # Queries
//!
//! Read-only views over the link store.

use crate::container::LinksModule;
use crate::errors::RuntimeError;
use pl_02_link_storage::{ApplicationLink, ChainLink, KeyValueStore, LinkQueryApi};
use pl_04_oracle_relay::PacketTransport;
use shared_types::OwnerId;

impl<S: KeyValueStore, T: PacketTransport> LinksModule<S, T> {
    /// Chain links of `user`, ordered by chain then address.
    pub fn chain_links(&self, user: &str) -> Result<Vec<ChainLink>, RuntimeError> {
        Ok(self.store.chain_links_by_user(user)?)
    }

    /// One chain link.
    pub fn chain_link(
        &self,
        user: &str,
        chain: &str,
        address: &str,
    ) -> Result<ChainLink, RuntimeError> {
        Ok(self.store.get_chain_link(user, chain, address)?)
    }

    /// Profiles that linked `address` on `chain`.
    pub fn chain_link_owners(
        &self,
        chain: &str,
        address: &str,
    ) -> Result<Vec<OwnerId>, RuntimeError> {
        Ok(self.store.chain_link_owners(chain, address)?)
    }

    /// Default external address of `user` on `chain`.
    pub fn default_external_address(
        &self,
        user: &str,
        chain: &str,
    ) -> Result<Option<String>, RuntimeError> {
        Ok(self.store.default_external_address(user, chain)?)
    }

    /// Application links of `user`, ordered by application then username.
    pub fn application_links(&self, user: &str) -> Result<Vec<ApplicationLink>, RuntimeError> {
        Ok(self.store.application_links_by_user(user)?)
    }

    /// One application link. The application name is matched
    /// case-insensitively.
    pub fn application_link(
        &self,
        user: &str,
        application: &str,
        username: &str,
    ) -> Result<ApplicationLink, RuntimeError> {
        Ok(self
            .store
            .get_application_link(user, &application.to_lowercase(), username)?)
    }

    /// Profiles that linked `username` on `application`.
    pub fn application_link_owners(
        &self,
        application: &str,
        username: &str,
    ) -> Result<Vec<OwnerId>, RuntimeError> {
        Ok(self
            .store
            .application_link_owners(&application.to_lowercase(), username)?)
    }

    /// Application link tracked by an oracle client id.
    pub fn application_link_by_client_id(
        &self,
        client_id: &str,
    ) -> Result<ApplicationLink, RuntimeError> {
        Ok(self.store.application_link_by_client_id(client_id)?)
    }
}
