//! # Inbound Ports (Driving Ports / API)
//!
//! Read-only query surface consumed by CLI and gateway glue.

use crate::domain::entities::{ApplicationLink, ChainLink};
use crate::domain::errors::StoreError;
use shared_types::OwnerId;

/// Link queries.
pub trait LinkQueryApi {
    /// All chain links of `user`, ordered by chain then address.
    fn chain_links_by_user(&self, user: &str) -> Result<Vec<ChainLink>, StoreError>;

    /// Owners that linked `address` on `chain`.
    fn chain_link_owners(&self, chain: &str, address: &str) -> Result<Vec<OwnerId>, StoreError>;

    /// Default external address of `user` on `chain`.
    fn default_external_address(
        &self,
        user: &str,
        chain: &str,
    ) -> Result<Option<String>, StoreError>;

    /// All application links of `user`, ordered by application then username.
    fn application_links_by_user(&self, user: &str) -> Result<Vec<ApplicationLink>, StoreError>;

    /// Owners that linked `username` on `application`.
    fn application_link_owners(
        &self,
        application: &str,
        username: &str,
    ) -> Result<Vec<OwnerId>, StoreError>;

    /// Application link tracked by `client_id`.
    fn application_link_by_client_id(&self, client_id: &str)
        -> Result<ApplicationLink, StoreError>;
}
