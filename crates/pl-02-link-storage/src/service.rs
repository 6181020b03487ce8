//! # Link Store Service
//!
//! Sole owner of persisted chain and application links and their indexes.
//! Every multi-key change is a single atomic batch, so a failure leaves the
//! previous records and indexes untouched.

use crate::domain::entities::{ApplicationLink, ChainLink};
use crate::domain::errors::StoreError;
use crate::domain::keys;
use crate::ports::inbound::LinkQueryApi;
use crate::ports::outbound::{BatchOperation, KeyValueStore, LinkCodec};
use shared_types::{OwnerId, Timestamp};
use std::sync::Arc;
use tracing::{debug, warn};

/// Persistence and indexing for links.
pub struct LinkStore<S: KeyValueStore> {
    kv: S,
    codec: Arc<dyn LinkCodec>,
}

impl<S: KeyValueStore> LinkStore<S> {
    /// Create a store over `kv` using `codec` for records.
    pub fn new(kv: S, codec: Arc<dyn LinkCodec>) -> Self {
        Self { kv, codec }
    }

    /// Underlying key-value store.
    pub fn kv(&self) -> &S {
        &self.kv
    }

    /// Codec in use.
    pub fn codec(&self) -> &dyn LinkCodec {
        self.codec.as_ref()
    }

    // =========================================================================
    // CHAIN LINKS
    // =========================================================================

    /// Insert or replace the chain link keyed by `(user, chain, address)`.
    ///
    /// The default address moves to this link only when there is no default
    /// yet or this link is older than the current default.
    pub fn put_chain_link(&mut self, link: &ChainLink) -> Result<(), StoreError> {
        link.validate()?;
        let user = link.user.as_str();
        let chain = link.chain_config.name.as_str();
        let address = link.address.value();

        let mut batch = vec![
            BatchOperation::put(
                keys::chain_link_key(user, chain, address),
                self.codec.encode_chain_link(link)?,
            ),
            BatchOperation::put(keys::chain_link_owner_key(chain, address, user), Vec::new()),
        ];

        let new_default = match self.default_address(user, chain)? {
            None => Some(address.to_string()),
            Some(current) if current == address => {
                // Re-stored default with a possibly different time: recompute.
                let mut links = self.chain_links_for_chain(user, chain)?;
                links.retain(|l| l.address.value() != address);
                links.push(link.clone());
                oldest_address(&links)
            }
            Some(current) => {
                let current_link = self.get_chain_link(user, chain, &current)?;
                if link.creation_time < current_link.creation_time {
                    Some(address.to_string())
                } else {
                    None
                }
            }
        };
        if let Some(default) = new_default {
            batch.push(BatchOperation::put(
                keys::default_address_key(user, chain),
                default.into_bytes(),
            ));
        }

        self.kv.atomic_batch_write(batch)?;
        debug!(user, chain, address, "[pl-02] chain link stored");
        Ok(())
    }

    /// Chain link keyed by `(user, chain, address)`.
    pub fn get_chain_link(
        &self,
        user: &str,
        chain: &str,
        address: &str,
    ) -> Result<ChainLink, StoreError> {
        match self.kv.get(&keys::chain_link_key(user, chain, address))? {
            Some(bytes) => self.codec.decode_chain_link(&bytes),
            None => Err(StoreError::NotFound(format!(
                "chain link {user}/{chain}/{address}"
            ))),
        }
    }

    /// Whether a chain link exists for `(user, chain, address)`.
    pub fn has_chain_link(&self, user: &str, chain: &str, address: &str) -> Result<bool, StoreError> {
        Ok(self.kv.exists(&keys::chain_link_key(user, chain, address))?)
    }

    /// Remove a chain link, recomputing the default address if it pointed at
    /// the removed link. Returns the removed link.
    pub fn delete_chain_link(
        &mut self,
        user: &str,
        chain: &str,
        address: &str,
    ) -> Result<ChainLink, StoreError> {
        let removed = self.get_chain_link(user, chain, address)?;
        let mut batch = vec![
            BatchOperation::delete(keys::chain_link_key(user, chain, address)),
            BatchOperation::delete(keys::chain_link_owner_key(chain, address, user)),
        ];

        if self.default_address(user, chain)?.as_deref() == Some(address) {
            let mut remaining = self.chain_links_for_chain(user, chain)?;
            remaining.retain(|l| l.address.value() != address);
            let default_key = keys::default_address_key(user, chain);
            batch.push(match oldest_address(&remaining) {
                Some(next) => BatchOperation::put(default_key, next.into_bytes()),
                None => BatchOperation::delete(default_key),
            });
        }

        self.kv.atomic_batch_write(batch)?;
        debug!(user, chain, address, "[pl-02] chain link deleted");
        Ok(removed)
    }

    /// Default external address of `user` on `chain`.
    pub fn default_address(&self, user: &str, chain: &str) -> Result<Option<String>, StoreError> {
        self.kv
            .get(&keys::default_address_key(user, chain))?
            .map(|bytes| String::from_utf8(bytes).map_err(|e| StoreError::Codec(e.to_string())))
            .transpose()
    }

    /// Chain links of `user` on `chain`, ordered by address.
    pub fn chain_links_for_chain(&self, user: &str, chain: &str) -> Result<Vec<ChainLink>, StoreError> {
        self.kv
            .prefix_iter(&keys::user_chain_links_by_chain_prefix(user, chain))?
            .map(|(_, bytes)| self.codec.decode_chain_link(&bytes))
            .collect()
    }

    // =========================================================================
    // APPLICATION LINKS
    // =========================================================================

    /// Insert or replace the application link keyed by
    /// `(user, application, username)`, keeping the client id, owner and
    /// expiry indexes in step.
    ///
    /// Fails when the client id already tracks a different link.
    pub fn put_application_link(&mut self, link: &ApplicationLink) -> Result<(), StoreError> {
        self.replace_application_link(link).map(|_| ())
    }

    /// Store `link` in place of whatever link holds its primary key, in one
    /// batch, and return the replaced link. On error the store is unchanged.
    pub fn replace_application_link(
        &mut self,
        link: &ApplicationLink,
    ) -> Result<Option<ApplicationLink>, StoreError> {
        link.validate()?;
        let user = link.user.as_str();
        let application = link.data.application.as_str();
        let username = link.data.username.as_str();
        let client_id = link.client_id();
        let primary = keys::app_link_key(user, application, username);

        if let Some(owner_key) = self.kv.get(&keys::app_link_client_key(client_id))? {
            if owner_key != primary {
                return Err(StoreError::Validation(format!(
                    "client id {client_id} already tracks another link"
                )));
            }
        }

        let mut batch = Vec::with_capacity(6);
        let existing = match self.kv.get(&primary)? {
            Some(bytes) => Some(self.codec.decode_application_link(&bytes)?),
            None => None,
        };
        if let Some(existing) = &existing {
            if existing.client_id() != client_id {
                batch.push(BatchOperation::delete(keys::app_link_client_key(
                    existing.client_id(),
                )));
            }
            if existing.expiration_time != link.expiration_time || existing.client_id() != client_id
            {
                batch.push(BatchOperation::delete(keys::app_link_expiry_key(
                    existing.expiration_time,
                    existing.client_id(),
                )));
            }
        }

        batch.push(BatchOperation::put(
            primary.clone(),
            self.codec.encode_application_link(link)?,
        ));
        batch.push(BatchOperation::put(keys::app_link_client_key(client_id), primary));
        batch.push(BatchOperation::put(
            keys::app_link_owner_key(application, username, user),
            Vec::new(),
        ));
        batch.push(BatchOperation::put(
            keys::app_link_expiry_key(link.expiration_time, client_id),
            client_id.as_bytes().to_vec(),
        ));

        self.kv.atomic_batch_write(batch)?;
        debug!(user, application, username, client_id, state = %link.state, "[pl-02] application link stored");
        Ok(existing)
    }

    /// Application link keyed by `(user, application, username)`.
    pub fn get_application_link(
        &self,
        user: &str,
        application: &str,
        username: &str,
    ) -> Result<ApplicationLink, StoreError> {
        match self.kv.get(&keys::app_link_key(user, application, username))? {
            Some(bytes) => self.codec.decode_application_link(&bytes),
            None => Err(StoreError::NotFound(format!(
                "application link {user}/{application}/{username}"
            ))),
        }
    }

    /// Application link tracked by `client_id`.
    pub fn get_application_link_by_client_id(
        &self,
        client_id: &str,
    ) -> Result<ApplicationLink, StoreError> {
        let primary = self
            .kv
            .get(&keys::app_link_client_key(client_id))?
            .ok_or_else(|| StoreError::NotFound(format!("client id {client_id}")))?;
        match self.kv.get(&primary)? {
            Some(bytes) => self.codec.decode_application_link(&bytes),
            None => Err(StoreError::NotFound(format!(
                "application link for client id {client_id}"
            ))),
        }
    }

    /// Whether `client_id` currently tracks a link.
    pub fn has_client_id(&self, client_id: &str) -> Result<bool, StoreError> {
        Ok(self.kv.exists(&keys::app_link_client_key(client_id))?)
    }

    /// Remove an application link and all of its index entries.
    ///
    /// Index entries are taken from the stored record, so a stale `link`
    /// value cannot leave entries behind.
    pub fn delete_application_link(&mut self, link: &ApplicationLink) -> Result<(), StoreError> {
        let stored = self.get_application_link(
            &link.user,
            &link.data.application,
            &link.data.username,
        )?;
        let batch = vec![
            BatchOperation::delete(keys::app_link_key(
                &stored.user,
                &stored.data.application,
                &stored.data.username,
            )),
            BatchOperation::delete(keys::app_link_client_key(stored.client_id())),
            BatchOperation::delete(keys::app_link_owner_key(
                &stored.data.application,
                &stored.data.username,
                &stored.user,
            )),
            BatchOperation::delete(keys::app_link_expiry_key(
                stored.expiration_time,
                stored.client_id(),
            )),
        ];
        self.kv.atomic_batch_write(batch)?;
        debug!(user = %stored.user, client_id = stored.client_id(), "[pl-02] application link deleted");
        Ok(())
    }

    /// Visit links with `expiration_time <= before_or_at`, earliest first.
    ///
    /// Due expiry index entries are collected up to the bound, then visited;
    /// the scan stops at the first entry past the bound and is released
    /// before any visit so `visit` may mutate the store. Stale index entries whose link is gone are
    /// removed and skipped. Iteration ends early when `visit` returns
    /// `Ok(false)`; an error from `visit` aborts it and is returned. Returns
    /// the number of links visited.
    pub fn iterate_expiring<F, E>(&mut self, before_or_at: Timestamp, mut visit: F) -> Result<usize, E>
    where
        F: FnMut(&mut Self, ApplicationLink) -> Result<bool, E>,
        E: From<StoreError>,
    {
        let due: Vec<(Vec<u8>, String)> = {
            let scan = self
                .kv
                .prefix_iter(keys::APP_LINK_EXPIRY_PREFIX.as_bytes())
                .map_err(StoreError::from)?;
            scan.map_while(|(key, value)| {
                let expiration = keys::parse_expiry_key(&key)?;
                (expiration <= before_or_at)
                    .then(|| (key, String::from_utf8_lossy(&value).into_owned()))
            })
            .collect()
        };

        let mut visited = 0;
        for (index_key, client_id) in due {
            let link = match self.get_application_link_by_client_id(&client_id) {
                Ok(link) => link,
                Err(StoreError::NotFound(_)) => {
                    warn!(client_id, "[pl-02] dropping stale expiry index entry");
                    self.kv.delete(&index_key).map_err(StoreError::from)?;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            visited += 1;
            if !visit(self, link)? {
                break;
            }
        }
        Ok(visited)
    }

    fn owners_under(&self, prefix: &[u8]) -> Result<Vec<OwnerId>, StoreError> {
        Ok(self
            .kv
            .prefix_iter(prefix)?
            .filter_map(|(key, _)| keys::last_segment(&key))
            .collect())
    }
}

impl<S: KeyValueStore> LinkQueryApi for LinkStore<S> {
    fn chain_links_by_user(&self, user: &str) -> Result<Vec<ChainLink>, StoreError> {
        self.kv
            .prefix_iter(&keys::user_chain_links_prefix(user))?
            .map(|(_, bytes)| self.codec.decode_chain_link(&bytes))
            .collect()
    }

    fn chain_link_owners(&self, chain: &str, address: &str) -> Result<Vec<OwnerId>, StoreError> {
        self.owners_under(&keys::chain_link_owners_prefix(chain, address))
    }

    fn default_external_address(
        &self,
        user: &str,
        chain: &str,
    ) -> Result<Option<String>, StoreError> {
        self.default_address(user, chain)
    }

    fn application_links_by_user(&self, user: &str) -> Result<Vec<ApplicationLink>, StoreError> {
        self.kv
            .prefix_iter(&keys::user_app_links_prefix(user))?
            .map(|(_, bytes)| self.codec.decode_application_link(&bytes))
            .collect()
    }

    fn application_link_owners(
        &self,
        application: &str,
        username: &str,
    ) -> Result<Vec<OwnerId>, StoreError> {
        self.owners_under(&keys::app_link_owners_prefix(
            &application.to_lowercase(),
            username,
        ))
    }

    fn application_link_by_client_id(
        &self,
        client_id: &str,
    ) -> Result<ApplicationLink, StoreError> {
        self.get_application_link_by_client_id(client_id)
    }
}

/// Address of the oldest link; ties go to the smallest address.
fn oldest_address(links: &[ChainLink]) -> Option<String> {
    links
        .iter()
        .min_by(|a, b| {
            a.creation_time
                .cmp(&b.creation_time)
                .then_with(|| a.address.value().cmp(b.address.value()))
        })
        .map(|l| l.address.value().to_string())
}
