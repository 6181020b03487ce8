//! # Expiry Sweeper
//!
//! Removes application links whose expiration time has been reached. Run
//! once per block with the block time.

use crate::state_machine::deleted_event;
use pl_02_link_storage::{KeyValueStore, LinkStore, StoreError};
use shared_types::{EventManager, Timestamp};
use tracing::{debug, info};

/// Per-block removal of expired application links.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExpirySweeper;

impl ExpirySweeper {
    /// Create a sweeper.
    pub fn new() -> Self {
        Self
    }

    /// Delete every link with `expiration_time <= now`, in any state, and
    /// emit one deletion event per link. Returns the number removed.
    pub fn run_once_per_block<S: KeyValueStore>(
        &self,
        store: &mut LinkStore<S>,
        events: &mut EventManager,
        now: Timestamp,
    ) -> Result<usize, StoreError> {
        let removed = store.iterate_expiring(now, |store, link| {
            store.delete_application_link(&link)?;
            debug!(
                user = %link.user,
                client_id = link.client_id(),
                state = %link.state,
                "[pl-03] expired application link removed"
            );
            events.emit(deleted_event(&link));
            Ok::<_, StoreError>(true)
        })?;

        if removed > 0 {
            info!(removed, now, "[pl-03] expiry sweep complete");
        }
        Ok(removed)
    }
}
