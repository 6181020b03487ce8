//! # In-Memory Account Keys

use crate::ports::AccountKeys;
use pl_01_proof_verification::PublicKey;
use std::collections::HashMap;

/// [`AccountKeys`] backed by a map.
#[derive(Debug, Default, Clone)]
pub struct InMemoryAccountKeys {
    keys: HashMap<String, PublicKey>,
}

impl InMemoryAccountKeys {
    /// Create an empty key set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the public key of `owner`.
    pub fn insert(&mut self, owner: impl Into<String>, key: PublicKey) {
        self.keys.insert(owner.into(), key);
    }
}

impl AccountKeys for InMemoryAccountKeys {
    fn public_key(&self, owner: &str) -> Option<PublicKey> {
        self.keys.get(owner).cloned()
    }
}
