//! # Outbound Ports (Driven Ports)
//!
//! Dependencies required by the link store.

use crate::domain::entities::{ApplicationLink, ChainLink};
use crate::domain::errors::{KVStoreError, StoreError};

/// Result of a prefix scan.
pub type ScanResult = Vec<(Vec<u8>, Vec<u8>)>;

/// Lazy, forward-only scan. Dropping it releases the scan.
pub type ScanIter<'a> = Box<dyn Iterator<Item = (Vec<u8>, Vec<u8>)> + 'a>;

/// Ordered byte-key store.
///
/// Implementations must return scan results in ascending key order.
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Put a single key-value pair.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError>;

    /// Delete a key.
    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError>;

    /// Apply all operations, or none of them.
    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError>;

    /// All pairs under `prefix`, ascending.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError> {
        Ok(self.prefix_iter(prefix)?.collect())
    }

    /// Pairs under `prefix`, ascending, produced on demand.
    fn prefix_iter<'a>(&'a self, prefix: &[u8]) -> Result<ScanIter<'a>, KVStoreError>;
}

/// Batch operation for atomic writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOperation {
    /// Put a key-value pair.
    Put {
        /// Key.
        key: Vec<u8>,
        /// Value.
        value: Vec<u8>,
    },
    /// Delete a key.
    Delete {
        /// Key.
        key: Vec<u8>,
    },
}

impl BatchOperation {
    /// Create a Put operation.
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a Delete operation.
    pub fn delete(key: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Delete { key: key.into() }
    }
}

/// Encoding of persisted link records.
///
/// Chosen once at startup and handed to the store; there is no global codec.
pub trait LinkCodec: Send + Sync {
    /// Codec name, for logs and configuration.
    fn name(&self) -> &'static str;

    /// Encode a chain link.
    fn encode_chain_link(&self, link: &ChainLink) -> Result<Vec<u8>, StoreError>;

    /// Decode a chain link.
    fn decode_chain_link(&self, bytes: &[u8]) -> Result<ChainLink, StoreError>;

    /// Encode an application link.
    fn encode_application_link(&self, link: &ApplicationLink) -> Result<Vec<u8>, StoreError>;

    /// Decode an application link.
    fn decode_application_link(&self, bytes: &[u8]) -> Result<ApplicationLink, StoreError>;
}
