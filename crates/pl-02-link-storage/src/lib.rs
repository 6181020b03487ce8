//! # PL-02 Link Storage
//!
//! Persistence and indexing for chain links and application links.
//!
//! **Subsystem ID:** 2  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Indexes
//!
//! | Index | Purpose |
//! |-------|---------|
//! | `chainlink/{user}/{chain}/{address}` | Primary chain link record |
//! | `defaultaddr/{user}/{chain}` | Oldest link's address for the chain |
//! | `applink/{user}/{application}/{username}` | Primary application link record |
//! | `applink-by-client/{client_id}` | Resolve asynchronous oracle callbacks |
//! | `applink-expiry/{time}/{client_id}` | Ordered expiry sweep |
//!
//! Owner indexes serve queries by external identity. See [`domain::keys`]
//! for the full layout.
//!
//! ## Module Structure
//!
//! ```text
//! pl-02-link-storage/
//! ├── domain/          # ChainLink, ApplicationLink, LinkState, key layout
//! ├── ports/           # LinkQueryApi, KeyValueStore, LinkCodec
//! ├── adapters/        # InMemoryKVStore, JSON/bincode codecs
//! └── service.rs       # LinkStore
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{codec_by_name, BincodeLinkCodec, InMemoryKVStore, JsonLinkCodec};
pub use domain::{
    ApplicationLink, ApplicationLinkData, ChainLink, KVStoreError, LinkResult, LinkState,
    OracleRequest, StoreError,
};
pub use ports::{BatchOperation, KeyValueStore, LinkCodec, LinkQueryApi};
pub use service::LinkStore;
