//! # Link Runtime
//!
//! Runs the link subsystems as one chain module.
//!
//! **Architecture:** Module container + transaction handlers
//!
//! ## Block Flow
//!
//! ```text
//! begin_block ──→ ExpirySweeper (pl-03)
//!      │
//!      ├── MsgLinkChainAccount ────→ ProofVerifier (pl-01) ──→ LinkStore (pl-02)
//!      ├── MsgLinkApplication ─────→ OracleRelay (pl-04) ──→ PacketTransport
//!      ├── MsgUnlink* ─────────────→ LinkStore (pl-02)
//!      ├── recv / ack / timeout ───→ PacketDispatcher (pl-04)
//!      │                                 ├── ChainLinkPacketHandler
//!      │                                 └── OracleRelay ──→ state machine (pl-03)
//!      ↓
//! end_block ──→ committed LinkEvents
//! ```
//!
//! ## Error Classes
//!
//! | Kind | Meaning |
//! |------|---------|
//! | `Validation` | Malformed or duplicate request, nothing changed |
//! | `Proof` | Ownership proof rejected, nothing changed |
//! | `Protocol` | Transport refused or packet unrecognised |
//! | `Remote` | Oracle or counterparty sent something unusable |
//! | `NotFound` | Unknown link |
//! | `Internal` | Storage backend or codec failure |
//!
//! ## Module Structure
//!
//! ```text
//! link-runtime/
//! ├── container/       # LinksConfig, LinksModule
//! ├── handlers/        # chain link, application link and packet entry points
//! ├── msgs.rs          # transaction messages
//! ├── queries.rs       # read-only views
//! ├── devnet.rs        # scripted local chain
//! └── errors.rs        # RuntimeError, ConfigError, ErrorKind
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod container;
pub mod devnet;
pub mod errors;
pub mod handlers;
pub mod msgs;
pub mod queries;

#[cfg(test)]
mod testing;

// Re-exports
pub use container::{
    apply_overrides, load_config, AppLinksParams, LinksConfig, LinksModule, RelayConfig,
    StorageConfig, MIN_PRODUCTION_VALIDITY_SECS,
};
pub use devnet::{run_devnet, BlockReport, DevnetOptions, DevnetReport};
pub use errors::{ConfigError, ErrorKind, RuntimeError};
pub use msgs::{MsgLinkApplication, MsgLinkChainAccount, MsgUnlinkApplication, MsgUnlinkChainAccount};
