//! # Links Container
//!
//! Configuration and the module that owns every link subsystem instance.
//!
//! ## Wiring
//!
//! ```text
//! LinksModule
//! ├── LinkStore<S>          (pl-02, codec from StorageConfig)
//! ├── OracleRelay           (pl-04, OracleParams + validity)
//! ├── PacketDispatcher<S>   (chain link handler, then oracle relay)
//! ├── ExpirySweeper         (pl-03, begin-block hook)
//! ├── ProofVerifier         (pl-01, chain link messages)
//! ├── T: PacketTransport
//! └── Box<dyn AccountKeys>
//! ```

pub mod config;
pub mod module;

pub use config::{
    apply_overrides, load_config, AppLinksParams, LinksConfig, RelayConfig, StorageConfig,
    MIN_PRODUCTION_VALIDITY_SECS,
};
pub use module::LinksModule;
