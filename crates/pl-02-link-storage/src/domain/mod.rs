//! Domain layer for Link Storage.

pub mod entities;
pub mod errors;
pub mod keys;
pub mod value_objects;

pub use entities::{ApplicationLink, ApplicationLinkData, ChainLink, OracleRequest};
pub use errors::{KVStoreError, StoreError};
pub use value_objects::{LinkResult, LinkState};
