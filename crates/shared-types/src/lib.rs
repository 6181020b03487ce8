//! # Shared Types Crate
//!
//! Types shared by every link subsystem.
//!
//! ## Contents
//!
//! - **Block context**: the height and time of the block currently being
//!   processed. All handlers take time from here, never from the wall clock,
//!   so every validating node computes identical state.
//! - **Events**: [`LinkEvent`] and the per-block [`EventManager`] collector.
//! - **Identifiers**: the `/`-separated key segment rules shared by the
//!   verifier and the store.

pub mod entities;
pub mod errors;
pub mod events;

pub use entities::*;
pub use errors::*;
pub use events::{EventManager, LinkEvent};
