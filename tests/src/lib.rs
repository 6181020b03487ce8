//! # Profile Links Test Suite
//!
//! Cross-crate scenarios driven through the link runtime.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── support.rs        # World fixture, oracle-side packet builders
//!     ├── scenarios.rs      # End-to-end application link scenarios
//!     ├── properties.rs     # Uniqueness, totality, idempotency, expiry
//!     ├── devnet.rs         # Devnet script over the bincode codec
//!     └── chain_links.rs    # Chain links by message and by packet
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p pl-tests
//! cargo test -p pl-tests integration::scenarios::
//! ```

pub mod integration;
