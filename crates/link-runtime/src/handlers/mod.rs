//! # Transaction Handlers
//!
//! Message and packet entry points of [`LinksModule`](crate::LinksModule).
//!
//! | Handler | Entry point |
//! |---------|-------------|
//! | `chain_links` | `link_chain_account`, `unlink_chain_account` |
//! | `app_links` | `link_application`, `unlink_application` |
//! | `packets` | `recv_packet`, `acknowledge_packet`, `timeout_packet` |
//!
//! Every entry point validates before it writes and collects its events in a
//! transaction-scoped manager, so a failed call leaves no trace.

pub mod app_links;
pub mod chain_links;
pub mod packets;
