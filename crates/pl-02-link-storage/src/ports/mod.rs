//! Ports layer for Link Storage.

pub mod inbound;
pub mod outbound;

pub use inbound::LinkQueryApi;
pub use outbound::{BatchOperation, KeyValueStore, LinkCodec, ScanIter, ScanResult};
