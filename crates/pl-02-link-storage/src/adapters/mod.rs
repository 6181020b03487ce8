//! Adapters for Link Storage.

pub mod codec;
pub mod memory;

pub use codec::{codec_by_name, BincodeLinkCodec, JsonLinkCodec};
pub use memory::InMemoryKVStore;
