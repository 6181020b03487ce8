//! Link record codecs.

use crate::domain::entities::{ApplicationLink, ChainLink};
use crate::domain::errors::StoreError;
use crate::ports::outbound::LinkCodec;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// JSON encoding (serde_json). Human-readable; the default.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonLinkCodec;

impl JsonLinkCodec {
    fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
        serde_json::to_vec(value).map_err(|e| StoreError::Codec(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, StoreError> {
        serde_json::from_slice(bytes).map_err(|e| StoreError::Codec(e.to_string()))
    }
}

impl LinkCodec for JsonLinkCodec {
    fn name(&self) -> &'static str {
        "json"
    }

    fn encode_chain_link(&self, link: &ChainLink) -> Result<Vec<u8>, StoreError> {
        Self::encode(link)
    }

    fn decode_chain_link(&self, bytes: &[u8]) -> Result<ChainLink, StoreError> {
        Self::decode(bytes)
    }

    fn encode_application_link(&self, link: &ApplicationLink) -> Result<Vec<u8>, StoreError> {
        Self::encode(link)
    }

    fn decode_application_link(&self, bytes: &[u8]) -> Result<ApplicationLink, StoreError> {
        Self::decode(bytes)
    }
}

/// Compact binary encoding (bincode).
#[derive(Debug, Default, Clone, Copy)]
pub struct BincodeLinkCodec;

impl BincodeLinkCodec {
    fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
        bincode::serialize(value).map_err(|e| StoreError::Codec(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, StoreError> {
        bincode::deserialize(bytes).map_err(|e| StoreError::Codec(e.to_string()))
    }
}

impl LinkCodec for BincodeLinkCodec {
    fn name(&self) -> &'static str {
        "bincode"
    }

    fn encode_chain_link(&self, link: &ChainLink) -> Result<Vec<u8>, StoreError> {
        Self::encode(link)
    }

    fn decode_chain_link(&self, bytes: &[u8]) -> Result<ChainLink, StoreError> {
        Self::decode(bytes)
    }

    fn encode_application_link(&self, link: &ApplicationLink) -> Result<Vec<u8>, StoreError> {
        Self::encode(link)
    }

    fn decode_application_link(&self, bytes: &[u8]) -> Result<ApplicationLink, StoreError> {
        Self::decode(bytes)
    }
}

/// Codec for a configured name (`json` or `bincode`).
pub fn codec_by_name(name: &str) -> Option<Arc<dyn LinkCodec>> {
    match name {
        "json" => Some(Arc::new(JsonLinkCodec)),
        "bincode" => Some(Arc::new(BincodeLinkCodec)),
        _ => None,
    }
}
