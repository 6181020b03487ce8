//! Domain layer for the Oracle Relay.

pub mod errors;
pub mod obi;
pub mod packets;
pub mod params;

pub use errors::{ObiError, RelayError, TransportError};
pub use obi::{ObiReader, ObiWriter, OracleScriptCallData, OracleScriptResult};
pub use packets::{
    encode_json, try_decode, Acknowledgement, ChannelEndpoint, LinkChainAccountPacketAck,
    LinkChainAccountPacketData, OracleRequestPacketAcknowledgement, OracleRequestPacketData,
    OracleResponsePacketData, Packet, PacketTimeout, ResolveStatus,
};
pub use params::{Coin, OracleParams};
