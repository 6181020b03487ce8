//! # Key Layout
//!
//! ```text
//! chainlink/{user}/{chain}/{address}               -> ChainLink
//! chainlink-owner/{chain}/{address}/{user}         -> (empty)
//! defaultaddr/{user}/{chain}                       -> address
//! applink/{user}/{application}/{username}          -> ApplicationLink
//! applink-by-client/{client_id}                    -> primary key
//! applink-owner/{application}/{username}/{user}    -> (empty)
//! applink-expiry/{expiration:020}/{client_id}      -> client_id
//! ```
//!
//! Expiration times are zero-padded to 20 digits so lexicographic key order
//! equals numeric order, which the expiry sweep relies on.

use shared_types::Timestamp;

/// Chain link records.
pub const CHAIN_LINK_PREFIX: &str = "chainlink/";
/// Owners of an external address.
pub const CHAIN_LINK_OWNER_PREFIX: &str = "chainlink-owner/";
/// Default external address per owner and chain.
pub const DEFAULT_ADDRESS_PREFIX: &str = "defaultaddr/";
/// Application link records.
pub const APP_LINK_PREFIX: &str = "applink/";
/// Client id index.
pub const APP_LINK_CLIENT_PREFIX: &str = "applink-by-client/";
/// Owners of an application account.
pub const APP_LINK_OWNER_PREFIX: &str = "applink-owner/";
/// Expiry index.
pub const APP_LINK_EXPIRY_PREFIX: &str = "applink-expiry/";

const EXPIRY_DIGITS: usize = 20;

/// `chainlink/{user}/{chain}/{address}`
pub fn chain_link_key(user: &str, chain: &str, address: &str) -> Vec<u8> {
    format!("{CHAIN_LINK_PREFIX}{user}/{chain}/{address}").into_bytes()
}

/// `chainlink/{user}/`
pub fn user_chain_links_prefix(user: &str) -> Vec<u8> {
    format!("{CHAIN_LINK_PREFIX}{user}/").into_bytes()
}

/// `chainlink/{user}/{chain}/`
pub fn user_chain_links_by_chain_prefix(user: &str, chain: &str) -> Vec<u8> {
    format!("{CHAIN_LINK_PREFIX}{user}/{chain}/").into_bytes()
}

/// `chainlink-owner/{chain}/{address}/{user}`
pub fn chain_link_owner_key(chain: &str, address: &str, user: &str) -> Vec<u8> {
    format!("{CHAIN_LINK_OWNER_PREFIX}{chain}/{address}/{user}").into_bytes()
}

/// `chainlink-owner/{chain}/{address}/`
pub fn chain_link_owners_prefix(chain: &str, address: &str) -> Vec<u8> {
    format!("{CHAIN_LINK_OWNER_PREFIX}{chain}/{address}/").into_bytes()
}

/// `defaultaddr/{user}/{chain}`
pub fn default_address_key(user: &str, chain: &str) -> Vec<u8> {
    format!("{DEFAULT_ADDRESS_PREFIX}{user}/{chain}").into_bytes()
}

/// `applink/{user}/{application}/{username}`
pub fn app_link_key(user: &str, application: &str, username: &str) -> Vec<u8> {
    format!("{APP_LINK_PREFIX}{user}/{application}/{username}").into_bytes()
}

/// `applink/{user}/`
pub fn user_app_links_prefix(user: &str) -> Vec<u8> {
    format!("{APP_LINK_PREFIX}{user}/").into_bytes()
}

/// `applink-by-client/{client_id}`
pub fn app_link_client_key(client_id: &str) -> Vec<u8> {
    format!("{APP_LINK_CLIENT_PREFIX}{client_id}").into_bytes()
}

/// `applink-owner/{application}/{username}/{user}`
pub fn app_link_owner_key(application: &str, username: &str, user: &str) -> Vec<u8> {
    format!("{APP_LINK_OWNER_PREFIX}{application}/{username}/{user}").into_bytes()
}

/// `applink-owner/{application}/{username}/`
pub fn app_link_owners_prefix(application: &str, username: &str) -> Vec<u8> {
    format!("{APP_LINK_OWNER_PREFIX}{application}/{username}/").into_bytes()
}

/// `applink-expiry/{expiration:020}/{client_id}`
pub fn app_link_expiry_key(expiration: Timestamp, client_id: &str) -> Vec<u8> {
    format!("{APP_LINK_EXPIRY_PREFIX}{expiration:0width$}/{client_id}", width = EXPIRY_DIGITS)
        .into_bytes()
}

/// Expiration time encoded in an expiry index key.
pub fn parse_expiry_key(key: &[u8]) -> Option<Timestamp> {
    let rest = key.strip_prefix(APP_LINK_EXPIRY_PREFIX.as_bytes())?;
    let digits = rest.get(..EXPIRY_DIGITS)?;
    std::str::from_utf8(digits).ok()?.parse().ok()
}

/// Last `/`-separated segment of a key.
pub fn last_segment(key: &[u8]) -> Option<String> {
    let key = std::str::from_utf8(key).ok()?;
    key.rsplit('/').next().map(str::to_string)
}
