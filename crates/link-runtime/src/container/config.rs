//! # Links Configuration
//!
//! Parameters of the link module, with environment overrides.
//!
//! ## Environment Overrides
//!
//! | Variable | Field |
//! |----------|-------|
//! | `PL_ORACLE_SCRIPT_ID` | `oracle.script_id` |
//! | `PL_ORACLE_ASK_COUNT` | `oracle.ask_count` |
//! | `PL_ORACLE_MIN_COUNT` | `oracle.min_count` |
//! | `PL_ORACLE_PREPARE_GAS` | `oracle.prepare_gas` |
//! | `PL_ORACLE_EXECUTE_GAS` | `oracle.execute_gas` |
//! | `PL_APP_LINK_VALIDITY_SECS` | `app_links.validity_duration_secs` |
//! | `PL_STORAGE_CODEC` | `storage.codec` |

use crate::errors::ConfigError;
use pl_04_oracle_relay::OracleParams;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::info;

/// Minimum application link validity accepted in production: 14 days.
pub const MIN_PRODUCTION_VALIDITY_SECS: u64 = 14 * 24 * 60 * 60;

/// Complete link module configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinksConfig {
    /// Oracle request parameters.
    pub oracle: OracleParams,
    /// Application link parameters.
    pub app_links: AppLinksParams,
    /// Packet relay defaults.
    pub relay: RelayConfig,
    /// Storage configuration.
    pub storage: StorageConfig,
}

impl LinksConfig {
    /// Structural checks.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.oracle.validate().map_err(ConfigError::Invalid)?;
        if self.app_links.validity_duration_secs == 0 {
            return Err(ConfigError::Invalid(
                "application link validity must be positive".to_string(),
            ));
        }
        if self.relay.default_timeout_height_offset == 0 && self.relay.default_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "relay needs a default timeout height offset or duration".to_string(),
            ));
        }
        if pl_02_link_storage::codec_by_name(&self.storage.codec).is_none() {
            return Err(ConfigError::UnknownCodec(self.storage.codec.clone()));
        }
        Ok(())
    }

    /// Structural checks plus production policy.
    pub fn validate_for_production(&self) -> Result<(), ConfigError> {
        self.validate()?;
        if self.app_links.validity_duration_secs < MIN_PRODUCTION_VALIDITY_SECS {
            return Err(ConfigError::ValidityTooShort {
                secs: self.app_links.validity_duration_secs,
                min: MIN_PRODUCTION_VALIDITY_SECS,
            });
        }
        Ok(())
    }
}

/// Application link parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppLinksParams {
    /// Seconds an application link lives before the expiry sweep removes it.
    pub validity_duration_secs: u64,
}

impl Default for AppLinksParams {
    fn default() -> Self {
        Self {
            validity_duration_secs: 365 * 24 * 60 * 60,
        }
    }
}

/// Defaults applied when a request carries no packet timeout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Blocks added to the current height; 0 disables the height bound.
    pub default_timeout_height_offset: u64,
    /// Seconds added to the current block time; 0 disables the time bound.
    pub default_timeout_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            default_timeout_height_offset: 0,
            default_timeout_secs: 10 * 60,
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Record codec: `json` or `bincode`.
    pub codec: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            codec: "json".to_string(),
        }
    }
}

/// Load configuration from defaults and the process environment.
pub fn load_config() -> Result<LinksConfig, ConfigError> {
    let mut config = LinksConfig::default();
    apply_overrides(&mut config, |key| std::env::var(key).ok())?;
    Ok(config)
}

/// Apply `PL_*` overrides read through `lookup`.
pub fn apply_overrides<F>(config: &mut LinksConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    override_parsed(&lookup, "PL_ORACLE_SCRIPT_ID", &mut config.oracle.script_id)?;
    override_parsed(&lookup, "PL_ORACLE_ASK_COUNT", &mut config.oracle.ask_count)?;
    override_parsed(&lookup, "PL_ORACLE_MIN_COUNT", &mut config.oracle.min_count)?;
    override_parsed(&lookup, "PL_ORACLE_PREPARE_GAS", &mut config.oracle.prepare_gas)?;
    override_parsed(&lookup, "PL_ORACLE_EXECUTE_GAS", &mut config.oracle.execute_gas)?;
    override_parsed(
        &lookup,
        "PL_APP_LINK_VALIDITY_SECS",
        &mut config.app_links.validity_duration_secs,
    )?;

    if let Some(codec) = lookup("PL_STORAGE_CODEC") {
        let codec = codec.trim().to_lowercase();
        if pl_02_link_storage::codec_by_name(&codec).is_none() {
            return Err(ConfigError::UnknownCodec(codec));
        }
        info!(codec = %codec, "[runtime] storage codec from environment");
        config.storage.codec = codec;
    }
    Ok(())
}

fn override_parsed<F, V>(lookup: &F, key: &'static str, target: &mut V) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
    V: FromStr,
{
    if let Some(raw) = lookup(key) {
        *target = raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw.clone() })?;
        info!(key, "[runtime] configuration override");
    }
    Ok(())
}
