//! # Oracle Parameters
//!
//! Fixed fields of every oracle request packet.

use serde::{Deserialize, Serialize};

/// Token amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    /// Denomination.
    pub denom: String,
    /// Amount in base units.
    pub amount: u64,
}

impl Coin {
    /// Create a coin.
    pub fn new(denom: impl Into<String>, amount: u64) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }
}

/// Oracle request parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleParams {
    /// Oracle script that verifies application accounts.
    pub script_id: u64,
    /// Validators asked to report.
    pub ask_count: u64,
    /// Reports required to resolve.
    pub min_count: u64,
    /// Maximum fee paid to data providers.
    pub fee_amount: Vec<Coin>,
    /// Gas for the oracle script's prepare phase.
    pub prepare_gas: u64,
    /// Gas for the oracle script's execute phase.
    pub execute_gas: u64,
}

impl Default for OracleParams {
    fn default() -> Self {
        Self {
            script_id: 32,
            ask_count: 1,
            min_count: 1,
            fee_amount: vec![Coin::new("band", 10)],
            prepare_gas: 50_000,
            execute_gas: 200_000,
        }
    }
}

impl OracleParams {
    /// Structural checks.
    pub fn validate(&self) -> Result<(), String> {
        if self.min_count == 0 {
            return Err("oracle min count must be positive".to_string());
        }
        if self.ask_count < self.min_count {
            return Err(format!(
                "oracle ask count {} below min count {}",
                self.ask_count, self.min_count
            ));
        }
        if self.prepare_gas == 0 || self.execute_gas == 0 {
            return Err("oracle gas limits must be positive".to_string());
        }
        if self.fee_amount.is_empty() || self.fee_amount.iter().any(|c| c.denom.trim().is_empty()) {
            return Err("oracle fee must name at least one denomination".to_string());
        }
        Ok(())
    }
}
