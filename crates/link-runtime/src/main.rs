//! # Link Runtime
//!
//! Local devnet entry point.
//!
//! ## Startup Sequence
//!
//! 1. Install logging (`RUST_LOG`, default `info`)
//! 2. Load configuration from defaults and `PL_*` overrides
//! 3. Produce devnet blocks until the script ends or Ctrl+C

use anyhow::{Context, Result};
use link_runtime::{load_config, run_devnet, DevnetOptions};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    // Load configuration
    let config = load_config().context("Failed to load configuration")?;
    if let Err(e) = config.validate_for_production() {
        warn!(error = %e, "[runtime] configuration is only suitable for development");
    }

    let options = DevnetOptions::default();
    tokio::select! {
        report = run_devnet(config, options) => {
            let report = report.context("Devnet failed")?;
            info!(
                blocks = report.blocks.len(),
                events = report.events().count(),
                "[runtime] devnet complete"
            );
        }
        _ = tokio::signal::ctrl_c() => {
            info!("[runtime] Shutdown signal received");
        }
    }

    Ok(())
}
