//! # Ledger Runtime Binary
//!
//! Hosts a token ledger configured from the environment.
//!
//! ## Environment
//!
//! - `LEDGER_OWNER`, `LEDGER_CAP`, `LEDGER_EVENT_CAPACITY`: see `token_ledger::config`
//! - `LEDGER_PRODUCTION=1`: require an explicit owner
//! - `RUST_LOG`: log filter, default `info`

use anyhow::{Context, Result};
use ledger_runtime::LedgerRuntime;
use token_ledger::config::{LedgerConfig, ServiceConfig};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Load and validate configuration from the environment.
fn load_config() -> Result<ServiceConfig> {
    let ledger = LedgerConfig::from_env().context("failed to read ledger configuration")?;

    if std::env::var("LEDGER_PRODUCTION").is_ok_and(|v| v == "1") {
        ledger
            .validate_for_production()
            .context("configuration is not production-ready")?;
    } else {
        ledger.validate().context("invalid ledger configuration")?;
    }

    info!(
        owner = %ledger.owner,
        cap = %ledger.cap,
        event_channel_capacity = ledger.event_channel_capacity,
        "Loaded ledger configuration"
    );
    Ok(ServiceConfig::new(ledger).with_invariant_checks(cfg!(debug_assertions)))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config()?;

    let mut runtime = LedgerRuntime::new(config)?;
    runtime.start();

    info!("Ledger is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    // Graceful shutdown
    runtime.shutdown().await;

    Ok(())
}
