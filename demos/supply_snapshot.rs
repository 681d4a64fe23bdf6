// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Print a one-off supply snapshot for the configured token
//!
//! Requires `BSCSCAN_API_KEY`, `CGPT_CONTRACT_ADDRESS` and `CGPT_MAX_SUPPLY`
//! (a `.env` file is honored). Set `RUST_LOG=supplyscan=debug` to watch the
//! queries and cache decisions.
//!
//! Run with:
//! ```bash
//! cargo run --example supply_snapshot
//! ```

use anyhow::{Context, Result};
use supplyscan::{AddressRegistry, EtherscanSource, MetricKey, SupplyConfig, SupplyTracker};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    dotenvy::dotenv().ok();

    let config = SupplyConfig::from_env().context("Failed to load configuration")?;
    info!(?config, "Loaded configuration");

    let registry = AddressRegistry::default_bsc()?;
    let source = EtherscanSource::new(&config)?;
    let tracker = SupplyTracker::new(source, registry, &config);

    // One full pass populates the report; the headline keys run their own
    let report = tracker
        .balances()
        .await
        .context("Failed to aggregate balances")?;

    println!("\n=== Excluded wallets ===\n");
    for observation in report.balances() {
        let record = &observation.record;
        println!(
            "{:>24}  {:<32} {:<28} {}",
            observation.whole_tokens(config.decimals),
            record.category,
            record.description,
            record.explorer_url(&config.explorer_url, config.token_address),
        );
    }

    println!("\n=== Metrics ===\n");
    for key in [MetricKey::Supply, MetricKey::TotalSupply, MetricKey::Burn] {
        let value = tracker.metric(key).await?;
        println!("{key:>12}: {}", serde_json::to_string(&value)?);
    }

    // Served from cache
    let again = tracker.circulating_supply().await?;
    info!(%again, stats = %tracker.cache_stats().await, "Cache after snapshot");

    println!("\n=== Report (JSON) ===\n");
    println!("{}", serde_json::to_string_pretty(&*report)?);

    Ok(())
}
