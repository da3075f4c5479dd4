// Path: crates/cli/src/workflow/track.rs

use crate::util::{banner, file_name, shorten_address, RULE};
use anyhow::{Context, Result};
use scavenger_client::{fetch_wallet_stats, resolve_current_day, Pacer, ScavengerApi};
use scavenger_ledger::{addresses::load_address_list, DayColumns, TrackingStore};
use scavenger_telemetry::PhaseTimer;
use scavenger_types::app::WalletStats;
use scavenger_types::config::ScavengerConfig;
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackSummary {
    pub wallets: usize,
    pub day: u64,
    pub day_columns: usize,
    /// Addresses whose statistics could not be fetched; recorded as zeros.
    pub failed: usize,
    pub output: PathBuf,
}

/// Polls every listed address once and merges the observations into the
/// tracking CSV under the current challenge day.
pub async fn run_tracker(config: &ScavengerConfig, api: &dyn ScavengerApi) -> Result<TrackSummary> {
    let _timer = PhaseTimer::new("track");
    banner(&["Midnight Challenge Tracker", "Track wallet challenge submissions"]);

    let wallets = load_address_list(&config.path(&config.files.wallets))?;
    println!("📖 Loaded {} wallets\n", wallets.len());

    println!("🌐 Fetching current challenge day...");
    let day = resolve_current_day(api)
        .await
        .context("Failed to fetch challenge API")?;
    println!("🗓  Current challenge day: {}\n", day);

    println!("📂 Reading existing tracking data...");
    let store = TrackingStore::new(config.path(&config.files.tracker_csv));
    let table = store.load_or_default();
    println!("✅ Found {} existing day columns\n", table.columns.len());

    println!("🚀 Fetching wallet statistics...\n");
    let mut pacer = Pacer::new(config.stats_interval());
    let mut observed = HashMap::with_capacity(wallets.len());
    let mut failed = 0usize;
    for (i, wallet) in wallets.iter().enumerate() {
        pacer.ready().await;
        let stats = fetch_wallet_stats(api, wallet).await.unwrap_or_else(|_| {
            failed += 1;
            WalletStats::ZERO
        });
        println!(
            "   [{}/{}] {} -> Solution: {} | Night: {:.4}",
            i + 1,
            wallets.len(),
            shorten_address(wallet),
            stats.solution,
            stats.night_allocation
        );
        observed.insert(wallet.clone(), stats);
    }
    println!("\n✅ Fetched all wallet statistics\n");

    println!("🔄 Merging data...");
    let merged = table.merge(&DayColumns::for_day(day), &wallets, &observed);

    println!("💾 Generating CSV file...");
    store.save(&merged)?;
    println!("✅ Successfully saved to: {}\n", store.path().display());

    let summary = TrackSummary {
        wallets: wallets.len(),
        day,
        day_columns: merged.day_count(),
        failed,
        output: store.path().to_path_buf(),
    };
    tracing::info!(
        wallets = summary.wallets,
        day = summary.day,
        day_columns = summary.day_columns,
        failed = summary.failed,
        "tracking run complete"
    );

    println!("{}", RULE);
    println!("  📊 Tracking Summary");
    println!("{}", RULE);
    println!("  Total wallets tracked:  {}", summary.wallets);
    println!("  Current day:            {}", summary.day);
    println!("  Total day columns:      {}", summary.day_columns);
    println!("  ✗ Failed fetches:       {}", summary.failed);
    println!("  Output file:            {}", file_name(&summary.output));
    println!("{}\n", RULE);
    if summary.failed > 0 {
        println!(
            "⚠️  {} address(es) could not be fetched and were recorded as zero.\n",
            summary.failed
        );
    } else {
        println!("🎉 Challenge tracking completed successfully!\n");
    }
    Ok(summary)
}
