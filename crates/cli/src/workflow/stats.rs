// Path: crates/cli/src/workflow/stats.rs

use crate::util::{banner, RULE};
use anyhow::{Context, Result};
use scavenger_ledger::report::{format_number, render_report};
use scavenger_ledger::{compute_statistics, StatsReport, TrackingStore};
use scavenger_telemetry::PhaseTimer;
use scavenger_types::config::ScavengerConfig;
use time::OffsetDateTime;

/// Renders the statistics report for the tracking CSV, prints it and saves
/// it next to the CSV.
pub fn run_statistics(config: &ScavengerConfig) -> Result<StatsReport> {
    let _timer = PhaseTimer::new("stats");
    banner(&["Wallet Tracker Statistics"]);

    let store = TrackingStore::new(config.path(&config.files.tracker_csv));
    println!("📂 Reading data from: {}", store.path().display());
    let table = store.load()?;

    println!("📊 Calculating statistics...");
    let stats = compute_statistics(&table)?;
    println!(
        "✅ Loaded {} wallets with {} days of data\n",
        stats.total_wallets, stats.active_days
    );

    println!("📝 Generating report...");
    let report = render_report(&stats, OffsetDateTime::now_utc());
    println!("\n{}", report);

    let out = config.path(&config.files.stats_report);
    println!("💾 Saving report to: {}", out.display());
    std::fs::write(&out, &report).with_context(|| format!("Failed to write {}", out.display()))?;
    println!("✅ Report saved successfully\n");

    println!("{}", RULE);
    println!("  📊 Statistics Summary");
    println!("{}", RULE);
    println!("  Total Wallets:          {}", stats.total_wallets);
    println!(
        "  Total Solutions:        {}",
        format_number(stats.total_solution as f64, 0)
    );
    println!("  Total Night:            {}", format_number(stats.total_night, 4));
    println!(
        "  Avg Solutions/Wallet:   {}",
        format_number(stats.avg_solution_per_wallet, 2)
    );
    println!(
        "  Avg Night/Wallet:       {}",
        format_number(stats.avg_night_per_wallet, 4)
    );
    println!("{}\n", RULE);
    Ok(stats)
}
