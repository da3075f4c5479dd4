// Path: crates/ledger/src/stats.rs

use crate::csv::TrackingTable;
use scavenger_types::error::LedgerError;
use std::cmp::Ordering;

/// How many wallets each ranking lists.
pub const RANKING_SIZE: usize = 10;

/// A NIGHT distribution bucket. `upper` is inclusive; `None` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NightBucket {
    pub label: &'static str,
    pub upper: Option<f64>,
}

pub const NIGHT_BUCKETS: [NightBucket; 8] = [
    NightBucket { label: "0-10", upper: Some(10.0) },
    NightBucket { label: "10-50", upper: Some(50.0) },
    NightBucket { label: "50-100", upper: Some(100.0) },
    NightBucket { label: "100-200", upper: Some(200.0) },
    NightBucket { label: "200-300", upper: Some(300.0) },
    NightBucket { label: "300-400", upper: Some(400.0) },
    NightBucket { label: "400-500", upper: Some(500.0) },
    NightBucket { label: "500+", upper: None },
];

/// A solution column and the night column paired with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayColumn {
    pub day: u64,
    pub solution: String,
    pub night: Option<String>,
}

/// Reads `N` out of a header containing `Day N`.
fn day_number(header: &str) -> Option<u64> {
    let (_, rest) = header.split_once("Day ")?;
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Finds the day columns of a table in column order. A column is a solution
/// column when it names a day and contains `Solution`; its night column is
/// whichever column immediately follows it.
pub fn day_columns(columns: &[String]) -> Vec<DayColumn> {
    columns
        .iter()
        .enumerate()
        .filter(|(_, c)| c.contains("Solution"))
        .filter_map(|(i, c)| {
            let day = day_number(c)?;
            Some(DayColumn {
                day,
                solution: c.clone(),
                night: columns.get(i + 1).cloned(),
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayCell {
    pub day: u64,
    pub solution: i64,
    pub night: f64,
}

/// One address's aggregates.
#[derive(Debug, Clone, PartialEq)]
pub struct WalletSummary {
    pub address: String,
    /// Sum of every Solution cell.
    pub total_solution: i64,
    /// The last day's Night cell, not a sum.
    pub total_night: f64,
    pub days: Vec<DayCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BucketCount {
    pub label: &'static str,
    pub count: usize,
    /// Share of all wallets, rounded to one decimal.
    pub percentage: f64,
    /// Bar glyphs: `floor(percentage / 2)`.
    pub bar_len: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayTrend {
    pub day: u64,
    pub total_solutions: i64,
    /// Sum of that day's Night snapshots.
    pub night_snapshot: f64,
    pub avg_solutions_per_wallet: f64,
    pub avg_night_per_wallet: f64,
    /// Change against the previous day column; `None` for the first.
    pub solution_growth: Option<i64>,
    pub night_growth: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatsReport {
    pub total_wallets: usize,
    pub active_days: usize,
    /// Sum of per-address NIGHT snapshots.
    pub total_night: f64,
    pub total_solution: i64,
    pub avg_night_per_wallet: f64,
    pub avg_solution_per_wallet: f64,
    /// `None` when the table has no day columns.
    pub avg_solution_per_day: Option<f64>,
    pub top_by_night: Vec<WalletSummary>,
    pub bottom_by_night: Vec<WalletSummary>,
    pub top_by_solution: Vec<WalletSummary>,
    pub bottom_by_solution: Vec<WalletSummary>,
    pub max_night: f64,
    pub min_night: f64,
    pub max_solution: i64,
    pub min_solution: i64,
    pub daily: Vec<DayTrend>,
    pub distribution: Vec<BucketCount>,
    /// Every wallet in row order.
    pub wallets: Vec<WalletSummary>,
}

/// Sums solution counts, pinning at the `i64` bounds instead of overflowing.
fn saturating_sum(values: impl Iterator<Item = i64>) -> i64 {
    values.fold(0, i64::saturating_add)
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Per-address aggregates in row order.
pub fn summarize_wallets(table: &TrackingTable) -> Vec<WalletSummary> {
    let days = day_columns(&table.columns);
    table
        .addresses
        .iter()
        .map(|address| {
            let cells: Vec<DayCell> = days
                .iter()
                .map(|d| DayCell {
                    day: d.day,
                    // Solution cells are counters; fractional parts are dropped and
                    // the sign is kept. Out-of-range cells saturate.
                    solution: table.value(address, &d.solution).trunc() as i64,
                    night: d
                        .night
                        .as_deref()
                        .map(|n| table.value(address, n))
                        .unwrap_or(0.0),
                })
                .collect();
            WalletSummary {
                address: address.clone(),
                total_solution: saturating_sum(cells.iter().map(|c| c.solution)),
                total_night: cells.last().map(|c| c.night).unwrap_or(0.0),
                days: cells,
            }
        })
        .collect()
}

/// Sorted copy, descending by `key`. The sort is stable so ties keep row order.
fn ranked(wallets: &[WalletSummary], key: impl Fn(&WalletSummary) -> f64) -> Vec<WalletSummary> {
    let mut sorted = wallets.to_vec();
    sorted.sort_by(|a, b| key(b).partial_cmp(&key(a)).unwrap_or(Ordering::Equal));
    sorted
}

fn top(sorted: &[WalletSummary]) -> Vec<WalletSummary> {
    sorted.iter().take(RANKING_SIZE).cloned().collect()
}

/// The last `RANKING_SIZE` entries, lowest first.
fn bottom(sorted: &[WalletSummary]) -> Vec<WalletSummary> {
    sorted.iter().rev().take(RANKING_SIZE).cloned().collect()
}

/// Counts wallets per NIGHT bucket.
pub fn night_distribution(wallets: &[WalletSummary]) -> Vec<BucketCount> {
    let mut counts = [0usize; NIGHT_BUCKETS.len()];
    for w in wallets {
        let slot = NIGHT_BUCKETS
            .iter()
            .position(|b| b.upper.map_or(true, |upper| w.total_night <= upper))
            .unwrap_or(NIGHT_BUCKETS.len() - 1);
        if let Some(count) = counts.get_mut(slot) {
            *count += 1;
        }
    }
    let total = wallets.len().max(1) as f64;
    NIGHT_BUCKETS
        .iter()
        .zip(counts)
        .map(|(bucket, count)| {
            let percentage = round1(count as f64 / total * 100.0);
            BucketCount {
                label: bucket.label,
                count,
                percentage,
                bar_len: (percentage / 2.0).floor() as usize,
            }
        })
        .collect()
}

fn daily_trends(wallets: &[WalletSummary], days: &[DayColumn]) -> Vec<DayTrend> {
    let n = wallets.len() as f64;
    let mut trends: Vec<DayTrend> = days
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let total_solutions =
                saturating_sum(wallets.iter().filter_map(|w| w.days.get(i)).map(|c| c.solution));
            let night_snapshot: f64 = wallets
                .iter()
                .filter_map(|w| w.days.get(i))
                .map(|c| c.night)
                .sum();
            DayTrend {
                day: d.day,
                total_solutions,
                night_snapshot,
                avg_solutions_per_wallet: total_solutions as f64 / n,
                avg_night_per_wallet: night_snapshot / n,
                solution_growth: None,
                night_growth: None,
            }
        })
        .collect();

    for i in 1..trends.len() {
        let (before, after) = trends.split_at_mut(i);
        if let (Some(prev), Some(cur)) = (before.last(), after.first_mut()) {
            cur.solution_growth = Some(cur.total_solutions.saturating_sub(prev.total_solutions));
            cur.night_growth = Some(cur.night_snapshot - prev.night_snapshot);
        }
    }
    trends
}

/// Computes every aggregate of the report. Pure; fails only on a table
/// without address rows.
pub fn compute_statistics(table: &TrackingTable) -> Result<StatsReport, LedgerError> {
    if table.addresses.is_empty() {
        return Err(LedgerError::EmptyTable);
    }
    let days = day_columns(&table.columns);
    let wallets = summarize_wallets(table);

    let total_wallets = wallets.len();
    let active_days = days.len();
    let total_night: f64 = wallets.iter().map(|w| w.total_night).sum();
    let total_solution = saturating_sum(wallets.iter().map(|w| w.total_solution));

    let by_night = ranked(&wallets, |w| w.total_night);
    let by_solution = ranked(&wallets, |w| w.total_solution as f64);

    Ok(StatsReport {
        total_wallets,
        active_days,
        total_night,
        total_solution,
        avg_night_per_wallet: total_night / total_wallets as f64,
        avg_solution_per_wallet: total_solution as f64 / total_wallets as f64,
        avg_solution_per_day: (active_days > 0).then(|| total_solution as f64 / active_days as f64),
        top_by_night: top(&by_night),
        bottom_by_night: bottom(&by_night),
        top_by_solution: top(&by_solution),
        bottom_by_solution: bottom(&by_solution),
        max_night: by_night.first().map(|w| w.total_night).unwrap_or(0.0),
        min_night: by_night.last().map(|w| w.total_night).unwrap_or(0.0),
        max_solution: by_solution.first().map(|w| w.total_solution).unwrap_or(0),
        min_solution: by_solution.last().map(|w| w.total_solution).unwrap_or(0),
        daily: daily_trends(&wallets, &days),
        distribution: night_distribution(&wallets),
        wallets,
    })
}
