// Path: crates/ledger/src/report.rs

use crate::stats::{StatsReport, WalletSummary};
use std::fmt::Write;
use time::{macros::format_description, OffsetDateTime};

const RULE: &str = "═══════════════════════════════════════════════════════════════";
const SECTION_RULE: &str = "─────────────────────────────────────────────────────────────";
const TREND_RULE: &str =
    "─────────────────────────────────────────────────────────────────────────────────────────────────";

/// Fixed-point rendering with `,` thousands separators in the integer part.
pub fn format_number(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value);
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// Keeps the first `start` and last `end` characters around an ellipsis.
pub fn truncate_address(address: &str, start: usize, end: usize) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= start + end {
        return address.to_string();
    }
    let head: String = chars.iter().take(start).collect();
    let tail: String = chars.iter().skip(chars.len() - end).collect();
    format!("{}...{}", head, tail)
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", SECTION_RULE);
}

fn night_first_line(out: &mut String, rank: usize, w: &WalletSummary) {
    let _ = writeln!(
        out,
        "  {:>2}. {} | Night: {:>12} | Solutions: {:>4}",
        rank,
        truncate_address(&w.address, 20, 12),
        format_number(w.total_night, 4),
        w.total_solution
    );
}

fn solution_first_line(out: &mut String, rank: usize, w: &WalletSummary) {
    let _ = writeln!(
        out,
        "  {:>2}. {} | Solutions: {:>4} | Night: {:>12}",
        rank,
        truncate_address(&w.address, 20, 12),
        w.total_solution,
        format_number(w.total_night, 4)
    );
}

fn generated_stamp(at: OffsetDateTime) -> String {
    let fmt = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    at.format(&fmt).unwrap_or_else(|_| at.to_string())
}

/// Renders the plain-text statistics report.
pub fn render_report(stats: &StatsReport, generated_at: OffsetDateTime) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "  WALLET TRACKER STATISTICS REPORT");
    let _ = writeln!(out, "  Generated: {}", generated_stamp(generated_at));
    let _ = writeln!(out, "{}\n", RULE);

    section(&mut out, "📊 OVERVIEW");
    let _ = writeln!(out, "  Total Wallets:              {}", stats.total_wallets);
    let _ = writeln!(out, "  Tracking Days:              {}\n", stats.active_days);

    section(&mut out, "🎯 TOTAL METRICS");
    let _ = writeln!(
        out,
        "  Total Solutions:            {}",
        format_number(stats.total_solution as f64, 0)
    );
    let _ = writeln!(
        out,
        "  Total Night Allocation:     {} (latest snapshot)\n",
        format_number(stats.total_night, 4)
    );

    section(&mut out, "📈 AVERAGE METRICS");
    let _ = writeln!(
        out,
        "  Avg Solutions per Wallet:   {}",
        format_number(stats.avg_solution_per_wallet, 2)
    );
    let _ = writeln!(
        out,
        "  Avg Night per Wallet:       {} (from latest snapshot)",
        format_number(stats.avg_night_per_wallet, 4)
    );
    let per_day = stats
        .avg_solution_per_day
        .map(|v| format_number(v, 2))
        .unwrap_or_else(|| "-".to_string());
    let _ = writeln!(out, "  Avg Solutions per Day:      {}\n", per_day);

    section(&mut out, "📏 MIN/MAX METRICS");
    let _ = writeln!(
        out,
        "  Highest Solutions:          {}",
        format_number(stats.max_solution as f64, 0)
    );
    let _ = writeln!(
        out,
        "  Lowest Solutions:           {}",
        format_number(stats.min_solution as f64, 0)
    );
    let _ = writeln!(
        out,
        "  Highest Night:              {}",
        format_number(stats.max_night, 4)
    );
    let _ = writeln!(
        out,
        "  Lowest Night:               {}\n",
        format_number(stats.min_night, 4)
    );

    section(&mut out, "🏆 TOP 10 WALLETS BY NIGHT ALLOCATION");
    for (i, w) in stats.top_by_night.iter().enumerate() {
        night_first_line(&mut out, i + 1, w);
    }
    out.push('\n');

    section(&mut out, "🎖️  TOP 10 WALLETS BY SOLUTIONS");
    for (i, w) in stats.top_by_solution.iter().enumerate() {
        solution_first_line(&mut out, i + 1, w);
    }
    out.push('\n');

    // Skipped while the lowest wallets have nothing allocated yet.
    if stats
        .bottom_by_night
        .first()
        .is_some_and(|w| w.total_night > 0.0)
    {
        section(&mut out, "⬇️  BOTTOM 10 WALLETS BY NIGHT ALLOCATION");
        for (i, w) in stats.bottom_by_night.iter().enumerate() {
            night_first_line(&mut out, i + 1, w);
        }
        out.push('\n');
    }

    section(&mut out, "📊 NIGHT ALLOCATION DISTRIBUTION");
    for bucket in &stats.distribution {
        let _ = writeln!(
            out,
            "  {:<12}: {:>4} wallets ({:>5}%) {}",
            bucket.label,
            bucket.count,
            format!("{:.1}", bucket.percentage),
            "█".repeat(bucket.bar_len)
        );
    }
    out.push('\n');

    let _ = writeln!(out, "📅 DAILY TRENDS");
    let _ = writeln!(out, "{}", TREND_RULE);
    let _ = writeln!(
        out,
        "  Day | Total Solutions | Night Snapshot | Sol Growth | Night Growth | Avg Sol/Wallet | Avg Night/Wallet"
    );
    let _ = writeln!(
        out,
        "  ────┼─────────────────┼────────────────┼────────────┼──────────────┼────────────────┼──────────────────"
    );
    for day in &stats.daily {
        let sol_growth = day
            .solution_growth
            .map(|g| format_number(g as f64, 0))
            .unwrap_or_else(|| "-".to_string());
        let night_growth = day
            .night_growth
            .map(|g| format_number(g, 4))
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "  {:>3} | {:>15} | {:>14} | {:>10} | {:>12} | {:>14} | {:>16}",
            day.day,
            format_number(day.total_solutions as f64, 0),
            format_number(day.night_snapshot, 2),
            sol_growth,
            night_growth,
            format_number(day.avg_solutions_per_wallet, 2),
            format_number(day.avg_night_per_wallet, 4)
        );
    }
    out.push('\n');

    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "  End of Report");
    let _ = writeln!(out, "{}", RULE);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compute_statistics, TrackingTable};
    use time::macros::datetime;

    #[test]
    fn numbers_get_thousands_separators() {
        assert_eq!(format_number(1234567.0, 0), "1,234,567");
        assert_eq!(format_number(1234.5, 4), "1,234.5000");
        assert_eq!(format_number(999.0, 2), "999.00");
        assert_eq!(format_number(-1234.0, 0), "-1,234");
        assert_eq!(format_number(0.0, 4), "0.0000");
    }

    #[test]
    fn long_addresses_are_truncated() {
        let addr = "addr1qxyz0123456789abcdefghijklmnopqrstuvwxyz0123456789";
        let short = truncate_address(addr, 20, 12);
        assert_eq!(short, "addr1qxyz0123456789a...yz0123456789");
        assert_eq!(truncate_address("addr1short", 20, 12), "addr1short");
    }

    #[test]
    fn report_contains_every_section() {
        let table = TrackingTable::parse(
            "Wallet Address,Day 1 Solution,Day 1 Night,Day 2 Solution,Day 2 Night\nA,5,2.5,6,3\nB,3,2.5,1,1.25",
        );
        let stats = compute_statistics(&table).unwrap();
        let text = render_report(&stats, datetime!(2025-11-02 08:30:00 UTC));

        assert!(text.contains("  Generated: 2025-11-02 08:30:00"));
        assert!(text.contains("  Total Wallets:              2"));
        assert!(text.contains("  Tracking Days:              2"));
        assert!(text.contains("  Total Solutions:            15"));
        assert!(text.contains("  Total Night Allocation:     4.2500 (latest snapshot)"));
        assert!(text.contains("BOTTOM 10 WALLETS BY NIGHT ALLOCATION"));
        assert!(text.contains("  0-10        :    2 wallets (100.0%) "));
        assert!(text.contains(&"█".repeat(50)));
        assert!(text.contains(&format!(
            "  {:>3} | {:>15} | {:>14} | {:>10} | {:>12} |",
            1, "8", "5.00", "-", "-"
        )));
        assert!(text.contains(&format!(
            "  {:>3} | {:>15} | {:>14} | {:>10} | {:>12} |",
            2, "7", "4.25", "-1", "-0.7500"
        )));
        assert!(text.trim_end().ends_with(RULE));
    }

    #[test]
    fn bottom_section_is_omitted_when_lowest_is_zero() {
        let table = TrackingTable::parse("Wallet Address,Day 1 Solution,Day 1 Night\nA,5,2.5\nB,0,0");
        let stats = compute_statistics(&table).unwrap();
        let text = render_report(&stats, datetime!(2025-11-02 08:30:00 UTC));
        assert!(!text.contains("BOTTOM 10"));
        assert!(text.contains("TOP 10 WALLETS BY NIGHT ALLOCATION"));
    }

    #[test]
    fn missing_day_columns_render_dash_average() {
        let table = TrackingTable::parse("Wallet Address\nA");
        let stats = compute_statistics(&table).unwrap();
        let text = render_report(&stats, datetime!(2025-11-02 08:30:00 UTC));
        assert!(text.contains("  Avg Solutions per Day:      -"));
    }
}
