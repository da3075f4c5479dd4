// Path: crates/ledger/src/csv.rs

use scavenger_types::app::WalletStats;
use std::collections::HashMap;

/// Header of the row-key column.
pub const ADDRESS_HEADER: &str = "Wallet Address";

// Written by early tracker versions; never a data column.
const LEGACY_TOTAL_HEADER: &str = "Total Night per address";
const LEGACY_FOOTER_KEYS: [&str; 2] = ["Total Solution", "Total Night"];

/// Cell values of one row, keyed by column name.
pub type RowValues = HashMap<String, f64>;
/// Cell values of every row, keyed by address.
pub type TableValues = HashMap<String, RowValues>;

/// The wide-format tracking table.
///
/// `columns` excludes the address column and keeps file order. Cells absent
/// from `values` read as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackingTable {
    pub addresses: Vec<String>,
    pub columns: Vec<String>,
    pub values: TableValues,
}

/// The column pair written for one challenge day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayColumns {
    pub day: u64,
    pub solution: String,
    pub night: String,
}

impl DayColumns {
    pub fn for_day(day: u64) -> Self {
        Self {
            day,
            solution: format!("Day {} Solution", day),
            night: format!("Day {} Night", day),
        }
    }
}

/// Parses the leading decimal number of `s` the way a lenient float reader
/// does: trailing garbage is ignored, anything unparseable is zero.
pub fn parse_cell(s: &str) -> f64 {
    let s = s.trim_start();
    let end = s
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    let candidate = s.get(..end).unwrap_or("");
    // Longest prefix that parses wins, so "12e" reads as 12.
    let parsed = (1..=candidate.len())
        .rev()
        .filter_map(|n| candidate.get(..n))
        .find_map(|prefix| prefix.parse::<f64>().ok())
        .unwrap_or(0.0);
    if parsed.is_finite() && parsed != 0.0 {
        parsed
    } else {
        0.0
    }
}

/// Renders a cell the way the tracker has always written numbers: integral
/// values without a decimal point, others in shortest round-trip form.
pub fn format_cell(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        "0".to_string()
    } else {
        format!("{}", value)
    }
}

impl TrackingTable {
    /// Parses CSV text. Blank lines and legacy footer rows are skipped; short
    /// rows read missing cells as zero.
    pub fn parse(content: &str) -> Self {
        let mut lines = content.trim().split('\n');
        let headers: Vec<String> = match lines.next() {
            Some(line) if !line.trim().is_empty() => {
                line.split(',').map(|h| h.trim().to_string()).collect()
            }
            _ => return Self::default(),
        };

        let address_idx = headers.iter().position(|h| h == ADDRESS_HEADER);
        let columns: Vec<String> = headers
            .iter()
            .filter(|h| h.as_str() != ADDRESS_HEADER && h.as_str() != LEGACY_TOTAL_HEADER)
            .cloned()
            .collect();

        let mut table = TrackingTable {
            columns,
            ..Default::default()
        };

        for line in lines {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let cells: Vec<&str> = line.split(',').map(str::trim).collect();
            let address = address_idx
                .and_then(|i| cells.get(i))
                .copied()
                .unwrap_or("");
            if address.is_empty() || LEGACY_FOOTER_KEYS.contains(&address) {
                continue;
            }

            let mut row = RowValues::new();
            for (i, header) in headers.iter().enumerate() {
                if !table.columns.contains(header) {
                    continue;
                }
                let value = cells.get(i).map(|c| parse_cell(c)).unwrap_or(0.0);
                row.insert(header.clone(), value);
            }
            if table.values.insert(address.to_string(), row).is_none() {
                table.addresses.push(address.to_string());
            }
        }
        table
    }

    /// Serializes the table: header line then one line per address, joined by
    /// `\n` with no trailing newline. Fields are never quoted.
    pub fn to_csv(&self) -> String {
        let mut lines = Vec::with_capacity(self.addresses.len() + 1);
        let mut header = Vec::with_capacity(self.columns.len() + 1);
        header.push(ADDRESS_HEADER);
        header.extend(self.columns.iter().map(String::as_str));
        lines.push(header.join(","));

        for address in &self.addresses {
            let mut row = Vec::with_capacity(self.columns.len() + 1);
            row.push(address.clone());
            for column in &self.columns {
                row.push(format_cell(self.value(address, column)));
            }
            lines.push(row.join(","));
        }
        lines.join("\n")
    }

    /// The cell at `(address, column)`, zero when absent.
    pub fn value(&self, address: &str, column: &str) -> f64 {
        self.values
            .get(address)
            .and_then(|row| row.get(column))
            .copied()
            .unwrap_or(0.0)
    }

    /// Whether the table already has a column for `day`.
    pub fn has_day(&self, day: &DayColumns) -> bool {
        self.columns.iter().any(|c| c == &day.solution)
    }

    /// Number of day column pairs.
    pub fn day_count(&self) -> usize {
        self.columns.len() / 2
    }

    /// Merges one day of observations into the table.
    ///
    /// Rows follow `wallets`: addresses absent from it are dropped and new
    /// ones start with zeros in every earlier column. The day's column pair is
    /// appended only when the table does not have it yet, so re-running for
    /// the same day overwrites that day's cells and nothing else.
    pub fn merge(
        mut self,
        day: &DayColumns,
        wallets: &[String],
        observed: &HashMap<String, WalletStats>,
    ) -> TrackingTable {
        if !self.has_day(day) {
            self.columns.push(day.solution.clone());
            self.columns.push(day.night.clone());
        }

        let mut values = TableValues::with_capacity(wallets.len());
        for wallet in wallets {
            let mut row = self.values.remove(wallet).unwrap_or_default();
            if let Some(stats) = observed.get(wallet) {
                row.insert(day.solution.clone(), stats.solution as f64);
                row.insert(day.night.clone(), stats.night_allocation);
            }
            values.insert(wallet.clone(), row);
        }

        TrackingTable {
            addresses: wallets.to_vec(),
            columns: self.columns,
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_DAYS: &str = "Wallet Address,Day 1 Solution,Day 1 Night,Day 3 Solution,Day 3 Night\n\
addr1a,5,2.5,7,3.1234\n\
addr1b,3,0,4,1";

    fn stats(solution: u64, night: f64) -> WalletStats {
        WalletStats {
            solution,
            night_allocation: night,
        }
    }

    #[test]
    fn parse_then_serialize_round_trips() {
        let table = TrackingTable::parse(TWO_DAYS);
        assert_eq!(table.addresses, vec!["addr1a", "addr1b"]);
        assert_eq!(
            table.columns,
            vec!["Day 1 Solution", "Day 1 Night", "Day 3 Solution", "Day 3 Night"]
        );
        assert_eq!(table.value("addr1a", "Day 3 Night"), 3.1234);
        assert_eq!(table.to_csv(), TWO_DAYS);
    }

    #[test]
    fn header_only_and_empty_files() {
        assert_eq!(TrackingTable::parse(""), TrackingTable::default());
        let table = TrackingTable::parse("Wallet Address\n");
        assert!(table.columns.is_empty());
        assert!(table.addresses.is_empty());
        assert_eq!(table.to_csv(), "Wallet Address");
    }

    #[test]
    fn unparseable_and_missing_cells_are_zero() {
        let table = TrackingTable::parse(
            "Wallet Address,Day 1 Solution,Day 1 Night\naddr1a,abc\naddr1b,,x\naddr1c,12e,1.5kg",
        );
        assert_eq!(table.value("addr1a", "Day 1 Solution"), 0.0);
        assert_eq!(table.value("addr1a", "Day 1 Night"), 0.0);
        assert_eq!(table.value("addr1b", "Day 1 Night"), 0.0);
        assert_eq!(table.value("addr1c", "Day 1 Solution"), 12.0);
        assert_eq!(table.value("addr1c", "Day 1 Night"), 1.5);
    }

    #[test]
    fn legacy_total_column_and_footer_rows_are_dropped() {
        let table = TrackingTable::parse(
            "Wallet Address,Day 1 Solution,Day 1 Night,Total Night per address\n\
addr1a,1,2,2\n\
Total Solution,1,,\n\
Total Night,,2,2",
        );
        assert_eq!(table.columns, vec!["Day 1 Solution", "Day 1 Night"]);
        assert_eq!(table.addresses, vec!["addr1a"]);
    }

    #[test]
    fn merge_appends_new_day_after_existing_columns() {
        let table = TrackingTable::parse(TWO_DAYS);
        let wallets = vec!["addr1b".to_string(), "addr1c".to_string()];
        let observed = HashMap::from([
            ("addr1b".to_string(), stats(9, 2.25)),
            ("addr1c".to_string(), stats(1, 0.5)),
        ]);
        let merged = table.merge(&DayColumns::for_day(4), &wallets, &observed);

        assert_eq!(
            merged.columns,
            vec![
                "Day 1 Solution",
                "Day 1 Night",
                "Day 3 Solution",
                "Day 3 Night",
                "Day 4 Solution",
                "Day 4 Night"
            ]
        );
        // Row order follows the wallet list; addr1a is gone.
        assert_eq!(
            merged.to_csv(),
            "Wallet Address,Day 1 Solution,Day 1 Night,Day 3 Solution,Day 3 Night,Day 4 Solution,Day 4 Night\n\
addr1b,3,0,4,1,9,2.25\n\
addr1c,0,0,0,0,1,0.5"
        );
    }

    #[test]
    fn merging_the_same_day_twice_is_idempotent_on_history() {
        let wallets = vec!["addr1a".to_string(), "addr1b".to_string()];
        let day = DayColumns::for_day(3);
        let first = TrackingTable::parse(TWO_DAYS).merge(
            &day,
            &wallets,
            &HashMap::from([
                ("addr1a".to_string(), stats(8, 3.5)),
                ("addr1b".to_string(), stats(4, 1.0)),
            ]),
        );
        let second = first.clone().merge(
            &day,
            &wallets,
            &HashMap::from([
                ("addr1a".to_string(), stats(10, 3.75)),
                ("addr1b".to_string(), stats(4, 1.0)),
            ]),
        );

        assert_eq!(first.columns, second.columns);
        assert_eq!(second.columns.len(), 4);
        for wallet in &wallets {
            assert_eq!(
                first.value(wallet, "Day 1 Solution"),
                second.value(wallet, "Day 1 Solution")
            );
            assert_eq!(
                first.value(wallet, "Day 1 Night"),
                second.value(wallet, "Day 1 Night")
            );
        }
        assert_eq!(second.value("addr1a", "Day 3 Solution"), 10.0);
        assert_eq!(second.value("addr1a", "Day 3 Night"), 3.75);
    }

    #[test]
    fn first_run_creates_the_table() {
        let wallets = vec!["addr1a".to_string()];
        let merged = TrackingTable::default().merge(
            &DayColumns::for_day(1),
            &wallets,
            &HashMap::from([("addr1a".to_string(), stats(5, 2.5))]),
        );
        assert_eq!(
            merged.to_csv(),
            "Wallet Address,Day 1 Solution,Day 1 Night\naddr1a,5,2.5"
        );
        assert_eq!(merged.day_count(), 1);
    }

    #[test]
    fn cells_render_like_the_original_tracker() {
        assert_eq!(format_cell(5.0), "5");
        assert_eq!(format_cell(2.5), "2.5");
        assert_eq!(format_cell(-0.0), "0");
        assert_eq!(format_cell(f64::NAN), "0");
        assert_eq!(format_cell(1234.5678), "1234.5678");
    }
}
