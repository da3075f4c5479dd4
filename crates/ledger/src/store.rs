// Path: crates/ledger/src/store.rs

use crate::csv::TrackingTable;
use scavenger_types::error::LedgerError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// The tracking CSV on disk. Single writer; every save rewrites the file.
#[derive(Debug, Clone)]
pub struct TrackingStore {
    path: PathBuf,
}

impl TrackingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads prior data for a tracking run. A missing file is an empty
    /// table; an unreadable one is logged and also treated as empty.
    pub fn load_or_default(&self) -> TrackingTable {
        match fs::read_to_string(&self.path) {
            Ok(content) => TrackingTable::parse(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => TrackingTable::default(),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to read existing CSV, starting fresh"
                );
                TrackingTable::default()
            }
        }
    }

    /// Loads the table for analysis; the file must exist.
    pub fn load(&self) -> Result<TrackingTable, LedgerError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(TrackingTable::parse(&content)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(LedgerError::Missing(self.path.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrites the file with `table`.
    pub fn save(&self, table: &TrackingTable) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, table.to_csv())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::DayColumns;
    use scavenger_types::app::WalletStats;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_empty_for_tracking_but_errors_for_analysis() {
        let dir = tempdir().unwrap();
        let store = TrackingStore::new(dir.path().join("wallet-tracker.csv"));
        assert_eq!(store.load_or_default(), TrackingTable::default());
        assert!(matches!(store.load(), Err(LedgerError::Missing(_))));
    }

    #[test]
    fn save_then_load_preserves_table() {
        let dir = tempdir().unwrap();
        let store = TrackingStore::new(dir.path().join("nested/wallet-tracker.csv"));
        let wallets = vec!["addr1a".to_string(), "addr1b".to_string()];
        let observed = HashMap::from([(
            "addr1a".to_string(),
            WalletStats {
                solution: 3,
                night_allocation: 1.25,
            },
        )]);
        let table = TrackingTable::default().merge(&DayColumns::for_day(2), &wallets, &observed);
        store.save(&table).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.addresses, table.addresses);
        assert_eq!(loaded.columns, table.columns);
        assert_eq!(loaded.value("addr1a", "Day 2 Night"), 1.25);
        assert_eq!(loaded.value("addr1b", "Day 2 Solution"), 0.0);
        assert_eq!(
            std::fs::read_to_string(store.path()).unwrap(),
            table.to_csv()
        );
    }
}
