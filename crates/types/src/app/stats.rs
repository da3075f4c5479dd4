// Path: crates/types/src/app/stats.rs

use serde::{Deserialize, Serialize};

/// Statistics for one address on the current challenge day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletStats {
    /// Rounded `crypto_receipts` counter.
    pub solution: u64,
    /// NIGHT allocation in display units, four decimal places.
    pub night_allocation: f64,
}

impl WalletStats {
    /// The value recorded when the statistics call fails.
    pub const ZERO: WalletStats = WalletStats {
        solution: 0,
        night_allocation: 0.0,
    };
}
