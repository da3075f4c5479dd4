// Path: crates/types/src/app/mod.rs
//! Persisted file models shared by the batch jobs.

/// Donation phase records, the signature file and the consolidation results.
pub mod donation;
/// Registration results and the per-address wallet record.
pub mod registration;
/// Normalized per-address statistics as returned by the stats fetcher.
pub mod stats;
/// Seed phrases and wallet input definitions.
pub mod wallet;

pub use donation::*;
pub use registration::*;
pub use stats::*;
pub use wallet::*;
