// Path: crates/cli/src/workflow/mod.rs

/// Donation consolidation: signature generation and execution.
pub mod consolidate;
/// `seed.txt` to `wallet-input.json`.
pub mod convert;
/// Registered addresses to the tracked address list.
pub mod export;
/// Address registration.
pub mod register;
/// Statistics report over the tracking table.
pub mod stats;
/// One tracking run.
pub mod track;
