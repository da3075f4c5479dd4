// Path: crates/ledger/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # Scavenger Ledger
//!
//! The incremental tracking pipeline: a wide-format CSV keyed by address with
//! one `(Day N Solution, Day N Night)` column pair per observed challenge day,
//! and the statistics derived from it.
//!
//! ## Aggregation semantics
//!
//! Solutions and NIGHT are aggregated asymmetrically, and deliberately so:
//! an address's total solutions is the **sum** of every Solution cell, while
//! its total NIGHT is the **last** Night cell alone (a point-in-time
//! allocation snapshot). The tracker stores raw API values, so whether the
//! Solution sum double counts depends on whether the service reports per-day
//! deltas or cumulative counters. This behavior is inherited and preserved.

/// Newline-separated address lists.
pub mod addresses;
/// The in-memory tracking table, its CSV codec and the merge policy.
pub mod csv;
/// Text rendering of a `StatsReport`.
pub mod report;
/// The statistics engine.
pub mod stats;
/// File-backed persistence of the tracking table.
pub mod store;

pub use csv::{DayColumns, TrackingTable};
pub use stats::{compute_statistics, StatsReport};
pub use store::TrackingStore;
