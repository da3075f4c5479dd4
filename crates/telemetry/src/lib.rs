// Path: crates/telemetry/src/lib.rs
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

//! # Scavenger Telemetry
//!
//! Logging initialization for the batch jobs and a small RAII timer that
//! reports how long a phase took.

/// The initialization routine for global structured logging.
pub mod init;
/// A simple RAII timer for measuring the duration of a scope.
pub mod time;

pub use init::{init_tracing, LogFormat};
pub use time::PhaseTimer;
