// Path: crates/client/src/lib.rs
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

//! # Scavenger Client
//!
//! Typed access to the remote Scavenger Mine API.
//!
//! The batch jobs only ever talk to the service through the [`ScavengerApi`]
//! trait so they can be driven against an in-memory fake in tests. The
//! production implementation is [`HttpScavengerClient`].

/// The `ScavengerApi` trait and the wire shapes of its responses.
pub mod api;
/// The reqwest-backed implementation.
pub mod http;
/// Fixed-interval pacing between consecutive calls.
pub mod pacer;
/// Day resolution and per-address statistics normalization.
pub mod stats;

pub use api::{DonationReceipt, ScavengerApi, StatisticsResponse};
pub use http::HttpScavengerClient;
pub use pacer::Pacer;
pub use stats::{fetch_wallet_stats, resolve_current_day};
