// Path: crates/cli/src/lib.rs
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

//! # Scavenger CLI Library
//!
//! The batch jobs behind the `scavenger` binary, exposed as a library so they
//! can be driven from tests with in-memory fakes.
//!
//! Every workflow receives its collaborators explicitly: the loaded
//! [`ScavengerConfig`](scavenger_types::config::ScavengerConfig), a
//! [`ScavengerApi`](scavenger_client::ScavengerApi), a
//! [`WalletSigner`](scavenger_wallet::WalletSigner) where keys are involved,
//! and a [`prompt::Confirm`] where the operator has to decide. Workflows run
//! strictly sequentially; the only waits are remote calls and pacing sleeps.
//!
//! Operator-facing progress goes to stdout. Diagnostics go through `tracing`.

pub mod config;
pub mod prompt;
pub mod util;
pub mod workflow;

pub use prompt::{AutoConfirm, Confirm, StdinConfirm};
