// Path: crates/wallet/src/lib.rs
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

//! # Scavenger Wallet
//!
//! Everything that touches seed phrases: reading operator-written wallet
//! definitions, converting free-form seed notes, and the signer port the
//! registration and donation jobs derive addresses and sign messages through.
//!
//! Key derivation and COSE signing are not implemented here. They are
//! delegated to an external program behind [`signer::WalletSigner`].

/// Validation of `wallet-input.json` and `wallet-donor-input.json`.
pub mod input;
/// The `seed.txt` converter.
pub mod seed_file;
/// The signer port and its process-backed implementation.
pub mod signer;

pub use input::{load_donor_input, load_wallet_input};
pub use seed_file::{parse_seed_file, SeedFileParse};
pub use signer::{public_key_from_cose_key, CommandSigner, WalletSigner};
