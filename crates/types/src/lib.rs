// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! # Scavenger Types
//!
//! This crate is the foundational library for the Scavenger toolkit, containing
//! the persisted data model, configuration objects and error types.
//!
//! ## Architectural Role
//!
//! As the base crate, `scavenger-types` has minimal dependencies and is itself a
//! dependency for every other crate in the workspace. It holds the canonical
//! shapes of every file the toolkit reads or writes (wallet inputs, registration
//! results, donation signatures) so the batch jobs agree on one schema.

/// Persisted file models: wallet inputs, registration and donation records.
pub mod app;
/// Shared configuration structures (`ScavengerConfig`, `SignerConfig`).
pub mod config;
/// A unified set of all error types used across the toolkit.
pub mod error;
