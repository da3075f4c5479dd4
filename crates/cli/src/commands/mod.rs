// Path: crates/cli/src/commands/mod.rs

pub mod config;
pub mod convert;
pub mod donate;
pub mod export;
pub mod register;
pub mod stats;
pub mod track;

use anyhow::Result;
use scavenger_client::HttpScavengerClient;
use scavenger_types::config::ScavengerConfig;
use std::process::ExitCode;

/// Options shared by every subcommand.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalOpts {
    pub assume_yes: bool,
}

pub(crate) fn http_client(config: &ScavengerConfig) -> Result<HttpScavengerClient> {
    let client = HttpScavengerClient::new(config)?;
    tracing::debug!(base = %client.base, "using Scavenger API");
    Ok(client)
}

/// Exit status for a batch that finished with `failures` per-item failures.
pub(crate) fn batch_status(failures: usize) -> ExitCode {
    if failures > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
