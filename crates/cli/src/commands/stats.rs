// Path: crates/cli/src/commands/stats.rs

use anyhow::Result;
use clap::Parser;
use scavenger_cli::workflow::stats::run_statistics;
use scavenger_types::config::ScavengerConfig;
use std::process::ExitCode;

#[derive(Parser, Debug)]
pub struct StatsArgs {}

pub fn run(_args: StatsArgs, config: &ScavengerConfig) -> Result<ExitCode> {
    run_statistics(config)?;
    Ok(ExitCode::SUCCESS)
}
