// Path: crates/cli/src/commands/export.rs

use anyhow::Result;
use clap::Parser;
use scavenger_cli::workflow::export::run_export;
use scavenger_types::config::ScavengerConfig;
use std::process::ExitCode;

#[derive(Parser, Debug)]
pub struct ExportArgs {}

pub fn run(_args: ExportArgs, config: &ScavengerConfig) -> Result<ExitCode> {
    run_export(config)?;
    Ok(ExitCode::SUCCESS)
}
