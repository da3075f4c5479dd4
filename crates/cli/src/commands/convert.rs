// Path: crates/cli/src/commands/convert.rs

use anyhow::Result;
use clap::Parser;
use scavenger_cli::workflow::convert::run_convert;
use scavenger_types::config::ScavengerConfig;
use std::process::ExitCode;

#[derive(Parser, Debug)]
pub struct ConvertArgs {}

pub fn run(_args: ConvertArgs, config: &ScavengerConfig) -> Result<ExitCode> {
    run_convert(config)?;
    Ok(ExitCode::SUCCESS)
}
