// Path: crates/cli/src/commands/track.rs

use super::{batch_status, http_client};
use anyhow::Result;
use clap::Parser;
use scavenger_cli::workflow::track::run_tracker;
use scavenger_types::config::ScavengerConfig;
use std::process::ExitCode;

#[derive(Parser, Debug)]
pub struct TrackArgs {}

pub async fn run(_args: TrackArgs, config: &ScavengerConfig) -> Result<ExitCode> {
    let api = http_client(config)?;
    let summary = run_tracker(config, &api).await?;
    Ok(batch_status(summary.failed))
}
