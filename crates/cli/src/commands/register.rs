// Path: crates/cli/src/commands/register.rs

use super::{batch_status, http_client};
use anyhow::Result;
use clap::Parser;
use scavenger_cli::workflow::register::run_registration;
use scavenger_types::config::ScavengerConfig;
use scavenger_wallet::CommandSigner;
use std::process::ExitCode;

#[derive(Parser, Debug)]
pub struct RegisterArgs {}

pub async fn run(_args: RegisterArgs, config: &ScavengerConfig) -> Result<ExitCode> {
    let api = http_client(config)?;
    let signer = CommandSigner::new(config.signer.clone());
    let results = run_registration(config, &api, &signer).await?;
    Ok(batch_status(results.total_failed_registrations))
}
