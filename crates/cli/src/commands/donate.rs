// Path: crates/cli/src/commands/donate.rs

use super::{batch_status, http_client, GlobalOpts};
use anyhow::Result;
use clap::Parser;
use scavenger_cli::workflow::consolidate::{run_consolidation, ConsolidationOutcome};
use scavenger_cli::{AutoConfirm, Confirm, StdinConfirm};
use scavenger_types::config::ScavengerConfig;
use scavenger_wallet::CommandSigner;
use std::process::ExitCode;

#[derive(Parser, Debug)]
pub struct DonateArgs {
    /// Mainnet address (`addr1...`) that receives every donor's rights.
    pub recipient: String,
}

pub async fn run(args: DonateArgs, config: &ScavengerConfig, opts: GlobalOpts) -> Result<ExitCode> {
    let api = http_client(config)?;
    let signer = CommandSigner::new(config.signer.clone());
    let mut confirm: Box<dyn Confirm> = if opts.assume_yes {
        Box::new(AutoConfirm(true))
    } else {
        Box::new(StdinConfirm)
    };

    match run_consolidation(config, &args.recipient, &api, &signer, confirm.as_mut()).await? {
        ConsolidationOutcome::Cancelled => Ok(ExitCode::SUCCESS),
        ConsolidationOutcome::Completed(results) => Ok(batch_status(results.failed_donations)),
    }
}
