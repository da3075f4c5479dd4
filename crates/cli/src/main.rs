// Path: crates/cli/src/main.rs
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

//! # Scavenger CLI
//!
//! Batch jobs for a fleet of Scavenger Mine wallets.

use anyhow::Result;
use clap::{Parser, Subcommand};
use scavenger_cli::config::load_config;
use scavenger_telemetry::{init_tracing, LogFormat};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

use commands::*;

#[derive(Parser, Debug)]
#[clap(
    name = "scavenger",
    version,
    about = "Register, track and consolidate Scavenger Mine wallets.",
    long_about = "Batch jobs against the Scavenger Mine API: convert seed notes, register addresses, track daily solutions and NIGHT allocation, render statistics and consolidate donations."
)]
struct Cli {
    /// Path to a scavenger.toml. Defaults apply when omitted.
    #[clap(long, global = true, env = "SCAVENGER_CONFIG")]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr.
    #[clap(long, global = true)]
    log_json: bool,

    /// Answer yes to every confirmation prompt.
    #[clap(long, short = 'y', global = true)]
    yes: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    // --- Tracking pipeline ---
    /// Poll every tracked address and merge today's column into the CSV.
    Track(track::TrackArgs),

    /// Render the statistics report from the tracking CSV.
    Stats(stats::StatsArgs),

    // --- Wallet setup ---
    /// Convert seed.txt notes into the wallet input file.
    Convert(convert::ConvertArgs),

    /// Derive and register addresses for every wallet in the input file.
    Register(register::RegisterArgs),

    /// Write registered addresses to the tracked address list.
    Export(export::ExportArgs),

    // --- Consolidation ---
    /// Sign and submit donations of every donor address to a recipient.
    Donate(donate::DonateArgs),

    // --- Tools ---
    /// Generate or inspect the configuration file.
    Config(config::ConfigCmdArgs),
}

async fn dispatch(cli: Cli) -> Result<ExitCode> {
    let config = load_config(cli.config.as_deref())?;
    let opts = GlobalOpts {
        assume_yes: cli.yes,
    };

    match cli.command {
        Commands::Track(args) => track::run(args, &config).await,
        Commands::Stats(args) => stats::run(args, &config),
        Commands::Convert(args) => convert::run(args, &config),
        Commands::Register(args) => register::run(args, &config).await,
        Commands::Export(args) => export::run(args, &config),
        Commands::Donate(args) => donate::run(args, &config, opts).await,
        Commands::Config(args) => config::run(args, &config).map(|()| ExitCode::SUCCESS),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    if let Err(e) = init_tracing(format) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match dispatch(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("\n❌ Error: {:#}\n", e);
            ExitCode::FAILURE
        }
    }
}
