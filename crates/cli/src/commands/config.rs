// Path: crates/cli/src/commands/config.rs

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use scavenger_types::config::ScavengerConfig;
use std::fs;
use std::path::PathBuf;

const CONFIG_FILE_NAME: &str = "scavenger.toml";

#[derive(Parser, Debug)]
pub struct ConfigCmdArgs {
    #[clap(subcommand)]
    pub command: ConfigSubCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubCommands {
    /// Write a scavenger.toml holding every default.
    New {
        #[clap(long, default_value = ".")]
        out_dir: PathBuf,
        /// Overwrite an existing file.
        #[clap(long)]
        force: bool,
    },
    /// Print the effective configuration.
    Show,
}

pub fn run(args: ConfigCmdArgs, effective: &ScavengerConfig) -> Result<()> {
    match args.command {
        ConfigSubCommands::New { out_dir, force } => {
            fs::create_dir_all(&out_dir)?;
            let path = out_dir.join(CONFIG_FILE_NAME);
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            fs::write(&path, toml::to_string_pretty(&ScavengerConfig::default())?)
                .with_context(|| format!("Failed to write {}", path.display()))?;

            println!("✅ Generated {}", path.display());
            println!("ℹ️  Set [signer] command to the program that derives addresses and signs.");
            println!("   Pass the file with --config or place your data files next to it.");
        }
        ConfigSubCommands::Show => {
            print!("{}", toml::to_string_pretty(effective)?);
        }
    }
    Ok(())
}
