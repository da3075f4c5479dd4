// Path: crates/types/src/config/mod.rs

//! Shared configuration structures for the Scavenger batch jobs.
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The production Scavenger Mine API.
pub const DEFAULT_API_BASE: &str = "https://scavenger.prod.gd.midnighttge.io";

/// Top-level configuration shared by every subcommand.
///
/// Every field has a serde default so a partial `scavenger.toml` (or none at
/// all) is valid.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ScavengerConfig {
    /// Base URL of the remote API, without a trailing slash.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// `User-Agent` sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Per-request timeout.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Pause between consecutive read calls (statistics polling).
    #[serde(default = "default_stats_interval_ms")]
    pub stats_interval_ms: u64,
    /// Pause between consecutive write calls (registration, donation).
    #[serde(default = "default_write_interval_ms")]
    pub write_interval_ms: u64,
    /// Directory every relative file name below is resolved against.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Names of the persisted files.
    #[serde(default)]
    pub files: FileLayout,
    /// The external wallet signer.
    #[serde(default)]
    pub signer: SignerConfig,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}
fn default_user_agent() -> String {
    "wallet-tracker-rust".to_string()
}
fn default_request_timeout_secs() -> u64 {
    10
}
fn default_stats_interval_ms() -> u64 {
    500
}
fn default_write_interval_ms() -> u64 {
    1500
}
fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ScavengerConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            user_agent: default_user_agent(),
            request_timeout_secs: default_request_timeout_secs(),
            stats_interval_ms: default_stats_interval_ms(),
            write_interval_ms: default_write_interval_ms(),
            data_dir: default_data_dir(),
            files: FileLayout::default(),
            signer: SignerConfig::default(),
        }
    }
}

impl ScavengerConfig {
    /// Resolves a file name against `data_dir`. Absolute names pass through.
    pub fn path(&self, name: &Path) -> PathBuf {
        self.data_dir.join(name)
    }

    /// The per-request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The pacing interval for read calls.
    pub fn stats_interval(&self) -> Duration {
        Duration::from_millis(self.stats_interval_ms)
    }

    /// The pacing interval for write calls.
    pub fn write_interval(&self) -> Duration {
        Duration::from_millis(self.write_interval_ms)
    }
}

/// File names of every artifact the toolkit reads or writes.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FileLayout {
    /// Newline-separated list of tracked addresses.
    pub wallets: PathBuf,
    /// The wide-format tracking CSV.
    pub tracker_csv: PathBuf,
    /// The rendered statistics report.
    pub stats_report: PathBuf,
    /// Free-form seed phrase notes consumed by `convert`.
    pub seed_text: PathBuf,
    /// Wallet definitions consumed by `register`.
    pub wallet_input: PathBuf,
    /// Output of `register`, input of `export`.
    pub registration_results: PathBuf,
    /// Donor wallet definitions consumed by `donate`.
    pub donor_input: PathBuf,
    /// Signed consent records produced by donation phase 1.
    pub donation_signatures: PathBuf,
    /// Final outcome of a donation run.
    pub consolidation_results: PathBuf,
}

impl Default for FileLayout {
    fn default() -> Self {
        Self {
            wallets: "wallets.txt".into(),
            tracker_csv: "wallet-tracker.csv".into(),
            stats_report: "statistics-report.txt".into(),
            seed_text: "seed.txt".into(),
            wallet_input: "wallet-input.json".into(),
            registration_results: "registration-results.json".into(),
            donor_input: "wallet-donor-input.json".into(),
            donation_signatures: "donation-signatures.json".into(),
            consolidation_results: "consolidation-results.json".into(),
        }
    }
}

/// Configuration of the external program that derives addresses and signs.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SignerConfig {
    /// Executable invoked once per request.
    #[serde(default = "default_signer_command")]
    pub command: String,
    /// Extra arguments passed before any request is written to stdin.
    #[serde(default)]
    pub args: Vec<String>,
    /// Network the addresses are derived for.
    #[serde(default = "default_network")]
    pub network: String,
}

fn default_signer_command() -> String {
    "scavenger-signer".to_string()
}
fn default_network() -> String {
    "Mainnet".to_string()
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            command: default_signer_command(),
            args: Vec::new(),
            network: default_network(),
        }
    }
}
