// Path: crates/cli/tests/common/mod.rs
#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use scavenger_cli::Confirm;
use scavenger_client::api::ChallengeResponse;
use scavenger_client::{DonationReceipt, ScavengerApi, StatisticsResponse};
use scavenger_types::app::{DerivedAddress, MessageSignature, SeedPhrase};
use scavenger_types::config::ScavengerConfig;
use scavenger_types::error::{ApiError, WalletError};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Config rooted at `dir` with pacing disabled.
pub fn test_config(dir: &Path) -> ScavengerConfig {
    ScavengerConfig {
        data_dir: dir.to_path_buf(),
        stats_interval_ms: 0,
        write_interval_ms: 0,
        ..Default::default()
    }
}

pub fn seed(first_word: &str, words: usize) -> String {
    vec![first_word; words].join(" ")
}

/// In-memory Scavenger API.
#[derive(Default)]
pub struct FakeApi {
    /// `None` makes `/challenge` fail.
    pub day: Option<u64>,
    pub statistics: HashMap<String, Value>,
    pub terms: String,
    /// Registration failures by address.
    pub register_errors: HashMap<String, String>,
    /// Donation failures by donor address.
    pub donate_errors: HashMap<String, String>,
    /// Donation receipts by donor address; `{}` when absent.
    pub donate_receipts: HashMap<String, Value>,
    pub calls: Mutex<Vec<String>>,
    /// File read at every donation call, as it is on disk at that moment.
    pub watched_file: Option<PathBuf>,
    pub watched_snapshots: Mutex<Vec<Value>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            day: Some(1),
            terms: "I agree to the Scavenger Mine terms".into(),
            ..Default::default()
        }
    }

    pub fn with_day(mut self, day: u64) -> Self {
        self.day = Some(day);
        self
    }

    pub fn with_stats(mut self, address: &str, receipts: f64, night_micro: f64) -> Self {
        self.statistics.insert(
            address.to_string(),
            json!({"local": {"crypto_receipts": receipts, "night_allocation": night_micro}}),
        );
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, prefix: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with(prefix))
            .collect()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn bad_request(message: &str) -> ApiError {
    ApiError::Status {
        status: 400,
        message: message.to_string(),
    }
}

#[async_trait]
impl ScavengerApi for FakeApi {
    async fn challenge(&self) -> Result<ChallengeResponse, ApiError> {
        self.record("challenge".into());
        match self.day {
            Some(day) => Ok(serde_json::from_value(json!({"challenge": {"day": day}})).unwrap()),
            None => Err(ApiError::Transport("connection refused".into())),
        }
    }

    async fn statistics(&self, address: &str) -> Result<StatisticsResponse, ApiError> {
        self.record(format!("statistics {}", address));
        match self.statistics.get(address) {
            Some(v) => Ok(serde_json::from_value(v.clone()).unwrap()),
            None => Err(ApiError::Status {
                status: 404,
                message: "Address not found".into(),
            }),
        }
    }

    async fn terms_message(&self) -> Result<String, ApiError> {
        self.record("terms".into());
        Ok(self.terms.clone())
    }

    async fn register(
        &self,
        address: &str,
        signature: &str,
        public_key_hex: &str,
    ) -> Result<Value, ApiError> {
        self.record(format!("register {} {} {}", address, signature, public_key_hex));
        match self.register_errors.get(address) {
            Some(message) => Err(bad_request(message)),
            None => Ok(json!({"registrationReceipt": {"preimage": address}})),
        }
    }

    async fn donate_to(
        &self,
        recipient: &str,
        donor: &str,
        signature: &str,
    ) -> Result<DonationReceipt, ApiError> {
        self.record(format!("donate {} {} {}", recipient, donor, signature));
        if let Some(path) = &self.watched_file {
            let text = std::fs::read_to_string(path).unwrap();
            self.watched_snapshots
                .lock()
                .unwrap()
                .push(serde_json::from_str(&text).unwrap());
        }
        if let Some(message) = self.donate_errors.get(donor) {
            return Err(bad_request(message));
        }
        let raw = self
            .donate_receipts
            .get(donor)
            .cloned()
            .unwrap_or_else(|| json!({}));
        Ok(DonationReceipt::from_value(raw))
    }
}

/// Deterministic signer: the address encodes the seed's first word and the
/// account index.
#[derive(Default)]
pub struct FakeSigner {
    /// Account indices whose derivation fails.
    pub fail_derive: HashSet<u32>,
    pub signed: Mutex<Vec<String>>,
}

impl FakeSigner {
    pub fn address(first_word: &str, index: u32) -> String {
        format!("addr1q{}{:04}", first_word, index)
    }

    pub fn public_key(index: u32) -> String {
        format!("{:064x}", index + 1)
    }
}

#[async_trait]
impl scavenger_wallet::WalletSigner for FakeSigner {
    async fn derive(&self, seed: &SeedPhrase, index: u32) -> Result<DerivedAddress, WalletError> {
        if self.fail_derive.contains(&index) {
            return Err(WalletError::Rejected(format!("cannot derive index {}", index)));
        }
        let first = seed.expose().split_whitespace().next().unwrap_or_default();
        Ok(DerivedAddress {
            address: Self::address(first, index),
            public_key_hex: Self::public_key(index),
        })
    }

    async fn sign_message(
        &self,
        _seed: &SeedPhrase,
        index: u32,
        address: &str,
        message: &str,
    ) -> Result<MessageSignature, WalletError> {
        self.signed.lock().unwrap().push(message.to_string());
        Ok(MessageSignature {
            signature: format!("sig{}", address),
            key: format!("a4010103272006215820{}", Self::public_key(index)),
        })
    }
}

/// Answers prompts from a script and records the questions.
#[derive(Default)]
pub struct ScriptedConfirm {
    pub answers: VecDeque<bool>,
    pub asked: Vec<String>,
}

impl ScriptedConfirm {
    pub fn new(answers: &[bool]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            asked: Vec::new(),
        }
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        self.asked.push(question.to_string());
        Ok(self.answers.pop_front().unwrap_or(false))
    }
}
