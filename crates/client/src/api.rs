// Path: crates/client/src/api.rs

use async_trait::async_trait;
use scavenger_types::error::ApiError;
use serde::Deserialize;
use serde_json::Value;

/// The remote endpoints the toolkit consumes.
///
/// Implementations never retry; pacing is the caller's concern.
#[async_trait]
pub trait ScavengerApi: Send + Sync {
    /// `GET /challenge`.
    async fn challenge(&self) -> Result<ChallengeResponse, ApiError>;

    /// `GET /statistics/{address}`.
    async fn statistics(&self, address: &str) -> Result<StatisticsResponse, ApiError>;

    /// `GET /TandC`, returning the message to sign for registration.
    async fn terms_message(&self) -> Result<String, ApiError>;

    /// `POST /register/{address}/{signature}/{publicKeyHex}`.
    async fn register(
        &self,
        address: &str,
        signature: &str,
        public_key_hex: &str,
    ) -> Result<Value, ApiError>;

    /// `POST /donate_to/{recipient}/{donor}/{signature}`.
    async fn donate_to(
        &self,
        recipient: &str,
        donor: &str,
        signature: &str,
    ) -> Result<DonationReceipt, ApiError>;
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChallengeResponse {
    #[serde(default)]
    pub challenge: Option<ChallengeInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChallengeInfo {
    #[serde(default)]
    pub day: Option<u64>,
}

impl ChallengeResponse {
    /// The current day; a response without one reads as day 0.
    pub fn day(&self) -> u64 {
        self.challenge.as_ref().and_then(|c| c.day).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatisticsResponse {
    #[serde(default)]
    pub local: Option<LocalStatistics>,
}

/// Per-address counters. `night_allocation` is in micro-units.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocalStatistics {
    #[serde(default)]
    pub crypto_receipts: Option<f64>,
    #[serde(default)]
    pub night_allocation: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DonationReceipt {
    pub solutions_consolidated: u64,
    pub raw: Value,
}

impl DonationReceipt {
    /// Reads the consolidated count from either capitalization the server uses.
    pub fn from_value(raw: Value) -> Self {
        let solutions_consolidated = raw
            .get("solutions_consolidated")
            .or_else(|| raw.get("Solutions_consolidated"))
            .and_then(Value::as_f64)
            .filter(|n| n.is_finite() && *n > 0.0)
            .map(|n| n.round() as u64)
            .unwrap_or(0);
        Self {
            solutions_consolidated,
            raw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn challenge_day_defaults_to_zero() {
        let r: ChallengeResponse = serde_json::from_value(json!({"challenge": {"day": 7}})).unwrap();
        assert_eq!(r.day(), 7);
        let r: ChallengeResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(r.day(), 0);
        let r: ChallengeResponse = serde_json::from_value(json!({"challenge": null})).unwrap();
        assert_eq!(r.day(), 0);
    }

    #[test]
    fn receipt_accepts_both_capitalizations() {
        let r = DonationReceipt::from_value(json!({"solutions_consolidated": 12}));
        assert_eq!(r.solutions_consolidated, 12);
        let r = DonationReceipt::from_value(json!({"Solutions_consolidated": 4}));
        assert_eq!(r.solutions_consolidated, 4);
        let r = DonationReceipt::from_value(json!({"status": "ok"}));
        assert_eq!(r.solutions_consolidated, 0);
    }
}
