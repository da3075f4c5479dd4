// Path: crates/client/src/stats.rs
use crate::api::{ScavengerApi, StatisticsResponse};
use scavenger_types::{app::WalletStats, error::ApiError};

const MICRO_UNITS_PER_NIGHT: f64 = 1_000_000.0;
const NIGHT_DECIMALS_SCALE: f64 = 10_000.0;

/// Rounds half-way cases towards positive infinity.
fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Converts a raw statistics response into display units.
pub fn normalize(response: &StatisticsResponse) -> WalletStats {
    let local = response.local.clone().unwrap_or_default();
    let receipts = local.crypto_receipts.filter(|v| v.is_finite()).unwrap_or(0.0);
    let night_raw = local.night_allocation.filter(|v| v.is_finite()).unwrap_or(0.0);
    WalletStats {
        solution: round_half_up(receipts).max(0.0) as u64,
        night_allocation: round_half_up(night_raw / MICRO_UNITS_PER_NIGHT * NIGHT_DECIMALS_SCALE)
            / NIGHT_DECIMALS_SCALE,
    }
}

/// Fetches and normalizes one address's statistics. Failures are logged
/// here; the caller decides what to record for the address.
pub async fn fetch_wallet_stats(
    api: &dyn ScavengerApi,
    address: &str,
) -> Result<WalletStats, ApiError> {
    match api.statistics(address).await {
        Ok(response) => Ok(normalize(&response)),
        Err(e) => {
            tracing::warn!(address, error = %e, "Failed to fetch stats");
            Err(e)
        }
    }
}

/// Resolves the current challenge day. Failure is fatal to a tracking run.
pub async fn resolve_current_day(api: &dyn ScavengerApi) -> Result<u64, ApiError> {
    let response = api.challenge().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to fetch challenge API");
        e
    })?;
    Ok(response.day())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(v: serde_json::Value) -> StatisticsResponse {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn normalizes_receipts_and_micro_units() {
        let stats = normalize(&parse(
            json!({"local": {"crypto_receipts": 12.7, "night_allocation": 2500000}}),
        ));
        assert_eq!(stats.solution, 13);
        assert_eq!(stats.night_allocation, 2.5);
    }

    #[test]
    fn night_keeps_four_decimals() {
        let stats = normalize(&parse(json!({"local": {"night_allocation": 1234567}})));
        assert_eq!(stats.night_allocation, 1.2346);
        assert_eq!(stats.solution, 0);
    }

    #[test]
    fn half_rounds_up() {
        let stats = normalize(&parse(json!({"local": {"crypto_receipts": 2.5}})));
        assert_eq!(stats.solution, 3);
    }

    #[test]
    fn missing_or_null_fields_are_zero() {
        assert_eq!(normalize(&parse(json!({}))), WalletStats::ZERO);
        assert_eq!(
            normalize(&parse(json!({"local": {"crypto_receipts": null}}))),
            WalletStats::ZERO
        );
    }
}
