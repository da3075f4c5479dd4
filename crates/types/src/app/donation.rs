// Path: crates/types/src/app/donation.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

/// Message a donor signs to hand its accumulated rights to `recipient`.
pub fn donation_message(recipient: &str) -> String {
    format!("Assign accumulated Scavenger rights to: {}", recipient)
}

/// A donor address and its signed consent, mutated in place as donation
/// proceeds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureRecord {
    /// Name of the donor wallet the address belongs to.
    pub wallet_name: String,
    /// Account index within that wallet.
    pub address_index: u32,
    /// Derived donor address; absent when derivation failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donor_address: Option<String>,
    /// The signed consent message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Hex COSE_Sign1 over `message`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// Set exactly once, when the server accepted (or already had) the donation.
    #[serde(default)]
    pub donated: bool,
    /// When `donated` was set.
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub donation_time: Option<OffsetDateTime>,
    /// Solutions moved to the recipient by this donation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solutions_consolidated: Option<u64>,
    /// Raw server response of the accepted call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_response: Option<Value>,
    /// Phase 1 failure. Records carrying one are never sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Last phase 2 failure. Cleared on success; the record stays pending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donation_error: Option<String>,
}

impl SignatureRecord {
    /// A record that still needs a donation call.
    pub fn is_pending(&self) -> bool {
        !self.donated && self.error.is_none() && self.donor_address.is_some()
    }

    /// A record that ended in failure, in either phase.
    pub fn is_failed(&self) -> bool {
        !self.donated && (self.error.is_some() || self.donation_error.is_some())
    }
}

/// `donation-signatures.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureFile {
    /// The address every record assigns its rights to.
    pub recipient_address: String,
    /// When phase 1 ran.
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
    /// One record per donor address.
    #[serde(default)]
    pub donors: Vec<SignatureRecord>,
}

impl SignatureFile {
    /// Indices of records that still need a donation call.
    pub fn pending_indices(&self) -> Vec<usize> {
        self.donors
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_pending())
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of records already donated.
    pub fn donated_count(&self) -> usize {
        self.donors.iter().filter(|d| d.donated).count()
    }
}

/// Per-record line of the consolidation results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationOutcome {
    /// Donor wallet name.
    pub wallet_name: String,
    /// Account index.
    pub address_index: u32,
    /// Donor address, when derived.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donor_address: Option<String>,
    /// Final donation flag.
    pub donated: bool,
    /// When the donation was accepted.
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub donation_time: Option<OffsetDateTime>,
    /// Solutions moved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solutions_consolidated: Option<u64>,
    /// Failure from either phase.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&SignatureRecord> for DonationOutcome {
    fn from(r: &SignatureRecord) -> Self {
        Self {
            wallet_name: r.wallet_name.clone(),
            address_index: r.address_index,
            donor_address: r.donor_address.clone(),
            donated: r.donated,
            donation_time: r.donation_time,
            solutions_consolidated: r.solutions_consolidated,
            error: r.error.clone().or_else(|| r.donation_error.clone()),
        }
    }
}

/// `consolidation-results.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidationResults {
    /// The recipient address.
    pub recipient_address: String,
    /// Number of donor records.
    pub total_donors: usize,
    /// Records with `donated = true`.
    pub successful_donations: usize,
    /// Records that failed in either phase.
    pub failed_donations: usize,
    /// Sum of `solutionsConsolidated`.
    pub total_solutions_consolidated: u64,
    /// When the results were written.
    #[serde(with = "time::serde::rfc3339")]
    pub completed_at: OffsetDateTime,
    /// Per-record outcomes.
    pub donors: Vec<DonationOutcome>,
}

impl ConsolidationResults {
    /// Summarizes a signature file at `completed_at`.
    pub fn from_signatures(file: &SignatureFile, completed_at: OffsetDateTime) -> Self {
        Self {
            recipient_address: file.recipient_address.clone(),
            total_donors: file.donors.len(),
            successful_donations: file.donated_count(),
            failed_donations: file.donors.iter().filter(|d| d.is_failed()).count(),
            total_solutions_consolidated: file
                .donors
                .iter()
                .filter_map(|d| d.solutions_consolidated)
                .sum(),
            completed_at,
            donors: file.donors.iter().map(DonationOutcome::from).collect(),
        }
    }
}
