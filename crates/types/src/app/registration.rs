// Path: crates/types/src/app/registration.rs

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One derived address and its registration outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressRecord {
    /// Account index the address was derived at.
    pub index: u32,
    /// Bech32 address; empty when derivation failed.
    #[serde(default)]
    pub bech32: String,
    /// Hex public key; empty when derivation failed.
    #[serde(default)]
    pub public_key_hex: String,
    /// Whether the remote service accepted the registration.
    #[serde(default)]
    pub registered: bool,
    /// When the registration was accepted.
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub registration_time: Option<OffsetDateTime>,
    /// Derivation or registration failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Why a server error was accepted as a registration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl AddressRecord {
    /// A record whose derivation failed; it is never sent to the server.
    pub fn derivation_failed(index: u32, error: impl Into<String>) -> Self {
        Self {
            index,
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// Whether this record can be registered.
    pub fn is_registrable(&self) -> bool {
        self.error.is_none() && !self.bech32.is_empty()
    }
}

/// Registration outcome for one wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletRegistration {
    /// Display name of the wallet.
    pub wallet_name: String,
    /// Number of words in the wallet's seed phrase.
    pub seed_phrase_words: usize,
    /// Number of derived addresses.
    pub total_addresses: usize,
    /// Addresses the server accepted.
    pub successful_registrations: usize,
    /// Addresses that failed derivation or registration.
    pub failed_registrations: usize,
    /// Per-address records in index order.
    #[serde(default)]
    pub addresses: Vec<AddressRecord>,
    /// When the wallet finished processing.
    #[serde(with = "time::serde::rfc3339")]
    pub completed_at: OffsetDateTime,
}

/// `registration-results.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResults {
    /// Number of wallets processed.
    pub total_wallets: usize,
    /// Number of addresses across all wallets.
    pub total_addresses: usize,
    /// Accepted registrations across all wallets.
    pub total_successful_registrations: usize,
    /// Failed registrations across all wallets.
    pub total_failed_registrations: usize,
    /// Per-wallet outcomes.
    #[serde(default)]
    pub wallets: Vec<WalletRegistration>,
    /// When the run finished.
    #[serde(with = "time::serde::rfc3339")]
    pub completed_at: OffsetDateTime,
}

impl RegistrationResults {
    /// Every address the server accepted, in wallet then index order.
    pub fn registered_addresses(&self) -> Vec<String> {
        self.wallets
            .iter()
            .flat_map(|w| w.addresses.iter())
            .filter(|a| a.registered && !a.bech32.is_empty())
            .map(|a| a.bech32.clone())
            .collect()
    }
}
