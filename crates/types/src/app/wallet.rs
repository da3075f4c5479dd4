// Path: crates/types/src/app/wallet.rs

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::Zeroizing;

/// Word counts a mnemonic may have when collected from a seed file.
pub const MNEMONIC_WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// Word counts the registration and donation jobs accept.
pub const ACCEPTED_SEED_WORD_COUNTS: [usize; 2] = [15, 24];

/// A BIP-39 style mnemonic.
///
/// The backing buffer is wiped on drop and the phrase never appears in
/// `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct SeedPhrase(Zeroizing<String>);

impl SeedPhrase {
    /// Wraps a phrase, trimming surrounding whitespace.
    pub fn new(phrase: impl Into<String>) -> Self {
        let phrase: String = phrase.into();
        Self(Zeroizing::new(phrase.trim().to_string()))
    }

    /// The phrase itself. Only hand this to the signer.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Number of whitespace-separated words.
    pub fn word_count(&self) -> usize {
        self.0.split_whitespace().count()
    }

    /// Whether the phrase is empty after trimming.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SeedPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SeedPhrase(<{} words>)", self.word_count())
    }
}

impl Serialize for SeedPhrase {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.expose())
    }
}

impl<'de> Deserialize<'de> for SeedPhrase {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Zeroizing::new(String::deserialize(deserializer)?);
        Ok(SeedPhrase::new(raw.as_str()))
    }
}

/// One wallet entry as written by an operator. Every field is optional here;
/// validation happens at the input boundary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWalletEntry {
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The mnemonic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_phrase: Option<SeedPhrase>,
    /// How many account indices to derive, starting at 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_count: Option<i64>,
}

/// A validated wallet entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletEntry {
    /// Display name, defaulted to `Wallet N` when absent.
    pub name: String,
    /// The mnemonic, with an accepted word count.
    pub seed_phrase: SeedPhrase,
    /// At least 1.
    pub address_count: u32,
}

impl From<&WalletEntry> for RawWalletEntry {
    fn from(entry: &WalletEntry) -> Self {
        Self {
            name: Some(entry.name.clone()),
            seed_phrase: Some(entry.seed_phrase.clone()),
            address_count: Some(i64::from(entry.address_count)),
        }
    }
}

/// `wallet-input.json`. Either the list form or the legacy single-wallet form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletInputFile {
    /// The list form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallets: Option<Vec<RawWalletEntry>>,
    /// Legacy single-wallet form: the mnemonic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_phrase: Option<SeedPhrase>,
    /// Legacy single-wallet form: the address count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_count: Option<i64>,
}

/// `wallet-donor-input.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorInputFile {
    /// Donor wallets.
    #[serde(default)]
    pub donors: Vec<RawWalletEntry>,
}

/// An address derived from a seed phrase at one account index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedAddress {
    /// Bech32 payment address.
    pub address: String,
    /// 32-byte Ed25519 public key, hex encoded.
    pub public_key_hex: String,
}

/// A CIP-8 style message signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSignature {
    /// Hex-encoded COSE_Sign1 structure.
    pub signature: String,
    /// Hex-encoded COSE_Key structure.
    pub key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_phrase_is_redacted_and_trimmed() {
        let seed = SeedPhrase::new("  alpha beta gamma \n");
        assert_eq!(seed.expose(), "alpha beta gamma");
        assert_eq!(seed.word_count(), 3);
        assert_eq!(format!("{:?}", seed), "SeedPhrase(<3 words>)");
    }

    #[test]
    fn wallet_input_accepts_both_forms() {
        let list: WalletInputFile = serde_json::from_str(
            r#"{"wallets":[{"name":"A","seedPhrase":"x y","addressCount":3}]}"#,
        )
        .unwrap();
        let wallets = list.wallets.unwrap();
        assert_eq!(wallets.len(), 1);
        assert_eq!(wallets[0].address_count, Some(3));

        let single: WalletInputFile =
            serde_json::from_str(r#"{"seedPhrase":"x y","addressCount":40}"#).unwrap();
        assert!(single.wallets.is_none());
        assert_eq!(single.address_count, Some(40));
    }
}
