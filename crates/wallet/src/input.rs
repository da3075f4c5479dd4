// Path: crates/wallet/src/input.rs

use scavenger_types::app::{
    DonorInputFile, RawWalletEntry, WalletEntry, WalletInputFile, ACCEPTED_SEED_WORD_COUNTS,
};
use scavenger_types::error::InputError;
use serde::de::DeserializeOwned;
use std::path::Path;

const SINGLE_WALLET_NAME: &str = "Single Wallet";
const ACCEPTED_LENGTHS: &str = "15 or 24";

fn read_json<T: DeserializeOwned>(path: &Path, hint: &str) -> Result<T, InputError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            InputError::MissingFile {
                path: path.to_path_buf(),
                hint: hint.to_string(),
            }
        } else {
            InputError::Malformed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        }
    })?;
    serde_json::from_str(&content).map_err(|e| InputError::Malformed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Checks one entry. `label` names it in errors (`Wallet 2`, `Donor 1`).
fn validate_entry(
    raw: &RawWalletEntry,
    position: usize,
    label: &str,
) -> Result<WalletEntry, InputError> {
    let item = format!("{} {}", label, position + 1);
    let seed_phrase = raw
        .seed_phrase
        .clone()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| InputError::MissingField {
            item: item.clone(),
            field: "seedPhrase",
        })?;
    let address_count = raw
        .address_count
        .filter(|n| *n >= 1)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| InputError::MissingField {
            item: item.clone(),
            field: "addressCount",
        })?;

    let words = seed_phrase.word_count();
    if !ACCEPTED_SEED_WORD_COUNTS.contains(&words) {
        let item = match &raw.name {
            Some(name) => format!("{} ({})", item, name),
            None => item,
        };
        return Err(InputError::InvalidSeedLength {
            item,
            words,
            expected: ACCEPTED_LENGTHS,
        });
    }

    Ok(WalletEntry {
        name: raw
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| format!("Wallet {}", position + 1)),
        seed_phrase,
        address_count,
    })
}

/// Validates a decoded `wallet-input.json`.
///
/// The list form wins when present. Otherwise the legacy single-wallet form
/// (top-level `seedPhrase` and `addressCount`) becomes one wallet named
/// `Single Wallet`.
pub fn wallets_from_input(
    input: WalletInputFile,
    path: &Path,
) -> Result<Vec<WalletEntry>, InputError> {
    let raw = match input {
        WalletInputFile {
            wallets: Some(list),
            ..
        } => list,
        WalletInputFile {
            seed_phrase: Some(seed_phrase),
            address_count: Some(address_count),
            ..
        } => vec![RawWalletEntry {
            name: Some(SINGLE_WALLET_NAME.to_string()),
            seed_phrase: Some(seed_phrase),
            address_count: Some(address_count),
        }],
        _ => {
            return Err(InputError::Malformed {
                path: path.to_path_buf(),
                reason: r#"expected {"wallets": [{"name": "...", "seedPhrase": "...", "addressCount": 40}]}"#
                    .to_string(),
            })
        }
    };
    if raw.is_empty() {
        return Err(InputError::Empty("No wallets found in input file".to_string()));
    }
    raw.iter()
        .enumerate()
        .map(|(i, entry)| validate_entry(entry, i, "Wallet"))
        .collect()
}

/// Reads and validates the registration input.
pub fn load_wallet_input(path: &Path) -> Result<Vec<WalletEntry>, InputError> {
    let input: WalletInputFile = read_json(
        path,
        "Create it with `scavenger convert` or write it by hand: {\"wallets\": [{\"name\", \"seedPhrase\", \"addressCount\"}]}",
    )?;
    wallets_from_input(input, path)
}

/// Validates a decoded donor input file.
pub fn donors_from_input(input: DonorInputFile) -> Result<Vec<WalletEntry>, InputError> {
    if input.donors.is_empty() {
        return Err(InputError::Empty("No donors found in input file".to_string()));
    }
    input
        .donors
        .iter()
        .enumerate()
        .map(|(i, entry)| validate_entry(entry, i, "Donor"))
        .collect()
}

/// Reads and validates the donor input.
pub fn load_donor_input(path: &Path) -> Result<Vec<WalletEntry>, InputError> {
    let input: DonorInputFile = read_json(
        path,
        "Create it with the donor wallets: {\"donors\": [{\"name\", \"seedPhrase\", \"addressCount\"}]}",
    )?;
    donors_from_input(input)
}
