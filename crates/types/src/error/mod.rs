// Path: crates/types/src/error/mod.rs
//! Core error types for the Scavenger toolkit.

use std::path::PathBuf;
use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Fatal errors caused by missing or malformed operator input.
#[derive(Error, Debug)]
pub enum InputError {
    /// A required input file does not exist.
    #[error("Input file not found: {path}\n{hint}")]
    MissingFile {
        /// The path that was probed.
        path: PathBuf,
        /// Operator guidance on how to produce the file.
        hint: String,
    },
    /// The input was readable but contained nothing to process.
    #[error("{0}")]
    Empty(String),
    /// A required field was absent on one entry.
    #[error("{item}: Missing {field}")]
    MissingField {
        /// A human-readable label for the offending entry (e.g. "Wallet 2").
        item: String,
        /// The name of the absent field.
        field: &'static str,
    },
    /// A seed phrase had an unsupported number of words.
    #[error("{item}: Invalid seed phrase length: {words} words (must be {expected})")]
    InvalidSeedLength {
        /// A human-readable label for the offending entry.
        item: String,
        /// The number of words found.
        words: usize,
        /// The accepted lengths, for display.
        expected: &'static str,
    },
    /// The donation recipient is not a mainnet payment address.
    #[error("Invalid Cardano address format: {0}")]
    InvalidRecipient(String),
    /// A file existed but could not be decoded.
    #[error("Malformed {path}: {reason}")]
    Malformed {
        /// The offending file.
        path: PathBuf,
        /// The decoder's message.
        reason: String,
    },
}

impl ErrorCode for InputError {
    fn code(&self) -> &'static str {
        match self {
            Self::MissingFile { .. } => "INPUT_MISSING_FILE",
            Self::Empty(_) => "INPUT_EMPTY",
            Self::MissingField { .. } => "INPUT_MISSING_FIELD",
            Self::InvalidSeedLength { .. } => "INPUT_INVALID_SEED_LENGTH",
            Self::InvalidRecipient(_) => "INPUT_INVALID_RECIPIENT",
            Self::Malformed { .. } => "INPUT_MALFORMED",
        }
    }
}

/// Errors raised by the tracking table and the statistics engine.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The tracking table holds no address rows.
    #[error("empty tracking table")]
    EmptyTable,
    /// The tracking file has not been produced yet.
    #[error("Tracking file not found: {0}\nRun the tracker first to generate the tracking data.")]
    Missing(PathBuf),
    /// Reading or writing a ledger file failed.
    #[error("Ledger I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ErrorCode for LedgerError {
    fn code(&self) -> &'static str {
        match self {
            Self::EmptyTable => "LEDGER_EMPTY_TABLE",
            Self::Missing(_) => "LEDGER_MISSING_FILE",
            Self::Io(_) => "LEDGER_IO",
        }
    }
}

/// Errors returned by the remote Scavenger API client.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced an HTTP response (DNS, TLS, timeout, ...).
    #[error("transport error: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The `message` field of the error body, or the raw body.
        message: String,
    },
    /// The response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// The message an operator should see: the server's own `message` when
    /// one was returned, else the transport/decode description.
    pub fn server_message(&self) -> String {
        match self {
            Self::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl ErrorCode for ApiError {
    fn code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "API_TRANSPORT",
            Self::Status { .. } => "API_STATUS",
            Self::Decode(_) => "API_DECODE",
        }
    }
}

/// Errors raised while deriving addresses or signing with a wallet.
#[derive(Error, Debug)]
pub enum WalletError {
    /// The external signer could not be started or exited abnormally.
    #[error("signer process failed: {0}")]
    Process(String),
    /// The signer answered with something other than the expected JSON.
    #[error("signer protocol error: {0}")]
    Protocol(String),
    /// The signer itself reported a failure (bad mnemonic, unknown network, ...).
    #[error("{0}")]
    Rejected(String),
    /// The public key extracted from the signer's COSE key had the wrong size.
    #[error("Invalid public key length: {0}")]
    InvalidPublicKey(usize),
}

impl ErrorCode for WalletError {
    fn code(&self) -> &'static str {
        match self {
            Self::Process(_) => "WALLET_PROCESS",
            Self::Protocol(_) => "WALLET_PROTOCOL",
            Self::Rejected(_) => "WALLET_REJECTED",
            Self::InvalidPublicKey(_) => "WALLET_INVALID_PUBLIC_KEY",
        }
    }
}
