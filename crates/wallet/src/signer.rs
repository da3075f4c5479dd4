// Path: crates/wallet/src/signer.rs

//! Wallet operations behind a port.
//!
//! [`CommandSigner`] runs the configured program once per request. The
//! request is a single JSON object on stdin:
//!
//! ```json
//! {"op": "derive", "seedPhrase": "...", "accountIndex": 0, "network": "Mainnet"}
//! {"op": "signMessage", "seedPhrase": "...", "accountIndex": 0, "network": "Mainnet",
//!  "address": "addr1...", "payloadHex": "48656c6c6f"}
//! ```
//!
//! and the program answers with one JSON object on stdout: `{"address", "key"}`
//! for `derive`, `{"signature", "key"}` for `signMessage`, or `{"error"}`.

use async_trait::async_trait;
use scavenger_types::app::{DerivedAddress, MessageSignature, SeedPhrase};
use scavenger_types::config::SignerConfig;
use scavenger_types::error::WalletError;
use serde::{Deserialize, Serialize};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use zeroize::Zeroizing;

/// Hex length of an Ed25519 public key.
const PUBLIC_KEY_HEX_LEN: usize = 64;

/// Derives addresses and signs CIP-8 messages for a seed phrase.
#[async_trait]
pub trait WalletSigner: Send + Sync {
    /// The payment address and public key at `index`.
    async fn derive(&self, seed: &SeedPhrase, index: u32) -> Result<DerivedAddress, WalletError>;

    /// Signs the UTF-8 `message` with the key at `index`.
    async fn sign_message(
        &self,
        seed: &SeedPhrase,
        index: u32,
        address: &str,
        message: &str,
    ) -> Result<MessageSignature, WalletError>;
}

/// The raw Ed25519 public key is the trailing 32 bytes of the COSE_Key.
pub fn public_key_from_cose_key(key_hex: &str) -> Result<String, WalletError> {
    let start = key_hex.len().saturating_sub(PUBLIC_KEY_HEX_LEN);
    let tail = key_hex
        .get(start..)
        .ok_or_else(|| WalletError::Protocol("COSE key is not ASCII hex".into()))?;
    if tail.len() != PUBLIC_KEY_HEX_LEN {
        return Err(WalletError::InvalidPublicKey(tail.len()));
    }
    Ok(tail.to_string())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignerRequest<'a> {
    op: &'static str,
    seed_phrase: &'a str,
    account_index: u32,
    network: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload_hex: Option<String>,
}

#[derive(Deserialize)]
struct SignerResponse {
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    signature: Option<String>,
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// [`WalletSigner`] backed by an external program.
#[derive(Debug, Clone)]
pub struct CommandSigner {
    config: SignerConfig,
}

impl CommandSigner {
    pub fn new(config: SignerConfig) -> Self {
        Self { config }
    }

    async fn request(&self, request: &SignerRequest<'_>) -> Result<SignerResponse, WalletError> {
        // The body holds the mnemonic; wipe it once written.
        let body = Zeroizing::new(
            serde_json::to_vec(request).map_err(|e| WalletError::Protocol(e.to_string()))?,
        );

        let mut child = Command::new(&self.config.command)
            .args(&self.config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                WalletError::Process(format!("failed to start `{}`: {}", self.config.command, e))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| WalletError::Process("failed to open signer stdin".into()))?;
        stdin
            .write_all(&body)
            .await
            .map_err(|e| WalletError::Process(e.to_string()))?;
        stdin
            .write_all(b"\n")
            .await
            .map_err(|e| WalletError::Process(e.to_string()))?;
        drop(stdin);

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| WalletError::Process(e.to_string()))?;

        let response: Option<SignerResponse> = std::str::from_utf8(&output.stdout)
            .ok()
            .and_then(|s| s.lines().rev().find(|l| !l.trim().is_empty()))
            .and_then(|line| serde_json::from_str(line).ok());

        match response {
            Some(SignerResponse {
                error: Some(message),
                ..
            }) => Err(WalletError::Rejected(message)),
            Some(response) if output.status.success() => Ok(response),
            _ if !output.status.success() => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(WalletError::Process(format!(
                    "`{}` exited with {}: {}",
                    self.config.command,
                    output.status,
                    stderr.trim()
                )))
            }
            _ => Err(WalletError::Protocol(
                "signer produced no JSON response on stdout".into(),
            )),
        }
    }
}

#[async_trait]
impl WalletSigner for CommandSigner {
    async fn derive(&self, seed: &SeedPhrase, index: u32) -> Result<DerivedAddress, WalletError> {
        let response = self
            .request(&SignerRequest {
                op: "derive",
                seed_phrase: seed.expose(),
                account_index: index,
                network: &self.config.network,
                address: None,
                payload_hex: None,
            })
            .await?;
        let address = response
            .address
            .filter(|a| !a.is_empty())
            .ok_or_else(|| WalletError::Protocol("derive response has no address".into()))?;
        let key = response
            .key
            .ok_or_else(|| WalletError::Protocol("derive response has no key".into()))?;
        Ok(DerivedAddress {
            address,
            public_key_hex: public_key_from_cose_key(&key)?,
        })
    }

    async fn sign_message(
        &self,
        seed: &SeedPhrase,
        index: u32,
        address: &str,
        message: &str,
    ) -> Result<MessageSignature, WalletError> {
        let response = self
            .request(&SignerRequest {
                op: "signMessage",
                seed_phrase: seed.expose(),
                account_index: index,
                network: &self.config.network,
                address: Some(address),
                payload_hex: Some(hex::encode(message.as_bytes())),
            })
            .await?;
        match (response.signature, response.key) {
            (Some(signature), Some(key)) => Ok(MessageSignature { signature, key }),
            _ => Err(WalletError::Protocol(
                "signMessage response needs both signature and key".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_TAIL: &str = "3b6a27bcceb6a42d62a3a8d02a6f0d73653215771de243a63ac048a18b59da29";

    #[test]
    fn public_key_is_the_cose_key_tail() {
        let cose = format!("a4010103272006215820{}", KEY_TAIL);
        assert_eq!(public_key_from_cose_key(&cose).unwrap(), KEY_TAIL);
        assert!(matches!(
            public_key_from_cose_key("abcd"),
            Err(WalletError::InvalidPublicKey(4))
        ));
    }

    #[test]
    fn request_carries_hex_payload() {
        let req = SignerRequest {
            op: "signMessage",
            seed_phrase: "a b c",
            account_index: 3,
            network: "Mainnet",
            address: Some("addr1x"),
            payload_hex: Some(hex::encode("test")),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["payloadHex"], "74657374");
        assert_eq!(json["accountIndex"], 3);
        assert_eq!(json["seedPhrase"], "a b c");

        let derive = SignerRequest {
            op: "derive",
            address: None,
            payload_hex: None,
            ..req
        };
        let json = serde_json::to_value(&derive).unwrap();
        assert!(json.get("address").is_none());
    }

    fn shell_signer(script: &str) -> CommandSigner {
        CommandSigner::new(SignerConfig {
            command: "sh".into(),
            args: vec!["-c".into(), script.into()],
            network: "Mainnet".into(),
        })
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn derive_through_a_process() {
        let script = format!(
            r#"cat >/dev/null; echo '{{"address":"addr1qtest","key":"a401{}"}}'"#,
            KEY_TAIL
        );
        let derived = shell_signer(&script)
            .derive(&SeedPhrase::new("a b c"), 0)
            .await
            .unwrap();
        assert_eq!(derived.address, "addr1qtest");
        assert_eq!(derived.public_key_hex, KEY_TAIL);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn signer_errors_are_surfaced() {
        let rejected = shell_signer(r#"cat >/dev/null; echo '{"error":"invalid mnemonic"}'"#)
            .sign_message(&SeedPhrase::new("a b c"), 0, "addr1q", "hello")
            .await
            .unwrap_err();
        assert_eq!(rejected.to_string(), "invalid mnemonic");

        let crashed = shell_signer("cat >/dev/null; echo boom >&2; exit 3")
            .derive(&SeedPhrase::new("a b c"), 0)
            .await
            .unwrap_err();
        assert!(matches!(crashed, WalletError::Process(ref m) if m.contains("boom")));
    }
}
