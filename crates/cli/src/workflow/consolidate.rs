// Path: crates/cli/src/workflow/consolidate.rs

//! Donation consolidation.
//!
//! Phase 1 derives every donor address and signs the assignment message
//! offline, persisting one record per address. Phase 2 submits the pending
//! records one by one, persisting after every call so an interrupted run
//! resumes where it stopped. A record is pending until the server accepts it;
//! records whose derivation failed in phase 1 are never sent.

use crate::prompt::Confirm;
use crate::util::{banner, prefix, success_rate, write_json_pretty, RULE};
use anyhow::{Context, Result};
use scavenger_client::{Pacer, ScavengerApi};
use scavenger_telemetry::PhaseTimer;
use scavenger_types::app::{
    donation_message, ConsolidationResults, SignatureFile, SignatureRecord, WalletEntry,
};
use scavenger_types::config::ScavengerConfig;
use scavenger_types::error::InputError;
use scavenger_wallet::{load_donor_input, WalletSigner};
use serde_json::json;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

/// Server error text meaning the donor is already assigned.
pub const ALREADY_ASSIGNED: &str = "already has an active donation assignment";

const RECIPIENT_PREFIX: &str = "addr1";
const PROGRESS_EVERY: usize = 10;

/// File-backed signature records.
#[derive(Debug, Clone)]
pub struct SignatureStore {
    path: PathBuf,
}

impl SignatureStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `None` when no signature file exists yet.
    pub fn load(&self) -> Result<Option<SignatureFile>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let file = serde_json::from_str(&text).map_err(|e| InputError::Malformed {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        Ok(Some(file))
    }

    pub fn save(&self, file: &SignatureFile) -> Result<()> {
        write_json_pretty(&self.path, file)
    }
}

/// How a consolidation run ended.
#[derive(Debug)]
pub enum ConsolidationOutcome {
    /// The operator declined a prompt. Nothing was sent.
    Cancelled,
    /// Phase 2 ran; the results were written.
    Completed(ConsolidationResults),
}

/// Tallies of one execution phase.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DonationTally {
    pub donated: usize,
    pub already_assigned: usize,
    pub failed: usize,
}

/// Rejects recipients that are not mainnet payment addresses.
pub fn validate_recipient(recipient: &str) -> Result<(), InputError> {
    if recipient.starts_with(RECIPIENT_PREFIX) {
        Ok(())
    } else {
        Err(InputError::InvalidRecipient(recipient.to_string()))
    }
}

/// Phase 1: derives and signs for every donor address, then persists the
/// signature file. Per-address failures become error records.
pub async fn generate_signatures(
    signer: &dyn WalletSigner,
    donors: &[WalletEntry],
    recipient: &str,
    store: &SignatureStore,
) -> Result<SignatureFile> {
    banner(&["Phase 1: Generating Signatures"]);
    let message = donation_message(recipient);
    let total: usize = donors.iter().map(|d| d.address_count as usize).sum();

    let mut file = SignatureFile {
        recipient_address: recipient.to_string(),
        generated_at: OffsetDateTime::now_utc(),
        donors: Vec::with_capacity(total),
    };
    let mut signed = 0usize;

    for donor in donors {
        println!("\n📍 Processing: {}", donor.name);
        println!("   Addresses to generate: {}\n", donor.address_count);

        for index in 0..donor.address_count {
            let attempt = async {
                let derived = signer.derive(&donor.seed_phrase, index).await?;
                let signature = signer
                    .sign_message(&donor.seed_phrase, index, &derived.address, &message)
                    .await?;
                Ok::<_, scavenger_types::error::WalletError>((derived.address, signature.signature))
            };
            match attempt.await {
                Ok((address, signature)) => {
                    file.donors.push(SignatureRecord {
                        wallet_name: donor.name.clone(),
                        address_index: index,
                        donor_address: Some(address),
                        message: Some(message.clone()),
                        signature: Some(signature),
                        ..Default::default()
                    });
                    signed += 1;
                    if signed % PROGRESS_EVERY == 0 || signed == total {
                        println!("   ✓ Generated {}/{} signatures", signed, total);
                    }
                }
                Err(e) => {
                    let error = format!("Failed to derive/sign at index {}: {}", index, e);
                    tracing::warn!(wallet = %donor.name, index, error = %e, "signature generation failed");
                    println!("   ✗ Error at index {}: {}", index, error);
                    file.donors.push(SignatureRecord {
                        wallet_name: donor.name.clone(),
                        address_index: index,
                        error: Some(error),
                        ..Default::default()
                    });
                }
            }
        }
    }

    store.save(&file)?;
    println!("\n✅ Signatures saved to: {}", store.path().display());
    println!("   Total signatures generated: {}/{}\n", signed, total);
    Ok(file)
}

/// Submits one record, updating it and the tally in place.
async fn execute_donation(
    api: &dyn ScavengerApi,
    recipient: &str,
    record: &mut SignatureRecord,
    tally: &mut DonationTally,
) {
    let (Some(donor), Some(signature)) = (record.donor_address.clone(), record.signature.clone())
    else {
        record.donation_error = Some("record has no address or signature".into());
        tally.failed += 1;
        return;
    };

    match api.donate_to(recipient, &donor, &signature).await {
        Ok(receipt) => {
            record.donated = true;
            record.donation_time = Some(OffsetDateTime::now_utc());
            record.solutions_consolidated = Some(receipt.solutions_consolidated);
            record.api_response = Some(receipt.raw);
            record.donation_error = None;
            tally.donated += 1;
            println!(
                "   ✅ Success! Solutions consolidated: {}",
                receipt.solutions_consolidated
            );
        }
        Err(e) => {
            let message = e.server_message();
            if message.contains(ALREADY_ASSIGNED) {
                record.donated = true;
                record.donation_time = Some(OffsetDateTime::now_utc());
                record.solutions_consolidated = Some(0);
                record.api_response = Some(json!({
                    "message": "Already assigned (treated as success)",
                    "originalError": message,
                }));
                record.donation_error = None;
                tally.already_assigned += 1;
                println!("   ℹ️  Already assigned (treated as success)");
            } else {
                tracing::warn!(donor = %donor, error = %message, "donation failed");
                println!("   ✗ Failed: {}", message);
                record.donation_error = Some(message);
                tally.failed += 1;
            }
        }
    }
}

/// Phase 2: submits every pending record, persisting after each call.
pub async fn execute_donations(
    config: &ScavengerConfig,
    api: &dyn ScavengerApi,
    file: &mut SignatureFile,
    store: &SignatureStore,
) -> Result<DonationTally> {
    banner(&["Phase 2: Executing Donations"]);
    let pending = file.pending_indices();

    println!("   Total donors: {}", file.donors.len());
    println!("   Already donated: {}", file.donated_count());
    println!("   Pending: {}", pending.len());
    println!("   Recipient: {}\n", file.recipient_address);

    let mut tally = DonationTally::default();
    if pending.is_empty() {
        println!("✅ All donations already completed!\n");
        return Ok(tally);
    }

    let recipient = file.recipient_address.clone();
    let mut pacer = Pacer::new(config.write_interval());
    for (n, &idx) in pending.iter().enumerate() {
        let Some(record) = file.donors.get_mut(idx) else {
            continue;
        };
        println!(
            "\n[{}/{}] Donating from: {}...",
            n + 1,
            pending.len(),
            prefix(record.donor_address.as_deref().unwrap_or_default(), 20)
        );

        pacer.ready().await;
        execute_donation(api, &recipient, record, &mut tally).await;
        store.save(file)?;

        if (n + 1) % PROGRESS_EVERY == 0 {
            println!(
                "\n   📊 Progress: {}/{} | Success: {} | Already Assigned: {} | Failed: {}\n",
                n + 1,
                pending.len(),
                tally.donated,
                tally.already_assigned,
                tally.failed
            );
        }
    }

    println!("\n✅ Donation phase completed:");
    println!("   New donations: {}", tally.donated);
    println!("   Already assigned: {}", tally.already_assigned);
    println!("   Failed: {}\n", tally.failed);
    Ok(tally)
}

/// Runs a consolidation towards `recipient`, resuming from an existing
/// signature file when it targets the same recipient.
pub async fn run_consolidation(
    config: &ScavengerConfig,
    recipient: &str,
    api: &dyn ScavengerApi,
    signer: &dyn WalletSigner,
    confirm: &mut dyn Confirm,
) -> Result<ConsolidationOutcome> {
    let _timer = PhaseTimer::new("donate");
    banner(&["Scavenger Mine - Allocation Consolidation"]);

    validate_recipient(recipient)?;
    println!("📍 Recipient Address: {}\n", recipient);

    let store = SignatureStore::new(config.path(&config.files.donation_signatures));
    let donor_input = config.path(&config.files.donor_input);

    let mut file = match store.load()? {
        Some(existing) if existing.recipient_address == recipient => {
            println!("✅ Found existing signature file: {}", store.path().display());
            println!("   Total donors: {}", existing.donors.len());
            println!("   Already donated: {}", existing.donated_count());
            println!("   Pending: {}\n", existing.pending_indices().len());
            existing
        }
        Some(existing) => {
            let question = format!(
                "⚠️  Existing signature file has different recipient address:\n   Existing: {}\n   New: {}\n   Regenerate signatures?",
                existing.recipient_address, recipient
            );
            if !confirm.confirm(&question)? {
                println!("\n❌ Cancelled by user.\n");
                return Ok(ConsolidationOutcome::Cancelled);
            }
            let donors = load_donor_input(&donor_input)?;
            generate_signatures(signer, &donors, recipient, &store).await?
        }
        None => {
            println!("📂 Reading input from: {}", donor_input.display());
            let donors = load_donor_input(&donor_input)?;
            println!("✅ Loaded {} donor wallet(s)\n", donors.len());
            generate_signatures(signer, &donors, recipient, &store).await?
        }
    };

    let pending = file.pending_indices().len();
    if pending > 0 {
        let question = format!(
            "\n⚠️  Ready to execute {} donation(s) to:\n   {}\n\n   Please review {} before proceeding.\n   Continue?",
            pending,
            recipient,
            store.path().display()
        );
        if !confirm.confirm(&question)? {
            println!("\n❌ Cancelled by user.\n");
            return Ok(ConsolidationOutcome::Cancelled);
        }
    }

    execute_donations(config, api, &mut file, &store).await?;

    let results = ConsolidationResults::from_signatures(&file, OffsetDateTime::now_utc());
    let out = config.path(&config.files.consolidation_results);
    write_json_pretty(&out, &results)?;
    println!("💾 Final results saved to: {}\n", out.display());

    println!("{}", RULE);
    println!("  📊 Consolidation Summary");
    println!("{}", RULE);
    println!("  Recipient Address:      {}", results.recipient_address);
    println!("  Total Donors:           {}", results.total_donors);
    println!("  ✅ Successful:          {}", results.successful_donations);
    println!("  ✗ Failed:               {}", results.failed_donations);
    println!("  Solutions Consolidated: {}", results.total_solutions_consolidated);
    println!(
        "  Success Rate:           {}%",
        success_rate(results.successful_donations, results.total_donors)
    );
    println!("{}", RULE);

    if results.failed_donations > 0 {
        println!("\n⚠️  Some donations failed. Check the consolidation results for details.");
        println!("   You can re-run the command to retry failed donations.\n");
    } else {
        println!("\n🎉 All donations completed successfully!\n");
    }
    Ok(ConsolidationOutcome::Completed(results))
}
