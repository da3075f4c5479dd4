// Path: crates/cli/tests/consolidate_e2e.rs

mod common;

use anyhow::Result;
use common::{seed, test_config, FakeApi, FakeSigner, ScriptedConfirm};
use scavenger_cli::workflow::consolidate::{
    run_consolidation, ConsolidationOutcome, SignatureStore, ALREADY_ASSIGNED,
};
use scavenger_types::app::{donation_message, ConsolidationResults};
use scavenger_types::config::ScavengerConfig;
use scavenger_types::error::InputError;
use serde_json::json;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

const RECIPIENT: &str = "addr1qrecipient";

fn write_donors(dir: &Path, address_count: u32) {
    fs::write(
        dir.join("wallet-donor-input.json"),
        json!({"donors": [{"name": "Donor", "seedPhrase": seed("delta", 15), "addressCount": address_count}]})
            .to_string(),
    )
    .unwrap();
}

fn donor(index: u32) -> String {
    FakeSigner::address("delta", index)
}

fn store(config: &ScavengerConfig) -> SignatureStore {
    SignatureStore::new(config.path(&config.files.donation_signatures))
}

fn completed(outcome: ConsolidationOutcome) -> ConsolidationResults {
    match outcome {
        ConsolidationOutcome::Completed(results) => results,
        ConsolidationOutcome::Cancelled => panic!("run was cancelled"),
    }
}

/// Donor 0 succeeds, donor 1 is already assigned, donor 2 is rejected.
fn mixed_api() -> FakeApi {
    let mut api = FakeApi::new();
    api.donate_receipts
        .insert(donor(0), json!({"solutions_consolidated": 7}));
    api.donate_errors.insert(
        donor(1),
        format!("Donor {} {}", donor(1), ALREADY_ASSIGNED),
    );
    api.donate_errors
        .insert(donor(2), "Invalid signature".into());
    api
}

#[tokio::test]
async fn fresh_run_signs_then_donates() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = test_config(dir.path());
    write_donors(dir.path(), 3);

    let api = mixed_api();
    let signer = FakeSigner::default();
    let mut confirm = ScriptedConfirm::new(&[true]);
    let results = completed(run_consolidation(&config, RECIPIENT, &api, &signer, &mut confirm).await?);

    assert_eq!(results.recipient_address, RECIPIENT);
    assert_eq!(results.total_donors, 3);
    assert_eq!(results.successful_donations, 2);
    assert_eq!(results.failed_donations, 1);
    assert_eq!(results.total_solutions_consolidated, 7);
    assert_eq!(results.donors[1].solutions_consolidated, Some(0));
    assert_eq!(results.donors[2].error.as_deref(), Some("Invalid signature"));

    // One prompt, before phase 2.
    assert_eq!(confirm.asked.len(), 1);
    assert!(confirm.asked[0].contains("Ready to execute 3 donation(s)"));

    let expected_message = donation_message(RECIPIENT);
    assert!(signer
        .signed
        .lock()
        .unwrap()
        .iter()
        .all(|m| *m == expected_message));
    assert_eq!(
        api.calls_to("donate"),
        (0..3)
            .map(|i| format!("donate {} {} sig{}", RECIPIENT, donor(i), donor(i)))
            .collect::<Vec<_>>()
    );

    let file = store(&config).load()?.unwrap();
    assert!(file.donors[0].donated);
    let already = file.donors[1].api_response.as_ref().unwrap();
    assert_eq!(already["message"], "Already assigned (treated as success)");
    assert!(!file.donors[2].donated);
    assert_eq!(file.donors[2].donation_error.as_deref(), Some("Invalid signature"));

    let on_disk: ConsolidationResults = serde_json::from_str(&fs::read_to_string(
        dir.path().join("consolidation-results.json"),
    )?)?;
    assert_eq!(on_disk.successful_donations, 2);
    Ok(())
}

#[tokio::test]
async fn each_donation_is_saved_before_the_next_call() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = test_config(dir.path());
    write_donors(dir.path(), 3);

    let mut api = mixed_api();
    api.watched_file = Some(store(&config).path().to_path_buf());
    let mut confirm = ScriptedConfirm::new(&[true]);
    run_consolidation(&config, RECIPIENT, &api, &FakeSigner::default(), &mut confirm).await?;

    let snapshots = api.watched_snapshots.lock().unwrap().clone();
    assert_eq!(snapshots.len(), 3);
    // Before the first call nothing is donated yet.
    assert_eq!(snapshots[0]["donors"][0]["donated"], false);
    // Call N sees record N-1 already persisted.
    assert_eq!(snapshots[1]["donors"][0]["donated"], true);
    assert_eq!(snapshots[1]["donors"][0]["solutionsConsolidated"], 7);
    assert_eq!(snapshots[2]["donors"][1]["donated"], true);
    assert_eq!(snapshots[2]["donors"][2]["donated"], false);
    Ok(())
}

#[tokio::test]
async fn rerun_retries_only_failed_donations() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = test_config(dir.path());
    write_donors(dir.path(), 3);
    let signer = FakeSigner::default();

    let first = mixed_api();
    run_consolidation(&config, RECIPIENT, &first, &signer, &mut ScriptedConfirm::new(&[true])).await?;
    let signed_once = signer.signed.lock().unwrap().len();

    let retry = FakeApi::new();
    let mut confirm = ScriptedConfirm::new(&[true]);
    let results = completed(run_consolidation(&config, RECIPIENT, &retry, &signer, &mut confirm).await?);

    assert_eq!(retry.calls_to("donate").len(), 1);
    assert!(retry.calls_to("donate")[0].contains(&donor(2)));
    assert!(confirm.asked[0].contains("Ready to execute 1 donation(s)"));
    // Resuming never signs again.
    assert_eq!(signer.signed.lock().unwrap().len(), signed_once);

    assert_eq!(results.successful_donations, 3);
    assert_eq!(results.failed_donations, 0);
    assert_eq!(results.total_solutions_consolidated, 7);

    // Nothing is pending: no prompt and no calls.
    let idle = FakeApi::new();
    let mut confirm = ScriptedConfirm::new(&[]);
    let results = completed(run_consolidation(&config, RECIPIENT, &idle, &signer, &mut confirm).await?);
    assert!(confirm.asked.is_empty());
    assert!(idle.calls().is_empty());
    assert_eq!(results.successful_donations, 3);
    Ok(())
}

#[tokio::test]
async fn declining_a_new_recipient_keeps_the_old_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = test_config(dir.path());
    write_donors(dir.path(), 1);
    let signer = FakeSigner::default();

    run_consolidation(&config, RECIPIENT, &FakeApi::new(), &signer, &mut ScriptedConfirm::new(&[true])).await?;
    let before = fs::read_to_string(store(&config).path())?;

    let api = FakeApi::new();
    let mut confirm = ScriptedConfirm::new(&[false]);
    let outcome = run_consolidation(&config, "addr1qother", &api, &signer, &mut confirm).await?;
    assert!(matches!(outcome, ConsolidationOutcome::Cancelled));
    assert!(confirm.asked[0].contains("different recipient"));
    assert!(api.calls().is_empty());
    assert_eq!(fs::read_to_string(store(&config).path())?, before);

    // Accepting regenerates every signature for the new recipient.
    let mut confirm = ScriptedConfirm::new(&[true, true]);
    let results = completed(run_consolidation(&config, "addr1qother", &api, &signer, &mut confirm).await?);
    assert_eq!(confirm.asked.len(), 2);
    assert_eq!(results.recipient_address, "addr1qother");
    assert_eq!(store(&config).load()?.unwrap().recipient_address, "addr1qother");
    assert_eq!(api.calls_to("donate").len(), 1);
    Ok(())
}

#[tokio::test]
async fn declining_before_submission_sends_nothing() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = test_config(dir.path());
    write_donors(dir.path(), 2);

    let api = FakeApi::new();
    let mut confirm = ScriptedConfirm::new(&[false]);
    let outcome = run_consolidation(&config, RECIPIENT, &api, &FakeSigner::default(), &mut confirm).await?;

    assert!(matches!(outcome, ConsolidationOutcome::Cancelled));
    assert!(api.calls().is_empty());
    let file = store(&config).load()?.unwrap();
    assert_eq!(file.pending_indices(), vec![0, 1]);
    assert!(!dir.path().join("consolidation-results.json").exists());
    Ok(())
}

#[tokio::test]
async fn failed_derivations_are_never_sent() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = test_config(dir.path());
    write_donors(dir.path(), 3);

    let api = FakeApi::new();
    let signer = FakeSigner {
        fail_derive: HashSet::from([1]),
        ..Default::default()
    };
    let mut confirm = ScriptedConfirm::new(&[true]);
    let results = completed(run_consolidation(&config, RECIPIENT, &api, &signer, &mut confirm).await?);

    assert_eq!(api.calls_to("donate").len(), 2);
    assert_eq!(results.total_donors, 3);
    assert_eq!(results.successful_donations, 2);
    assert_eq!(results.failed_donations, 1);
    assert!(results.donors[1]
        .error
        .as_deref()
        .unwrap()
        .starts_with("Failed to derive/sign at index 1"));
    Ok(())
}

#[tokio::test]
async fn invalid_recipient_is_rejected_up_front() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = test_config(dir.path());
    write_donors(dir.path(), 1);

    let api = FakeApi::new();
    let mut confirm = ScriptedConfirm::new(&[true]);
    let err = run_consolidation(&config, "addr_test1qxyz", &api, &FakeSigner::default(), &mut confirm)
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<InputError>(),
        Some(InputError::InvalidRecipient(_))
    ));
    assert!(confirm.asked.is_empty());
    assert!(!store(&config).path().exists());
    Ok(())
}
