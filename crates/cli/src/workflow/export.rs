// Path: crates/cli/src/workflow/export.rs

use anyhow::{Context, Result};
use scavenger_ledger::addresses::write_address_list;
use scavenger_types::app::RegistrationResults;
use scavenger_types::config::ScavengerConfig;
use scavenger_types::error::InputError;

/// Writes every registered address from the registration results to the
/// tracked address list. Returns how many were written.
pub fn run_export(config: &ScavengerConfig) -> Result<usize> {
    let input = config.path(&config.files.registration_results);
    println!("\n📂 Reading {}...", input.display());

    let text = std::fs::read_to_string(&input).map_err(|_| InputError::MissingFile {
        path: input.clone(),
        hint: "Please run registration first.".into(),
    })?;
    let results: RegistrationResults =
        serde_json::from_str(&text).map_err(|e| InputError::Malformed {
            path: input.clone(),
            reason: e.to_string(),
        })?;

    let addresses = results.registered_addresses();
    if addresses.is_empty() {
        return Err(InputError::Empty("No successfully registered addresses found".into()).into());
    }

    let out = config.path(&config.files.wallets);
    write_address_list(&out, &addresses)
        .with_context(|| format!("Failed to write {}", out.display()))?;
    println!(
        "✅ Exported {} addresses to {}\n",
        addresses.len(),
        out.display()
    );
    Ok(addresses.len())
}
