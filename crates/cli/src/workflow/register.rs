// Path: crates/cli/src/workflow/register.rs

use crate::util::{banner, prefix, success_rate, write_json_pretty, RULE};
use anyhow::Result;
use scavenger_client::{Pacer, ScavengerApi};
use scavenger_telemetry::PhaseTimer;
use scavenger_types::app::{AddressRecord, RegistrationResults, WalletEntry, WalletRegistration};
use scavenger_types::config::ScavengerConfig;
use scavenger_wallet::{load_wallet_input, WalletSigner};
use time::OffsetDateTime;

/// Server error text meaning the address is registered already.
pub const ALREADY_REGISTERED: &str = "already registered";

const PROGRESS_EVERY: usize = 10;

/// Derives every address of `wallet` in index order. Failures are recorded on
/// the address and never abort the wallet.
pub async fn derive_addresses(signer: &dyn WalletSigner, wallet: &WalletEntry) -> Vec<AddressRecord> {
    let total = wallet.address_count as usize;
    let mut addresses = Vec::with_capacity(total);
    for index in 0..wallet.address_count {
        let record = match signer.derive(&wallet.seed_phrase, index).await {
            Ok(derived) => AddressRecord {
                index,
                bech32: derived.address,
                public_key_hex: derived.public_key_hex,
                ..Default::default()
            },
            Err(e) => {
                tracing::warn!(wallet = %wallet.name, index, error = %e, "address derivation failed");
                AddressRecord::derivation_failed(index, e.to_string())
            }
        };
        addresses.push(record);
        if addresses.len() % PROGRESS_EVERY == 0 {
            println!("   ✓ Derived {}/{} addresses", addresses.len(), total);
        }
    }
    addresses
}

/// Fetches the terms, signs them with the address's key and registers.
async fn register_address(
    api: &dyn ScavengerApi,
    signer: &dyn WalletSigner,
    wallet: &WalletEntry,
    addr: &AddressRecord,
) -> Result<(), String> {
    let terms = api.terms_message().await.map_err(|e| e.server_message())?;
    let signed = signer
        .sign_message(&wallet.seed_phrase, addr.index, &addr.bech32, &terms)
        .await
        .map_err(|e| e.to_string())?;
    api.register(&addr.bech32, &signed.signature, &addr.public_key_hex)
        .await
        .map_err(|e| e.server_message())?;
    Ok(())
}

/// Derives and registers every address of one wallet.
pub async fn process_wallet(
    config: &ScavengerConfig,
    api: &dyn ScavengerApi,
    signer: &dyn WalletSigner,
    wallet: &WalletEntry,
) -> WalletRegistration {
    println!("\n{}", RULE);
    println!("Processing: {}", wallet.name);
    println!("Seed phrase: {} words", wallet.seed_phrase.word_count());
    println!("Address count: {}", wallet.address_count);
    println!("{}\n", RULE);

    println!("📍 Deriving {} addresses...", wallet.address_count);
    let mut addresses = derive_addresses(signer, wallet).await;
    println!("✅ Derived all {} addresses\n", addresses.len());

    println!("🚀 Registering {} addresses...", addresses.len());
    let total = addresses.len();
    let mut pacer = Pacer::new(config.write_interval());
    let (mut ok, mut failed) = (0usize, 0usize);
    let mut already = 0usize;
    for (i, addr) in addresses.iter_mut().enumerate() {
        if !addr.is_registrable() {
            failed += 1;
            println!(
                "   ✗ [{}/{}] Failed: {}",
                i + 1,
                total,
                addr.error.as_deref().unwrap_or("Unknown error")
            );
            continue;
        }

        pacer.ready().await;
        match register_address(api, signer, wallet, addr).await {
            Ok(()) => {
                addr.registered = true;
                addr.registration_time = Some(OffsetDateTime::now_utc());
                ok += 1;
                println!(
                    "   ✅ [{}/{}] Registered: {}...",
                    i + 1,
                    total,
                    prefix(&addr.bech32, 20)
                );
            }
            Err(message) if message.to_ascii_lowercase().contains(ALREADY_REGISTERED) => {
                addr.registered = true;
                addr.registration_time = Some(OffsetDateTime::now_utc());
                addr.note = Some(format!("Already registered (treated as success): {}", message));
                ok += 1;
                already += 1;
                println!(
                    "   ℹ️  [{}/{}] Already registered: {}...",
                    i + 1,
                    total,
                    prefix(&addr.bech32, 20)
                );
            }
            Err(message) => {
                tracing::warn!(address = %addr.bech32, error = %message, "registration failed");
                failed += 1;
                println!("   ✗ [{}/{}] Failed: {}", i + 1, total, message);
                addr.error = Some(message);
            }
        }

        if (i + 1) % PROGRESS_EVERY == 0 {
            println!(
                "\n   📊 Progress: {}/{} | Success: {} | Failed: {}\n",
                i + 1,
                total,
                ok,
                failed
            );
        }
    }

    println!(
        "\n✅ [{}] Completed: {}/{} successful ({} already registered)\n",
        wallet.name, ok, total, already
    );
    WalletRegistration {
        wallet_name: wallet.name.clone(),
        seed_phrase_words: wallet.seed_phrase.word_count(),
        total_addresses: total,
        successful_registrations: ok,
        failed_registrations: failed,
        addresses,
        completed_at: OffsetDateTime::now_utc(),
    }
}

/// Registers every wallet of the wallet input file and writes the results.
/// Per-address failures are reported in the returned totals, not as errors.
pub async fn run_registration(
    config: &ScavengerConfig,
    api: &dyn ScavengerApi,
    signer: &dyn WalletSigner,
) -> Result<RegistrationResults> {
    let _timer = PhaseTimer::new("register");
    banner(&["Midnight Address Registration"]);

    let input = config.path(&config.files.wallet_input);
    println!("📂 Reading input from: {}", input.display());
    let wallets = load_wallet_input(&input)?;

    println!("✅ Loaded configuration:");
    println!("   Total wallets: {}", wallets.len());
    for (i, w) in wallets.iter().enumerate() {
        println!(
            "   {}. {}: {} words, {} addresses",
            i + 1,
            w.name,
            w.seed_phrase.word_count(),
            w.address_count
        );
    }
    println!();

    let total_addresses: usize = wallets.iter().map(|w| w.address_count as usize).sum();
    let per_address = config.write_interval().as_secs_f64();
    println!(
        "⏱️  Estimated time: ~{} minutes ({} addresses × {}s each)\n",
        (total_addresses as f64 * per_address / 60.0).ceil(),
        total_addresses,
        per_address
    );

    let mut results = Vec::with_capacity(wallets.len());
    for wallet in &wallets {
        results.push(process_wallet(config, api, signer, wallet).await);
    }

    let final_result = RegistrationResults {
        total_wallets: wallets.len(),
        total_addresses,
        total_successful_registrations: results.iter().map(|r| r.successful_registrations).sum(),
        total_failed_registrations: results.iter().map(|r| r.failed_registrations).sum(),
        wallets: results,
        completed_at: OffsetDateTime::now_utc(),
    };

    let out = config.path(&config.files.registration_results);
    println!("💾 Saving results to: {}", out.display());
    write_json_pretty(&out, &final_result)?;
    println!("✅ Results saved successfully\n");

    print_summary(&final_result);
    Ok(final_result)
}

fn print_summary(results: &RegistrationResults) {
    println!("{}", RULE);
    println!("  📊 Registration Summary");
    println!("{}", RULE);
    println!("  Total wallets:          {}", results.total_wallets);
    println!("  Total addresses:        {}", results.total_addresses);
    println!("  ✅ Successful:          {}", results.total_successful_registrations);
    println!("  ✗ Failed:               {}", results.total_failed_registrations);
    println!(
        "  Success rate:           {}%",
        success_rate(results.total_successful_registrations, results.total_addresses)
    );
    println!("{}", RULE);

    if results.wallets.len() > 1 {
        println!("\n📋 Per-Wallet Breakdown:\n");
        for (i, w) in results.wallets.iter().enumerate() {
            println!("  {}. {}", i + 1, w.wallet_name);
            println!(
                "     Addresses: {} | Success: {} | Failed: {}",
                w.total_addresses, w.successful_registrations, w.failed_registrations
            );
            println!(
                "     Success rate: {}%",
                success_rate(w.successful_registrations, w.total_addresses)
            );
            println!();
        }
        println!("{}", RULE);
    }

    if results.total_failed_registrations > 0 {
        println!("⚠️  Some registrations failed. Check the registration results for details.\n");
    } else {
        println!("🎉 All addresses registered successfully!\n");
    }
}
