// Path: crates/cli/src/workflow/convert.rs

use crate::util::{banner, write_json_pretty, RULE};
use anyhow::Result;
use scavenger_types::app::{RawWalletEntry, WalletEntry, WalletInputFile};
use scavenger_types::config::ScavengerConfig;
use scavenger_types::error::InputError;
use scavenger_wallet::parse_seed_file;

/// Converts the seed notes into the registration input file.
pub fn run_convert(config: &ScavengerConfig) -> Result<Vec<WalletEntry>> {
    banner(&["Seed to Wallet Converter"]);

    let input = config.path(&config.files.seed_text);
    println!("📂 Reading input from: {}", input.display());
    let content = std::fs::read_to_string(&input).map_err(|_| InputError::MissingFile {
        path: input.clone(),
        hint: "Please create a seed.txt file in the data directory.".into(),
    })?;

    let parsed = parse_seed_file(&content);
    for skipped in &parsed.skipped {
        println!(
            "⚠️  Warning: Skipping \"{}\" - Invalid word count: {} (expected 12, 15, 18, 21, or 24)",
            skipped.name, skipped.words
        );
    }
    if parsed.wallets.is_empty() {
        return Err(InputError::Empty(format!(
            "No valid seed phrases found in {}",
            input.display()
        ))
        .into());
    }

    println!("✅ Found {} seed phrase(s):\n", parsed.wallets.len());
    for (i, wallet) in parsed.wallets.iter().enumerate() {
        println!("   {}. {}", i + 1, wallet.name);
        println!(
            "      Words: {} | Address Count: {}",
            wallet.seed_phrase.word_count(),
            wallet.address_count
        );
    }
    println!();

    let out = config.path(&config.files.wallet_input);
    println!("💾 Saving to: {}", out.display());
    let file = WalletInputFile {
        wallets: Some(parsed.wallets.iter().map(RawWalletEntry::from).collect()),
        ..Default::default()
    };
    write_json_pretty(&out, &file)?;
    println!("✅ Conversion complete!\n");

    println!("{}", RULE);
    println!("  Next Steps:");
    println!("{}", RULE);
    println!("  1. Review {} to verify the conversion", out.display());
    println!("  2. Run: scavenger register");
    println!("  3. DELETE both seed.txt and the wallet input after use!");
    println!("{}\n", RULE);
    Ok(parsed.wallets)
}
