// Path: crates/ledger/src/addresses.rs

use scavenger_types::error::InputError;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Parses a newline-separated address list. Blank lines are ignored and
/// repeated addresses are kept once, at their first position.
pub fn parse_address_list(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if seen.insert(line) {
            out.push(line.to_string());
        } else {
            tracing::warn!(address = line, "Duplicate address in wallet list ignored");
        }
    }
    out
}

/// Reads the address list a tracking run polls. Missing or empty is fatal.
pub fn load_address_list(path: &Path) -> Result<Vec<String>, InputError> {
    let content = fs::read_to_string(path).map_err(|_| InputError::MissingFile {
        path: path.to_path_buf(),
        hint: "Export registered addresses first, or create the file with one address per line."
            .into(),
    })?;
    let wallets = parse_address_list(&content);
    if wallets.is_empty() {
        return Err(InputError::Empty(format!(
            "No wallets found in {}",
            path.display()
        )));
    }
    Ok(wallets)
}

/// Writes one address per line, with a trailing newline.
pub fn write_address_list(path: &Path, addresses: &[String]) -> std::io::Result<()> {
    let mut content = addresses.join("\n");
    content.push('\n');
    fs::write(path, content)
}
