// Path: crates/cli/src/util.rs

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

pub const RULE: &str = "═══════════════════════════════════════════════════════════════";

/// `first20...last3` for progress lines.
pub fn shorten_address(addr: &str) -> String {
    let chars: Vec<char> = addr.chars().collect();
    if chars.len() <= 24 {
        return addr.to_string();
    }
    let head: String = chars.iter().take(20).collect();
    let tail: String = chars.iter().skip(chars.len() - 3).collect();
    format!("{}...{}", head, tail)
}

/// The first `n` characters of `s`.
pub fn prefix(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

/// Percentage with one decimal; an empty total reads as `0.0`.
pub fn success_rate(ok: usize, total: usize) -> String {
    if total == 0 {
        return "0.0".to_string();
    }
    format!("{:.1}", ok as f64 / total as f64 * 100.0)
}

pub fn banner(lines: &[&str]) {
    println!("\n{}", RULE);
    for line in lines {
        println!("  {}", line);
    }
    println!("{}\n", RULE);
}

/// Writes `value` as two-space indented JSON, creating parent directories.
pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

/// Display name of a path for summaries.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
