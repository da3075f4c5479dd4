// Path: crates/wallet/src/seed_file.rs

use scavenger_types::app::{SeedPhrase, WalletEntry, MNEMONIC_WORD_COUNTS};

/// Addresses derived per wallet when the seed file does not say otherwise.
pub const DEFAULT_ADDRESS_COUNT: u32 = 10;

/// Shortest run of `=` that separates two sections.
const SEPARATOR_MIN_RUN: usize = 5;

const PLACEHOLDER_WORD: &str = "seed_x";

/// A section whose collected words did not form a mnemonic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSection {
    pub name: String,
    pub words: usize,
}

#[derive(Debug, Default)]
pub struct SeedFileParse {
    pub wallets: Vec<WalletEntry>,
    pub skipped: Vec<SkippedSection>,
}

/// Splits on every run of at least [`SEPARATOR_MIN_RUN`] `=` characters.
/// Shorter runs stay part of the text.
fn split_sections(content: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut start = 0;
    let mut run_start: Option<usize> = None;

    let mut close_run = |run_from: usize, run_to: usize, start: &mut usize| {
        if run_to - run_from >= SEPARATOR_MIN_RUN {
            if let Some(section) = content.get(*start..run_from) {
                sections.push(section);
            }
            *start = run_to;
        }
    };

    for (i, c) in content.char_indices() {
        match (c == '=', run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(from)) => {
                close_run(from, i, &mut start);
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(from) = run_start {
        close_run(from, content.len(), &mut start);
    }
    if let Some(rest) = content.get(start..) {
        sections.push(rest);
    }
    sections
}

/// Matches `N. text` and returns the trimmed text.
fn numbered_entry(line: &str) -> Option<&str> {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = line.get(digits..)?.strip_prefix('.')?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let text = rest.trim();
    (!text.is_empty()).then_some(text)
}

/// Parses free-form seed notes.
///
/// Sections are separated by lines of `=====` (five or more). The first
/// non-blank line of a section names the wallet; the following `N. word`
/// lines spell out its mnemonic one word per line, or a single numbered line
/// may carry the whole phrase. `seed_x` placeholders are ignored.
pub fn parse_seed_file(content: &str) -> SeedFileParse {
    let mut parsed = SeedFileParse::default();

    for section in split_sections(content) {
        let mut lines = section
            .trim()
            .split('\n')
            .map(str::trim)
            .filter(|l| !l.is_empty());
        let name = match lines.next() {
            Some(name) => name.to_string(),
            None => continue,
        };

        let mut words: Vec<&str> = Vec::new();
        let mut full_phrase: Option<&str> = None;
        for entry in lines.filter_map(numbered_entry) {
            if entry.eq_ignore_ascii_case(PLACEHOLDER_WORD) {
                continue;
            }
            if entry.split_whitespace().count() > 1 {
                full_phrase = Some(entry);
                break;
            }
            words.push(entry);
        }

        if let Some(phrase) = full_phrase {
            parsed.wallets.push(WalletEntry {
                name,
                seed_phrase: SeedPhrase::new(phrase),
                address_count: DEFAULT_ADDRESS_COUNT,
            });
            continue;
        }
        if words.is_empty() {
            continue;
        }
        if MNEMONIC_WORD_COUNTS.contains(&words.len()) {
            parsed.wallets.push(WalletEntry {
                name,
                seed_phrase: SeedPhrase::new(words.join(" ")),
                address_count: DEFAULT_ADDRESS_COUNT,
            });
        } else {
            tracing::warn!(
                wallet = %name,
                words = words.len(),
                "skipping seed section: word count must be 12, 15, 18, 21 or 24"
            );
            parsed.skipped.push(SkippedSection {
                name,
                words: words.len(),
            });
        }
    }
    parsed
}
