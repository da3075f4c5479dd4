// Path: crates/cli/src/prompt.rs

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// A yes/no decision taken by the operator.
pub trait Confirm {
    /// Shows `question` and returns whether the answer was affirmative.
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// `yes` and `y`, in any case, are affirmative; anything else is not.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "yes" | "y")
}

/// Asks on stdout and reads one line from stdin.
#[derive(Debug, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        let mut stdout = std::io::stdout();
        write!(stdout, "{} (yes/no): ", question)?;
        stdout.flush()?;
        let mut answer = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut answer)
            .context("Failed to read answer from stdin")?;
        Ok(is_affirmative(&answer))
    }
}

/// Answers every question the same way without asking (`--yes`).
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        println!("{} (yes/no): {}", question, if self.0 { "yes" } else { "no" });
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affirmative_answers() {
        assert!(is_affirmative("yes\n"));
        assert!(is_affirmative(" Y "));
        assert!(is_affirmative("YES"));
        assert!(!is_affirmative("no"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("yess"));
    }

    #[test]
    fn auto_confirm_answers_without_input() {
        assert!(AutoConfirm(true).confirm("Continue?").unwrap());
        assert!(!AutoConfirm(false).confirm("Continue?").unwrap());
    }
}
