use std::io::{self, BufRead, Write};

use colored::Colorize;

use crate::core::errors::{Result, SshareError};
use crate::core::models::key::Key;
use crate::core::traits::selector::KeySelector;

/// Asks on the terminal which keys to share.
///
/// Keys are listed as `N. name (fingerprint)`; the answer is a list of
/// numbers separated by commas or spaces, or `all`.
pub struct TerminalSelector;

impl KeySelector for TerminalSelector {
    fn select(&self, keys: &[Key]) -> Result<Vec<Key>> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        prompt(keys, &mut stdin.lock(), &mut stdout)
    }
}

/// Selects every key without asking (`--all`).
pub struct AllKeysSelector;

impl KeySelector for AllKeysSelector {
    fn select(&self, keys: &[Key]) -> Result<Vec<Key>> {
        if keys.is_empty() {
            return Err(no_selection());
        }
        Ok(keys.to_vec())
    }
}

/// Run the prompt against arbitrary input and output streams.
pub fn prompt(keys: &[Key], input: &mut impl BufRead, output: &mut impl Write) -> Result<Vec<Key>> {
    if keys.is_empty() {
        return Err(no_selection());
    }

    writeln!(output, "\n  {}", "Select the keys that you would like to share".bold())?;
    for (idx, key) in keys.iter().enumerate() {
        writeln!(output, "  {}. {}", idx + 1, key.label())?;
    }
    write!(output, "\n  Selection (e.g. 1,3 or 'all'): ")?;
    output.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        return Err(SshareError::Selection {
            reason: "Prompt exited".into(),
        });
    }

    let chosen = parse_selection(&answer, keys.len())?;
    Ok(chosen.into_iter().map(|idx| keys[idx].clone()).collect())
}

/// Turn an answer into zero-based indices, dropping repeats.
pub fn parse_selection(answer: &str, count: usize) -> Result<Vec<usize>> {
    let answer = answer.trim();
    if answer.eq_ignore_ascii_case("all") || answer == "*" {
        return Ok((0..count).collect());
    }

    let mut chosen = Vec::new();
    for token in answer.split(|c: char| c == ',' || c.is_whitespace()) {
        if token.is_empty() {
            continue;
        }
        let number: usize = token.parse().map_err(|_| SshareError::Selection {
            reason: format!("'{token}' is not a key number"),
        })?;
        if number == 0 || number > count {
            return Err(SshareError::Selection {
                reason: format!("Key number {number} is out of range (1-{count})"),
            });
        }
        if !chosen.contains(&(number - 1)) {
            chosen.push(number - 1);
        }
    }

    if chosen.is_empty() {
        return Err(no_selection());
    }
    Ok(chosen)
}

fn no_selection() -> SshareError {
    SshareError::Selection {
        reason: "No keys were selected".into(),
    }
}
