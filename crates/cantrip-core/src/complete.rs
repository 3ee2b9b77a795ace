//! Prefix completion over command names and language vocabulary.

use crate::command::{COMMANDS, COMMAND_MARKER};
use crate::language;

/// Returns the sorted, deduplicated candidates for `input`.
///
/// Marker-prefixed input completes against the command table; everything
/// else completes against the language vocabulary. Unknown languages
/// yield nothing, and an empty input yields the full vocabulary.
pub fn complete(input: &str, language_name: &str) -> Vec<String> {
    let mut out: Vec<String> = if input.starts_with(COMMAND_MARKER) {
        COMMANDS
            .iter()
            .map(|c| format!("{}{}", COMMAND_MARKER, c.name))
            .filter(|name| name.starts_with(input))
            .collect()
    } else {
        match language::profile(language_name) {
            Some(profile) => profile
                .vocabulary()
                .filter(|word| word.starts_with(input))
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        }
    };
    out.sort();
    out.dedup();
    out
}
