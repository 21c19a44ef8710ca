//! Item code generation.
//!
//! Codes are a short prefix taken from the owning category's initials plus
//! the item's global sequence number, e.g. `EL042`. The prefix alone is not
//! unique across categories; the sequence number is.

/// Maximum number of initials kept in a prefix.
const MAX_PREFIX_LEN: usize = 2;

/// Prefix used when a category name has no letters at all.
pub const FALLBACK_PREFIX: &str = "IT";

/// Derive the code prefix from a category name.
///
/// Only the part before the first `/` counts. Each run of ASCII letters
/// contributes its upper-cased first letter. A name with a single run
/// (`Electronics`) takes that run's leading letters instead (`EL`).
pub fn code_prefix(category_name: &str) -> String {
    let head = category_name.split('/').next().unwrap_or_default();
    let runs: Vec<&str> = head
        .split(|c: char| !c.is_ascii_alphabetic())
        .filter(|run| !run.is_empty())
        .collect();

    let prefix: String = match runs.as_slice() {
        [only] => only.chars().take(MAX_PREFIX_LEN).collect(),
        _ => runs.iter().filter_map(|run| run.chars().next()).collect(),
    };
    let prefix: String = prefix
        .chars()
        .take(MAX_PREFIX_LEN)
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if prefix.is_empty() {
        FALLBACK_PREFIX.to_string()
    } else {
        prefix
    }
}

/// Full item code: prefix followed by the sequence number padded to three
/// digits. Numbers above 999 simply print wider.
pub fn item_code(category_name: &str, sequence: u64) -> String {
    format!("{}{:03}", code_prefix(category_name), sequence)
}
