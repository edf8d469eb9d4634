use std::collections::BTreeSet;

/// Punctuation that separates words in bank descriptions and GL memos.
const SEPARATORS: [char; 14] = [
    ',', '.', '|', '/', '\\', '-', '_', ':', ';', '#', '(', ')', '[', ']',
];

/// Canonicalizes a free-text memo or description for comparison: lowercase,
/// separators become spaces, whitespace runs collapse to single spaces.
/// Idempotent, never fails.
pub fn normalize(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .map(|c| if SEPARATORS.contains(&c) { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// The word set of the normalized text, the unit the tolerance-phase
/// tie-break counts over.
pub fn token_set(raw: &str) -> BTreeSet<String> {
    normalize(raw)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Number of shared tokens between two token sets.
pub fn token_overlap(a: &BTreeSet<String>, b: &BTreeSet<String>) -> usize {
    a.intersection(b).count()
}
