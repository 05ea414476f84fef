//! String validation predicates

use regex::Regex;

/// A value is present if it is not the empty string.
pub fn is_non_empty(value: &str) -> bool {
    !value.is_empty()
}

/// Character-count lower bound (characters, not bytes).
pub fn min_chars(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

/// Character-count upper bound (characters, not bytes).
pub fn max_chars(value: &str, max: usize) -> bool {
    value.chars().count() <= max
}

/// Unanchored pattern match with default flags.
///
/// The pattern is compiled per call; an uncompilable pattern never matches.
/// Callers that want a loud failure for bad patterns should check the
/// pattern ahead of time with [`pattern_is_valid`].
pub fn matches_pattern(value: &str, pattern: &str) -> bool {
    match Regex::new(pattern) {
        Ok(regex) => regex.is_match(value),
        Err(_) => false,
    }
}

/// Whether a pattern compiles at all. Used for up-front rule checking.
pub fn pattern_is_valid(pattern: &str) -> Result<(), regex::Error> {
    Regex::new(pattern).map(|_| ())
}
