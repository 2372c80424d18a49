//! Search: Read-only scans over the logical characters of a builder.

use crate::error::{BuilderError, Result};

/// How characters are compared during a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Case {
    /// Characters must be identical.
    #[default]
    Sensitive,
    /// Characters are compared by their lowercase mapping.
    Insensitive,
}

impl Case {
    /// Compare two characters under this mode.
    #[inline]
    pub fn chars_match(self, a: char, b: char) -> bool {
        if a == b {
            return true;
        }
        match self {
            Self::Sensitive => false,
            Self::Insensitive if a.is_ascii() && b.is_ascii() => a.eq_ignore_ascii_case(&b),
            Self::Insensitive => a.to_lowercase().eq(b.to_lowercase()),
        }
    }
}

/// First position of `needle` at or after `start`.
pub(crate) fn index_of_char(haystack: &[char], needle: char, start: usize) -> Option<usize> {
    haystack
        .get(start..)?
        .iter()
        .position(|&c| c == needle)
        .map(|i| start + i)
}

/// Whether `pattern` (of `pattern_len` chars) occurs at `at`.
#[inline]
fn matches_at(haystack: &[char], at: usize, pattern: &str, pattern_len: usize, case: Case) -> bool {
    haystack[at..at + pattern_len]
        .iter()
        .zip(pattern.chars())
        .all(|(&a, b)| case.chars_match(a, b))
}

/// First start position in `start..=len - |pattern|` where `pattern` matches.
///
/// An empty pattern matches at `start` as long as `start` is within the
/// content.
pub(crate) fn index_of(haystack: &[char], pattern: &str, start: usize, case: Case) -> Option<usize> {
    let pattern_len = pattern.chars().count();
    let last = haystack.len().checked_sub(pattern_len)?;
    if start > last {
        return None;
    }
    (start..=last).find(|&at| matches_at(haystack, at, pattern, pattern_len, case))
}

/// Whether `pattern` occurs exactly at `start`.
///
/// `start` past the end of the content is an error; a pattern running
/// past the end simply does not match.
pub(crate) fn starts_with(haystack: &[char], pattern: &str, start: usize, case: Case) -> Result<bool> {
    if start > haystack.len() {
        return Err(BuilderError::OutOfRange {
            index: start,
            len: haystack.len(),
        });
    }
    let pattern_len = pattern.chars().count();
    if start + pattern_len > haystack.len() {
        return Ok(false);
    }
    Ok(matches_at(haystack, start, pattern, pattern_len, case))
}

/// Non-overlapping matches of `pattern`, scanning left to right and
/// resuming right after each match.
pub(crate) fn count_matches(haystack: &[char], pattern: &str, pattern_len: usize) -> usize {
    let mut count = 0;
    let mut at = 0;
    while at + pattern_len <= haystack.len() {
        if matches_at(haystack, at, pattern, pattern_len, Case::Sensitive) {
            count += 1;
            at += pattern_len;
        } else {
            at += 1;
        }
    }
    count
}

/// Whether a non-empty `pattern` matches at `at`, case-sensitively.
#[inline]
pub(crate) fn is_match(haystack: &[char], at: usize, pattern: &str, pattern_len: usize) -> bool {
    at + pattern_len <= haystack.len() && matches_at(haystack, at, pattern, pattern_len, Case::Sensitive)
}
