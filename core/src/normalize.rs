//! Character normalization for pool matching.
//!
//! Two characters are equivalent when their normalized keys are equal. The
//! key is built by canonical decomposition (NFD), dropping the combining
//! diacritical marks block (U+0300..U+036F) and lowercasing what remains.
//! `'É'`, `'é'`, `'e'` and `'E'` therefore all share the key `"e"`.
//!
//! The marks are stripped once more after lowercasing. A plain
//! decompose-strip-lowercase pass would give `'İ'` the key `"i\u{307}"`,
//! which matches nothing typed on a keyboard; here it keys as `"i"`, like
//! `'I'` and `'i'`. Apart from such characters the two orders agree.

use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Comparison key produced by [`normalize`].
///
/// Usually a single lowercase letter, but some characters decompose or
/// lowercase into several code points (`'İ'` lowercases to `"i\u{307}"`,
/// whose mark is then stripped), and a bare combining mark normalizes to
/// the empty key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NormKey(String);

impl NormKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NormKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns true for code points in the Combining Diacritical Marks block.
#[inline]
fn is_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

/// Map a character to its canonical comparison key.
///
/// Total and deterministic: every `char` has a key.
pub fn normalize(c: char) -> NormKey {
    let mut key = String::with_capacity(c.len_utf8());
    for base in std::iter::once(c).nfd().filter(|&d| !is_diacritic(d)) {
        key.extend(base.to_lowercase());
    }
    // Lowercasing can reintroduce a combining mark ('İ' -> "i\u{307}").
    key.retain(|d| !is_diacritic(d));
    NormKey(key)
}

/// True when `a` and `b` normalize to the same key.
pub fn equivalent(a: char, b: char) -> bool {
    a == b || normalize(a) == normalize(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_fold() {
        assert_eq!(normalize('A').as_str(), "a");
        assert_eq!(normalize('a').as_str(), "a");
        assert!(equivalent('Z', 'z'));
    }

    #[test]
    fn test_strips_diacritics() {
        assert_eq!(normalize('é').as_str(), "e");
        assert_eq!(normalize('È').as_str(), "e");
        assert_eq!(normalize('ñ').as_str(), "n");
        assert_eq!(normalize('ü').as_str(), "u");
        assert!(equivalent('à', 'A'));
    }

    #[test]
    fn test_dotted_capital_i() {
        assert_eq!(normalize('İ').as_str(), "i");
        assert!(equivalent('İ', 'i'));
        assert!(equivalent('İ', 'I'));
    }

    #[test]
    fn test_bare_combining_mark_is_empty() {
        assert!(normalize('\u{0301}').is_empty());
    }

    #[test]
    fn test_non_latin_passthrough() {
        assert_eq!(normalize('ß').as_str(), "ß");
        assert_eq!(normalize('Ж').as_str(), "ж");
        assert_eq!(normalize('好').as_str(), "好");
    }

    #[test]
    fn test_distinct_letters_differ() {
        assert!(!equivalent('a', 'b'));
        assert!(!equivalent('o', 'ø'));
    }
}
