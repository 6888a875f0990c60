//! Characters that never consume a pool position.
//!
//! Space, common punctuation and a few currency symbols may appear anywhere
//! in a composition regardless of the reference phrase.

use phf::phf_set;

static FREE_CHARS: phf::Set<char> = phf_set! {
    ' ', '?', '!', ',', '.', ';', ':', '-', '_', '@', '#',
    '(', ')', '[', ']', '{', '}', '/', '\\', '\'', '"',
    '+', '=', '*', '&', '%', '€', '£', '<', '>',
};

/// Check whether `c` bypasses pool consumption.
#[inline]
pub fn is_free(c: char) -> bool {
    FREE_CHARS.contains(&c)
}

/// Iterate the free characters (unordered).
pub fn free_chars() -> impl Iterator<Item = char> {
    FREE_CHARS.iter().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_and_punctuation_are_free() {
        for c in [' ', '.', ',', '!', '?', '\'', '"', '-', '€', '£'] {
            assert!(is_free(c), "{c:?} should be free");
        }
    }

    #[test]
    fn test_letters_and_digits_are_not_free() {
        for c in ['a', 'Z', 'é', '0', '9', '$', '\t', '\n'] {
            assert!(!is_free(c), "{c:?} should not be free");
        }
    }

    #[test]
    fn test_set_size() {
        assert_eq!(free_chars().count(), 30);
    }
}
