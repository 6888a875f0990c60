//! Reconciliation of an edited string against the reference pool.
//!
//! Every edit is rebuilt from scratch, left to right, starting from an empty
//! consumption set. No diffing against the previous accepted string is
//! attempted: the user may insert or delete anywhere, and a full rebuild is
//! correct for all of those at once.
//!
//! Per character:
//! - free characters are kept and consume nothing;
//! - otherwise the lowest unused pool index with the same normalized key is
//!   consumed and the character kept as typed;
//! - if no such index exists the character is dropped.

use crate::free_chars::is_free;
use crate::normalize::normalize;
use crate::pool::{ConsumptionSet, ReferencePool};

/// Corrected string plus the pool indices it consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub accepted: String,
    pub consumption: ConsumptionSet,
}

impl Reconciliation {
    /// Number of characters removed from `candidate`, the string this
    /// result was built from. Zero for any string not longer than `accepted`.
    pub fn dropped_from(&self, candidate: &str) -> usize {
        candidate
            .chars()
            .count()
            .saturating_sub(self.accepted.chars().count())
    }
}

/// Rebuild `candidate` against `pool`.
///
/// The result does not depend on any earlier reconciliation, and running it
/// again on its own `accepted` string yields the same result.
pub fn reconcile(pool: &ReferencePool, candidate: &str) -> Reconciliation {
    let mut accepted = String::with_capacity(candidate.len());
    let mut used = ConsumptionSet::new();

    for c in candidate.chars() {
        if is_free(c) {
            accepted.push(c);
            continue;
        }
        let key = normalize(c);
        if let Some(j) = pool.first_available(&key, &used) {
            accepted.push(c);
            used.insert(j);
        }
    }

    Reconciliation {
        accepted,
        consumption: used,
    }
}

/// Map a byte cursor in `candidate` to a byte cursor in the reconciled text.
///
/// Reconciliation is a left-to-right greedy pass, so reconciling the prefix
/// before the cursor yields exactly the prefix of the full result. An offset
/// that is not a char boundary is moved back to the previous one.
pub fn remap_cursor(pool: &ReferencePool, candidate: &str, cursor: usize) -> usize {
    let mut cut = cursor.min(candidate.len());
    while !candidate.is_char_boundary(cut) {
        cut -= 1;
    }
    reconcile(pool, &candidate[..cut]).accepted.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dropped_count() {
        let pool = ReferencePool::new("ab");
        let r = reconcile(&pool, "axbx");
        assert_eq!(r.dropped_from("axbx"), 2);
        assert_eq!(r.dropped_from("a"), 0);
    }

    #[test]
    fn test_empty_candidate() {
        let pool = ReferencePool::new("abc");
        let r = reconcile(&pool, "");
        assert_eq!(r.accepted, "");
        assert!(r.consumption.is_empty());
    }

    #[test]
    fn test_unavailable_letter_dropped() {
        let pool = ReferencePool::new("ab");
        let r = reconcile(&pool, "aab");
        assert_eq!(r.accepted, "ab");
        assert_eq!(r.consumption.indices(), &[0, 1]);
        assert_eq!(r.dropped_from("aab"), 1);
    }

    #[test]
    fn test_lowest_index_tie_break() {
        let pool = ReferencePool::new("Aa");
        let r = reconcile(&pool, "aa");
        assert_eq!(r.accepted, "aa");
        assert_eq!(r.consumption.indices(), &[0, 1]);

        let pool = ReferencePool::new("xyA  a");
        let r = reconcile(&pool, "A");
        assert_eq!(r.consumption.indices(), &[2]);
    }

    #[test]
    fn test_typed_case_is_kept() {
        let pool = ReferencePool::new("roma");
        let r = reconcile(&pool, "AMOR");
        assert_eq!(r.accepted, "AMOR");
        assert_eq!(r.consumption.indices(), &[3, 2, 1, 0]);
    }

    #[test]
    fn test_free_chars_between_letters() {
        let pool = ReferencePool::new("ab");
        let r = reconcile(&pool, "a a b");
        assert_eq!(r.accepted, "a  b");
        assert_eq!(r.consumption.indices(), &[0, 1]);
    }

    #[test]
    fn test_spaces_in_reference_are_consumable_only_as_letters() {
        // A reference space is a pool entry, but a typed space is free and
        // never takes it.
        let pool = ReferencePool::new("a b");
        let r = reconcile(&pool, " ");
        assert_eq!(r.accepted, " ");
        assert!(r.consumption.is_empty());
        assert_eq!(pool.leftover(&r.consumption), vec!['a', ' ', 'b']);
    }

    #[test]
    fn test_remap_cursor_after_drop() {
        let pool = ReferencePool::new("ab");
        // cursor after the second 'a', which gets dropped
        assert_eq!(remap_cursor(&pool, "aab", 2), 1);
        assert_eq!(remap_cursor(&pool, "aab", 3), 2);
        assert_eq!(remap_cursor(&pool, "aab", 0), 0);
    }

    #[test]
    fn test_remap_cursor_inside_multibyte_char() {
        let pool = ReferencePool::new("é");
        // byte 1 is inside 'é'
        assert_eq!(remap_cursor(&pool, "é", 1), 0);
        assert_eq!(remap_cursor(&pool, "é", 2), 2);
        assert_eq!(remap_cursor(&pool, "é", 99), 2);
    }
}
