//! Reference pool and consumption tracking.
//!
//! The pool is the multiset of reference characters with positional
//! identity. It is built once from the reference phrase and replaced
//! wholesale; entries are never edited in place. Which positions are in use
//! lives in a separate [`ConsumptionSet`] so the pool itself stays immutable.

use crate::normalize::{normalize, NormKey};
use ahash::AHashSet;

/// One reference character with its precomputed comparison key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolEntry {
    pub ch: char,
    pub key: NormKey,
}

/// Ordered reference characters, index-addressable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferencePool {
    text: String,
    entries: Vec<PoolEntry>,
}

impl ReferencePool {
    /// Build a pool with one entry per character of `text`, kept verbatim.
    pub fn new(text: &str) -> Self {
        let entries = text
            .chars()
            .map(|ch| PoolEntry {
                ch,
                key: normalize(ch),
            })
            .collect();
        Self {
            text: text.to_string(),
            entries,
        }
    }

    /// The reference phrase this pool was built from.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of reference characters, spaces included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True for a pool built from an empty phrase.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`, if the pool is that long.
    pub fn get(&self, index: usize) -> Option<&PoolEntry> {
        self.entries.get(index)
    }

    /// All entries in pool order.
    pub fn entries(&self) -> &[PoolEntry] {
        &self.entries
    }

    /// Lowest index whose key matches `key` and which `used` does not hold.
    pub fn first_available(&self, key: &NormKey, used: &ConsumptionSet) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .find(|(i, e)| &e.key == key && !used.contains(*i))
            .map(|(i, _)| i)
    }

    /// Characters whose position is not in `used`, in pool order.
    pub fn leftover(&self, used: &ConsumptionSet) -> Vec<char> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(i, _)| !used.contains(*i))
            .map(|(_, e)| e.ch)
            .collect()
    }
}

/// Pool indices in use, remembering the order they were consumed in.
///
/// Equality compares that order, so two reconciliations of the same input
/// against the same pool compare equal.
#[derive(Debug, Clone, Default)]
pub struct ConsumptionSet {
    order: Vec<usize>,
    members: AHashSet<usize>,
}

impl ConsumptionSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `index` as used. Returns false if it already was.
    pub fn insert(&mut self, index: usize) -> bool {
        if self.members.insert(index) {
            self.order.push(index);
            true
        } else {
            false
        }
    }

    /// Check whether `index` is already used.
    pub fn contains(&self, index: usize) -> bool {
        self.members.contains(&index)
    }

    /// Number of used indices.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when nothing is used.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Release every index.
    pub fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }

    /// Indices in consumption order.
    pub fn indices(&self) -> &[usize] {
        &self.order
    }

    /// Indices in ascending order.
    pub fn sorted(&self) -> Vec<usize> {
        let mut v = self.order.clone();
        v.sort_unstable();
        v
    }
}

impl PartialEq for ConsumptionSet {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

impl Eq for ConsumptionSet {}

impl FromIterator<usize> for ConsumptionSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = ConsumptionSet::new();
        for i in iter {
            set.insert(i);
        }
        set
    }
}
