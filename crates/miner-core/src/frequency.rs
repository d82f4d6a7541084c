//! Insertion-stable term counting.

use std::cmp::Reverse;
use std::collections::HashMap;

use serde::{Serialize, Serializer};

/// Term → count mapping that remembers first-seen order.
///
/// "Most common" queries break ties by first-seen order, so results never
/// depend on hash iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `term`.
    pub fn add(&mut self, term: impl Into<String>) {
        let term = term.into();
        if let Some(&slot) = self.index.get(&term) {
            self.entries[slot].1 += 1;
        } else {
            self.index.insert(term.clone(), self.entries.len());
            self.entries.push((term, 1));
        }
    }

    /// Occurrences of `term` (0 when unseen).
    #[must_use]
    pub fn count(&self, term: &str) -> usize {
        self.index.get(term).map_or(0, |&slot| self.entries[slot].1)
    }

    /// Position of `term` in first-seen order.
    #[must_use]
    pub fn first_seen(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    /// Number of distinct terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` if nothing was counted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(t, c)| (t.as_str(), *c))
    }

    /// All entries by descending count, ties in first-seen order.
    #[must_use]
    pub fn ranked(&self) -> Vec<(String, usize)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by_key(|(_, count)| Reverse(*count));
        ranked
    }

    /// At most `n` entries by descending count, ties in first-seen order.
    #[must_use]
    pub fn most_common(&self, n: usize) -> Vec<(String, usize)> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }
}

impl<S: Into<String>> Extend<S> for FrequencyTable {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for term in iter {
            self.add(term);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

/// Serialized as `[[term, count], ...]` in first-seen order.
impl Serialize for FrequencyTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.entries)
    }
}
