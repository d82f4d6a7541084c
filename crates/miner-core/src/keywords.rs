//! Title keyword resolution: fixed (manual) keywords and auto-mined fill.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::lexicon::Lexicon;
use crate::settings::AutoFilterPolicy;

/// Ordered sequence of unique terms; the first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct KeywordSet {
    terms: Vec<String>,
    #[serde(skip)]
    seen: HashSet<String>,
}

impl KeywordSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `term` unless already present. Returns `true` if appended.
    pub fn insert(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if self.seen.contains(&term) {
            return false;
        }
        self.seen.insert(term.clone());
        self.terms.push(term);
        true
    }

    /// Return `true` if `term` is present.
    #[must_use]
    pub fn contains(&self, term: &str) -> bool {
        self.seen.contains(term)
    }

    /// Terms in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.terms
    }

    /// Number of terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Return `true` if the set holds no term.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Consume the set, returning its terms in order.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.terms
    }
}

impl<S: Into<String>> FromIterator<S> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for term in iter {
            set.insert(term);
        }
        set
    }
}

/// Merge manual keyword groups into one deduplicated list.
///
/// Groups are tokenized in manual mode and concatenated in the order given;
/// the result is never re-sorted.
pub fn resolve_fixed_keywords<S: AsRef<str>>(groups: &[S], lexicon: &Lexicon) -> KeywordSet {
    let fixed: KeywordSet = groups
        .iter()
        .flat_map(|group| lexicon.tokenize_manual(group.as_ref()))
        .collect();
    debug!(groups = groups.len(), fixed = fixed.len(), "Resolved fixed keywords");
    fixed
}

/// Fill the title slots left after the fixed keywords.
///
/// `ranked` must be ordered by descending frequency (ties first-seen).
/// Candidates clashing with a fixed keyword under `policy` are skipped; at
/// most `target - fixed.len()` survivors are returned, never padded.
#[must_use]
pub fn select_auto_keywords(
    ranked: &[(String, usize)],
    fixed: &[String],
    target: usize,
    policy: AutoFilterPolicy,
) -> Vec<(String, usize)> {
    let remaining = target.saturating_sub(fixed.len());
    let selected: Vec<(String, usize)> = ranked
        .iter()
        .filter(|(term, _)| !fixed.iter().any(|f| policy.conflicts(term, f)))
        .take(remaining)
        .cloned()
        .collect();
    debug!(
        remaining,
        selected = selected.len(),
        ?policy,
        "Selected auto keywords"
    );
    selected
}
