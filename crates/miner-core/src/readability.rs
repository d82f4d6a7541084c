//! Display reordering of auto-mined title keywords.
//!
//! Terms are grouped by a four-level ontology (identity, physical form,
//! usage context, descriptive) and stably sorted by group. Unmatched terms
//! go last. The reorder is a pure permutation: members and counts never
//! change.

use serde::{Deserialize, Serialize};

/// Priority assigned to terms matching no group.
pub const UNMATCHED_PRIORITY: u8 = 5;

/// Four ordered keyword groups driving the readability order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadabilityOntology {
    /// Core nouns naming the product itself (priority 1).
    pub identity: Vec<String>,
    /// Physical form and packaging (priority 2).
    pub form: Vec<String>,
    /// Usage context (priority 3).
    pub usage: Vec<String>,
    /// Descriptive and sensory words (priority 4).
    pub descriptive: Vec<String>,
}

impl Default for ReadabilityOntology {
    fn default() -> Self {
        Self {
            identity: owned(&["분유", "우유", "커피", "과자", "음료", "라면", "초콜릿", "사탕"]),
            form: owned(&["가루", "분말", "스틱", "대용량", "소포장", "팩", "캔", "병"]),
            usage: owned(&["자판기", "업소용", "제과", "제빵", "선물", "간식", "사무실", "카페"]),
            descriptive: owned(&["맛있는", "고소한", "달콤한", "진한", "부드러운", "신선한", "프리미엄", "국산"]),
        }
    }
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

impl ReadabilityOntology {
    /// Priority (1–4) of the first group with a keyword inside `term`, else 5.
    #[must_use]
    pub fn priority(&self, term: &str) -> u8 {
        let groups = [&self.identity, &self.form, &self.usage, &self.descriptive];
        (1u8..)
            .zip(groups)
            .find(|(_, group)| {
                group
                    .iter()
                    .any(|k| !k.is_empty() && term.contains(k.as_str()))
            })
            .map_or(UNMATCHED_PRIORITY, |(priority, _)| priority)
    }
}

/// Stably reorder `pairs` by ontology priority.
#[must_use]
pub fn reorder_for_readability(
    mut pairs: Vec<(String, usize)>,
    ontology: &ReadabilityOntology,
) -> Vec<(String, usize)> {
    pairs.sort_by_cached_key(|(term, _)| ontology.priority(term));
    pairs
}
