//! Phase one of tag selection: the bounded, immutable candidate pool.
//!
//! Built once from the raw frequency table. Hard filters (placeholder, brand, digit,
//! used-term overlap) run here, and so does the pool-wide subsumption scan,
//! whose outcome is recorded on each candidate rather than removing it.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::frequency::FrequencyTable;
use crate::lexicon::{Lexicon, contains_digit};
use crate::settings::{MinerConfig, OverlapPolicy, RedundancyPolicy};

/// One tag eligible for selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCandidate {
    /// Tag text as it appears in the corpus (trimmed).
    pub text: String,
    /// Count from the unfiltered raw table.
    pub raw_frequency: usize,
    /// Position in the raw table's first-seen order.
    pub first_seen: usize,
    /// The tag re-tokenized by the lexicon.
    pub subterms: Vec<String>,
    /// Pool member this tag loses to under the redundancy policy.
    pub subsumed_by: Option<String>,
}

/// Why a tag was not selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "kebab-case")]
pub enum RejectReason {
    /// A "no data" marker such as `-` or `nan`.
    Placeholder,
    /// Contains an excluded brand or word.
    Brand {
        /// The exclusion entry found in the tag.
        brand: String,
    },
    /// Contains a digit.
    Digit,
    /// Equals a title keyword or attribute value.
    UsedTerm,
    /// Shares a sub-term with a used term or an accepted tag.
    SubtermOverlap {
        /// The shared sub-term.
        subterm: String,
    },
    /// In a substring relation with another tag that wins.
    Subsumed {
        /// The winning tag.
        by: String,
    },
    /// Leading modifier collides with an accepted tag.
    ModifierCollision {
        /// The accepted tag it collides with.
        with: String,
    },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Placeholder => write!(f, "placeholder marker"),
            Self::Brand { brand } => write!(f, "contains excluded word '{brand}'"),
            Self::Digit => write!(f, "contains a digit"),
            Self::UsedTerm => write!(f, "already used in title or attributes"),
            Self::SubtermOverlap { subterm } => write!(f, "sub-term '{subterm}' already used"),
            Self::Subsumed { by } => write!(f, "subsumed by '{by}'"),
            Self::ModifierCollision { with } => write!(f, "modifier collides with '{with}'"),
        }
    }
}

/// Terms already placed in the title or attribute outputs.
#[derive(Debug, Clone, Default)]
pub struct UsedTerms {
    terms: HashSet<String>,
}

impl UsedTerms {
    /// Collect used terms.
    pub fn new<I>(terms: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            terms: terms.into_iter().map(Into::into).collect(),
        }
    }

    /// Return `true` if `term` is used.
    #[must_use]
    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }
}

/// Bounded candidate list plus the tags removed by hard filters.
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    candidates: Vec<TagCandidate>,
    rejected: Vec<(String, RejectReason)>,
}

impl CandidatePool {
    /// Build the pool from the top `tag_pool_limit` raw tags.
    #[must_use]
    pub fn build(
        raw: &FrequencyTable,
        used: &UsedTerms,
        lexicon: &Lexicon,
        config: &MinerConfig,
    ) -> Self {
        let mut pool = Self::default();

        for (text, raw_frequency) in raw.most_common(config.tag_pool_limit) {
            let subterms = lexicon.tokenize(&text);
            match hard_filter(&text, &subterms, used, lexicon, config.overlap_policy) {
                Some(reason) => pool.rejected.push((text, reason)),
                None => pool.candidates.push(TagCandidate {
                    first_seen: raw.first_seen(&text).unwrap_or(usize::MAX),
                    text,
                    raw_frequency,
                    subterms,
                    subsumed_by: None,
                }),
            }
        }

        pool.mark_subsumed(config.redundancy_policy);
        pool
    }

    /// Surviving candidates, by descending raw frequency.
    #[must_use]
    pub fn candidates(&self) -> &[TagCandidate] {
        &self.candidates
    }

    /// Tags removed by hard filters, in raw rank order.
    #[must_use]
    pub fn rejected(&self) -> &[(String, RejectReason)] {
        &self.rejected
    }

    /// Consume the pool, returning its hard rejections.
    #[must_use]
    pub fn into_rejected(self) -> Vec<(String, RejectReason)> {
        self.rejected
    }

    /// Record, for each candidate, a pool member it loses to.
    fn mark_subsumed(&mut self, policy: RedundancyPolicy) {
        let losers: Vec<Option<String>> = self
            .candidates
            .iter()
            .map(|cand| {
                self.candidates
                    .iter()
                    .find(|other| {
                        other.text != cand.text
                            && match policy {
                                RedundancyPolicy::PreferLonger => other.text.contains(&cand.text),
                                RedundancyPolicy::PreferShorter => cand.text.contains(&other.text),
                            }
                    })
                    .map(|winner| winner.text.clone())
            })
            .collect();

        for (cand, by) in self.candidates.iter_mut().zip(losers) {
            cand.subsumed_by = by;
        }
    }
}

fn hard_filter(
    text: &str,
    subterms: &[String],
    used: &UsedTerms,
    lexicon: &Lexicon,
    policy: OverlapPolicy,
) -> Option<RejectReason> {
    if lexicon.is_placeholder(text) {
        return Some(RejectReason::Placeholder);
    }
    if let Some(brand) = lexicon.excluded_substring(text) {
        return Some(RejectReason::Brand {
            brand: brand.to_string(),
        });
    }
    if contains_digit(text) {
        return Some(RejectReason::Digit);
    }
    if used.contains(text) {
        return Some(RejectReason::UsedTerm);
    }
    if policy == OverlapPolicy::Subterm {
        if let Some(subterm) = subterms.iter().find(|s| used.contains(s)) {
            return Some(RejectReason::SubtermOverlap {
                subterm: subterm.clone(),
            });
        }
    }
    None
}
