//! Acceptance rules for the greedy tag pass.
//!
//! Every redundancy heuristic is an [`AcceptanceRule`]: given a candidate
//! and the tags accepted so far, accept or reject. A [`RuleChain`] applies
//! rules in order and stops at the first rejection, so policy variants
//! differ only in which chain they hand to the selection loop.
//!
//! | Rule | Checks |
//! |------|--------|
//! | [`SubtermOverlap`] | sub-term shared with an accepted tag |
//! | [`PoolSubsumption`] | substring loser across the whole pool |
//! | [`AcceptedSubsumption`] | substring relation with an accepted tag |
//! | [`ModifierCollision`] | leading-modifier prefix clash |

use std::fmt;

use crate::settings::ModifierPrefix;
use crate::tags::pool::{RejectReason, TagCandidate};

/// Outcome of one rule check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The candidate may be accepted.
    Accept,
    /// The candidate is refused.
    Reject(RejectReason),
}

impl Verdict {
    /// Return `true` for [`Verdict::Accept`].
    #[must_use]
    pub fn is_accept(&self) -> bool {
        matches!(self, Self::Accept)
    }
}

/// A predicate over `(candidate, accepted so far)`.
pub trait AcceptanceRule: fmt::Debug + Send + Sync {
    /// Decide whether `candidate` may join `accepted`.
    fn check(&self, candidate: &TagCandidate, accepted: &[&TagCandidate]) -> Verdict;
}

/// Rejects a candidate sharing a sub-term with an accepted tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubtermOverlap;

impl AcceptanceRule for SubtermOverlap {
    fn check(&self, candidate: &TagCandidate, accepted: &[&TagCandidate]) -> Verdict {
        let shared = candidate
            .subterms
            .iter()
            .find(|sub| accepted.iter().any(|acc| acc.subterms.contains(sub)));
        match shared {
            Some(subterm) => Verdict::Reject(RejectReason::SubtermOverlap {
                subterm: subterm.clone(),
            }),
            None => Verdict::Accept,
        }
    }
}

/// Rejects a candidate the pool scan marked as the losing side of a
/// substring pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoolSubsumption;

impl AcceptanceRule for PoolSubsumption {
    fn check(&self, candidate: &TagCandidate, _accepted: &[&TagCandidate]) -> Verdict {
        match &candidate.subsumed_by {
            Some(by) => Verdict::Reject(RejectReason::Subsumed { by: by.clone() }),
            None => Verdict::Accept,
        }
    }
}

/// Rejects a candidate in a strict substring relation, either way, with an
/// accepted tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptedSubsumption;

impl AcceptanceRule for AcceptedSubsumption {
    fn check(&self, candidate: &TagCandidate, accepted: &[&TagCandidate]) -> Verdict {
        let clash = accepted.iter().find(|acc| {
            acc.text != candidate.text
                && (acc.text.contains(&candidate.text) || candidate.text.contains(&acc.text))
        });
        match clash {
            Some(acc) => Verdict::Reject(RejectReason::Subsumed {
                by: acc.text.clone(),
            }),
            None => Verdict::Accept,
        }
    }
}

/// Rejects a candidate whose leading modifier clashes with an accepted tag.
///
/// Clash: the candidate's prefix occurs inside an accepted tag, or an
/// accepted tag's prefix occurs inside the candidate.
#[derive(Debug, Clone, Copy)]
pub struct ModifierCollision {
    prefix: ModifierPrefix,
}

impl ModifierCollision {
    /// Create the rule with a prefix policy.
    #[must_use]
    pub fn new(prefix: ModifierPrefix) -> Self {
        Self { prefix }
    }
}

impl AcceptanceRule for ModifierCollision {
    fn check(&self, candidate: &TagCandidate, accepted: &[&TagCandidate]) -> Verdict {
        let own = self.prefix.prefix(&candidate.text);
        let clash = accepted.iter().find(|acc| {
            acc.text.contains(own) || candidate.text.contains(self.prefix.prefix(&acc.text))
        });
        match clash {
            Some(acc) => Verdict::Reject(RejectReason::ModifierCollision {
                with: acc.text.clone(),
            }),
            None => Verdict::Accept,
        }
    }
}

/// Ordered rules; the first rejection wins.
#[derive(Debug, Default)]
pub struct RuleChain {
    rules: Vec<Box<dyn AcceptanceRule>>,
}

impl RuleChain {
    /// Create an empty chain (accepts everything).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule.
    #[must_use]
    pub fn rule(mut self, rule: impl AcceptanceRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Append a rule when `enabled`.
    #[must_use]
    pub fn rule_if(self, enabled: bool, rule: impl AcceptanceRule + 'static) -> Self {
        if enabled { self.rule(rule) } else { self }
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Return `true` if the chain has no rule.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl AcceptanceRule for RuleChain {
    fn check(&self, candidate: &TagCandidate, accepted: &[&TagCandidate]) -> Verdict {
        self.rules
            .iter()
            .map(|rule| rule.check(candidate, accepted))
            .find(|verdict| !verdict.is_accept())
            .unwrap_or(Verdict::Accept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn candidate(text: &str, subterms: &[&str]) -> TagCandidate {
        TagCandidate {
            text: text.to_string(),
            raw_frequency: 1,
            first_seen: 0,
            subterms: subterms.iter().map(|s| (*s).to_string()).collect(),
            subsumed_by: None,
        }
    }

    #[test]
    fn subterm_overlap_rejects_shared_subterm() {
        let accepted = candidate("전지분유", &["전지", "분유"]);
        let verdict = SubtermOverlap.check(&candidate("분유스틱", &["분유", "스틱"]), &[&accepted]);
        assert_eq!(
            verdict,
            Verdict::Reject(RejectReason::SubtermOverlap {
                subterm: "분유".to_string()
            })
        );
        assert!(SubtermOverlap.check(&candidate("커피", &["커피"]), &[&accepted]).is_accept());
    }

    #[test]
    fn pool_subsumption_reads_precomputed_mark() {
        let mut loser = candidate("제과제빵", &[]);
        loser.subsumed_by = Some("제과제빵재료".to_string());
        assert!(!PoolSubsumption.check(&loser, &[]).is_accept());
        assert!(PoolSubsumption.check(&candidate("맛있는", &[]), &[]).is_accept());
    }

    #[test]
    fn accepted_subsumption_checks_both_directions() {
        let accepted = candidate("제과제빵", &[]);
        assert!(!AcceptedSubsumption.check(&candidate("제과", &[]), &[&accepted]).is_accept());
        assert!(!AcceptedSubsumption.check(&candidate("제과제빵재료", &[]), &[&accepted]).is_accept());
        assert!(AcceptedSubsumption.check(&candidate("맛있는", &[]), &[&accepted]).is_accept());
    }

    #[test]
    fn modifier_collision_compares_prefixes_both_ways() {
        let rule = ModifierCollision::new(ModifierPrefix::default());
        let accepted = candidate("고소한우유", &[]);
        // Candidate prefix "고소" occurs in the accepted tag.
        assert!(!rule.check(&candidate("고소함", &[]), &[&accepted]).is_accept());
        // Accepted prefix "고소한" occurs in the candidate.
        assert!(!rule.check(&candidate("아주고소한맛", &[]), &[&accepted]).is_accept());
        assert!(rule.check(&candidate("달콤한", &[]), &[&accepted]).is_accept());
    }

    #[test]
    fn chain_stops_at_first_rejection() {
        let chain = RuleChain::new()
            .rule(PoolSubsumption)
            .rule_if(false, SubtermOverlap)
            .rule(ModifierCollision::new(ModifierPrefix::default()));
        assert_eq!(chain.len(), 2);

        let mut loser = candidate("제과제빵", &[]);
        loser.subsumed_by = Some("제과제빵재료".to_string());
        let accepted = candidate("제과용품", &[]);
        assert_eq!(
            chain.check(&loser, &[&accepted]),
            Verdict::Reject(RejectReason::Subsumed {
                by: "제과제빵재료".to_string()
            })
        );
        assert!(RuleChain::new().check(&loser, &[]).is_accept());
    }
}
