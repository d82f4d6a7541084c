//! Phase two of tag selection: the single-threaded greedy pass.
//!
//! The pool is only read here. Acceptance state lives in [`Greedy`], indexed
//! by pool position, so the candidate list is never mutated while iterated.

use std::cmp::Reverse;

use serde::Serialize;
use tracing::{debug, trace};

use crate::frequency::FrequencyTable;
use crate::lexicon::Lexicon;
use crate::settings::{MinerConfig, OverlapPolicy, SemanticCluster};
use crate::tags::pool::{CandidatePool, RejectReason, TagCandidate, UsedTerms};
use crate::tags::rules::{
    AcceptanceRule, AcceptedSubsumption, ModifierCollision, PoolSubsumption, RuleChain,
    SubtermOverlap, Verdict,
};

/// Result of one tag selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagSelection {
    /// Accepted `(tag, raw frequency)` pairs, by descending raw frequency.
    pub tags: Vec<(String, usize)>,
    /// Pool tags refused, with the reason of their last rejection.
    pub rejections: Vec<(String, RejectReason)>,
}

/// Selects a diversified tag list from a raw tag table.
#[derive(Debug)]
pub struct TagSelector<'a> {
    lexicon: &'a Lexicon,
    config: &'a MinerConfig,
}

impl<'a> TagSelector<'a> {
    /// Create a selector for one run.
    #[must_use]
    pub fn new(lexicon: &'a Lexicon, config: &'a MinerConfig) -> Self {
        Self { lexicon, config }
    }

    /// Run both phases over `raw`, avoiding everything in `used`.
    ///
    /// Order of passes:
    /// 1. One pick per configured cluster (sub-term and pool-subsumption
    ///    checks only)
    /// 2. Greedy pass in raw-frequency order with every soft check
    /// 3. Optional back-fill that swaps pool subsumption for a check against
    ///    accepted tags and skips the modifier check
    #[must_use]
    pub fn select(&self, raw: &FrequencyTable, used: &UsedTerms) -> TagSelection {
        let pool = CandidatePool::build(raw, used, self.lexicon, self.config);
        let target = self.config.tag_target_count;
        let subterm = self.config.overlap_policy == OverlapPolicy::Subterm;

        let mut greedy = Greedy::new(pool.candidates(), target);

        if !self.config.clusters.is_empty() {
            let chain = RuleChain::new()
                .rule_if(subterm, SubtermOverlap)
                .rule(PoolSubsumption);
            greedy.cluster_pass(&self.config.clusters, &chain);
        }

        let primary = RuleChain::new()
            .rule_if(subterm, SubtermOverlap)
            .rule(PoolSubsumption);
        let primary = match self.config.modifier_prefix {
            Some(prefix) => primary.rule(ModifierCollision::new(prefix)),
            None => primary,
        };
        greedy.pass(&primary);

        if self.config.backfill && !greedy.is_full() {
            let relaxed = RuleChain::new()
                .rule_if(subterm, SubtermOverlap)
                .rule(AcceptedSubsumption);
            debug!(accepted = greedy.accepted.len(), target, "Back-filling tag slots");
            greedy.pass(&relaxed);
        }

        let (tags, soft) = greedy.finish();
        let mut rejections = pool.into_rejected();
        rejections.extend(soft);

        debug!(
            raw = raw.len(),
            selected = tags.len(),
            rejected = rejections.len(),
            "Selected tags"
        );
        TagSelection { tags, rejections }
    }
}

/// Acceptance state over an immutable pool.
struct Greedy<'p> {
    pool: &'p [TagCandidate],
    target: usize,
    accepted: Vec<&'p TagCandidate>,
    taken: Vec<bool>,
    last_rejection: Vec<Option<RejectReason>>,
}

impl<'p> Greedy<'p> {
    fn new(pool: &'p [TagCandidate], target: usize) -> Self {
        Self {
            pool,
            target,
            accepted: Vec::with_capacity(target.min(pool.len())),
            taken: vec![false; pool.len()],
            last_rejection: vec![None; pool.len()],
        }
    }

    fn is_full(&self) -> bool {
        self.accepted.len() >= self.target
    }

    fn accept(&mut self, slot: usize) {
        let pool = self.pool;
        self.taken[slot] = true;
        self.last_rejection[slot] = None;
        self.accepted.push(&pool[slot]);
    }

    /// Accept the most frequent passing member of each cluster, in order.
    fn cluster_pass(&mut self, clusters: &[SemanticCluster], rules: &RuleChain) {
        let pool = self.pool;
        for cluster in clusters {
            if self.is_full() {
                break;
            }
            let pick = pool.iter().enumerate().find(|(slot, cand)| {
                !self.taken[*slot]
                    && cluster.matches(&cand.text)
                    && rules.check(cand, &self.accepted).is_accept()
            });
            if let Some((slot, cand)) = pick {
                debug!(cluster = %cluster.name, tag = %cand.text, "Cluster pick");
                self.accept(slot);
            }
        }
    }

    /// Walk untaken candidates in pool order until the target is reached.
    fn pass(&mut self, rules: &RuleChain) {
        let pool = self.pool;
        for (slot, cand) in pool.iter().enumerate() {
            if self.is_full() {
                break;
            }
            if self.taken[slot] {
                continue;
            }
            match rules.check(cand, &self.accepted) {
                Verdict::Accept => self.accept(slot),
                Verdict::Reject(reason) => {
                    trace!(tag = %cand.text, %reason, "Tag rejected");
                    self.last_rejection[slot] = Some(reason);
                }
            }
        }
    }

    /// Accepted pairs sorted by raw frequency, plus soft rejections.
    fn finish(self) -> (Vec<(String, usize)>, Vec<(String, RejectReason)>) {
        let mut accepted = self.accepted;
        accepted.sort_by_key(|c| (Reverse(c.raw_frequency), c.first_seen));
        let tags = accepted
            .into_iter()
            .map(|c| (c.text.clone(), c.raw_frequency))
            .collect();

        let soft = self
            .pool
            .iter()
            .zip(self.last_rejection)
            .filter_map(|(cand, reason)| reason.map(|r| (cand.text.clone(), r)))
            .collect();

        (tags, soft)
    }
}
