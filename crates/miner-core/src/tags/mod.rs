//! Tag extraction, counting and diversified selection.
//!
//! Selection is split in two phases:
//!
//! 1. [`CandidatePool::build`]: pure computation of the bounded candidate
//!    list from the raw table (hard filters, sub-terms, pool-wide
//!    subsumption marks).
//! 2. [`TagSelector::select`]: a greedy accept/reject pass over that list,
//!    driven by [`rules::RuleChain`]s.
//!
//! Counting always happens before any filtering: [`count_raw_tags`] sees
//! every trimmed, non-empty piece of every tag field, and reported
//! frequencies always come from that table.

pub mod pool;
pub mod rules;
pub mod select;

pub use pool::{CandidatePool, RejectReason, TagCandidate, UsedTerms};
pub use rules::{AcceptanceRule, RuleChain, Verdict};
pub use select::{TagSelection, TagSelector};

use crate::frequency::FrequencyTable;
use crate::lexicon::split_delimited;

/// Count every tag occurrence across `fields`, unfiltered.
pub fn count_raw_tags<'a, I>(fields: I, separator: &str) -> FrequencyTable
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut table = FrequencyTable::new();
    for field in fields.into_iter().flatten() {
        table.extend(split_delimited(field, separator));
    }
    table
}
