//! Per-run engine configuration.
//!
//! Every dictionary, exclusion list and policy the engine consults lives in
//! [`MinerConfig`]. The struct is built by the caller and handed to
//! [`crate::analyze`] for one run; nothing is cached between runs.

use serde::{Deserialize, Serialize};

use crate::readability::ReadabilityOntology;

/// Engine configuration for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinerConfig {
    /// Total number of title keywords (fixed + auto) to aim for.
    pub target_title_keyword_count: usize,
    /// Manual keyword groups in priority order (statistics, add, conversion...).
    pub manual_keyword_groups: Vec<String>,
    /// Caller-supplied words excluded from every mining stage.
    pub user_exclude_list: Vec<String>,
    /// Brand names; merged with `user_exclude_list` into the exclusion set.
    pub brand_names: Vec<String>,
    /// Known sub-terms used to split compound words. Order is irrelevant,
    /// the lexicon sorts them longest-first.
    pub compound_dictionary: Vec<String>,
    /// Cell values meaning "no data" (compared trimmed, ASCII case-insensitive).
    pub placeholder_markers: Vec<String>,
    /// Which letters besides Latin survive text cleaning.
    pub script: Script,
    /// Separator of the attribute field.
    pub attribute_separator: String,
    /// Separator of the tag field.
    pub tag_separator: String,
    /// Number of attribute values reported.
    pub attribute_top_k: usize,
    /// Number of tags to select.
    pub tag_target_count: usize,
    /// Raw-frequency cutoff for the tag candidate pool.
    pub tag_pool_limit: usize,
    /// Which side of a substring pair survives.
    pub redundancy_policy: RedundancyPolicy,
    /// How tags are compared against already-used terms.
    pub overlap_policy: OverlapPolicy,
    /// How auto keywords are compared against fixed keywords.
    pub auto_filter_policy: AutoFilterPolicy,
    /// Leading-modifier collision rule; `None` disables the check.
    pub modifier_prefix: Option<ModifierPrefix>,
    /// Re-admit candidates dropped by the soft checks when slots remain.
    pub backfill: bool,
    /// Optional topical clusters, one pick each before the greedy pass.
    pub clusters: Vec<SemanticCluster>,
    /// Ordered groups used to reorder auto keywords for display.
    pub readability: ReadabilityOntology,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            target_title_keyword_count: 11,
            manual_keyword_groups: Vec::new(),
            user_exclude_list: Vec::new(),
            brand_names: Vec::new(),
            compound_dictionary: Vec::new(),
            placeholder_markers: default_placeholder_markers(),
            script: Script::default(),
            attribute_separator: "|".to_string(),
            tag_separator: ",".to_string(),
            attribute_top_k: 8,
            tag_target_count: 10,
            tag_pool_limit: 300,
            redundancy_policy: RedundancyPolicy::default(),
            overlap_policy: OverlapPolicy::default(),
            auto_filter_policy: AutoFilterPolicy::default(),
            modifier_prefix: Some(ModifierPrefix::default()),
            backfill: false,
            clusters: Vec::new(),
            readability: ReadabilityOntology::default(),
        }
    }
}

fn default_placeholder_markers() -> Vec<String> {
    ["-", "nan", "null"].iter().map(|s| (*s).to_string()).collect()
}

/// Letters kept by the cleaning step in addition to ASCII letters and digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Script {
    /// Precomposed Hangul syllables (`가`..=`힣`).
    #[default]
    Hangul,
    /// ASCII letters only.
    Latin,
}

impl Script {
    /// Return `true` if `c` is a letter of the working script.
    #[must_use]
    pub fn is_letter(self, c: char) -> bool {
        match self {
            Self::Hangul => ('가'..='힣').contains(&c) || c.is_ascii_alphabetic(),
            Self::Latin => c.is_ascii_alphabetic(),
        }
    }
}

/// Which member of a substring pair the tag selector keeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RedundancyPolicy {
    /// Keep the longer, more specific tag.
    #[default]
    PreferLonger,
    /// Keep the shorter, broader tag.
    PreferShorter,
}

/// How a tag is checked against terms already used by title and attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlapPolicy {
    /// Drop a tag only when it equals a used term.
    #[default]
    Exact,
    /// Drop a tag when any of its sub-terms is already used.
    Subterm,
}

/// How auto keyword candidates are compared against fixed keywords.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AutoFilterPolicy {
    /// Drop a candidate equal to a fixed keyword.
    #[default]
    Exact,
    /// Drop a candidate containing, or contained by, a fixed keyword.
    Containment,
}

impl AutoFilterPolicy {
    /// Return `true` if `candidate` clashes with `fixed` under this policy.
    #[must_use]
    pub fn conflicts(self, candidate: &str, fixed: &str) -> bool {
        match self {
            Self::Exact => candidate == fixed,
            Self::Containment => candidate.contains(fixed) || fixed.contains(candidate),
        }
    }
}

/// Leading-modifier prefix rule for the collision check.
///
/// Tags longer than `threshold` characters use their first `long_len`
/// characters, shorter ones their first `short_len`. The defaults fit
/// Hangul, where most modifiers are two or three syllables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModifierPrefix {
    /// Prefix length for tags of at most `threshold` characters.
    pub short_len: usize,
    /// Prefix length for tags longer than `threshold` characters.
    pub long_len: usize,
    /// Length above which `long_len` applies.
    pub threshold: usize,
}

impl Default for ModifierPrefix {
    fn default() -> Self {
        Self {
            short_len: 2,
            long_len: 3,
            threshold: 3,
        }
    }
}

impl ModifierPrefix {
    /// Leading-modifier prefix of `tag`, counted in characters.
    #[must_use]
    pub fn prefix<'t>(&self, tag: &'t str) -> &'t str {
        let len = if tag.chars().count() > self.threshold {
            self.long_len
        } else {
            self.short_len
        };
        match tag.char_indices().nth(len) {
            Some((end, _)) => &tag[..end],
            None => tag,
        }
    }
}

/// A named topical group of tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticCluster {
    /// Display name.
    pub name: String,
    /// A tag belongs to the cluster when it contains any of these.
    pub match_keywords: Vec<String>,
}

impl SemanticCluster {
    /// Create a cluster from a name and its match keywords.
    pub fn new(name: impl Into<String>, match_keywords: &[impl AsRef<str>]) -> Self {
        Self {
            name: name.into(),
            match_keywords: match_keywords
                .iter()
                .map(|k| k.as_ref().to_string())
                .collect(),
        }
    }

    /// Return `true` if `tag` contains one of the cluster's keywords.
    #[must_use]
    pub fn matches(&self, tag: &str) -> bool {
        self.match_keywords
            .iter()
            .any(|k| !k.is_empty() && tag.contains(k.as_str()))
    }
}
