//! One analysis run over a resident corpus.

use serde::{Deserialize, Serialize};
use tracing::{debug, info_span};

use crate::attributes::mine_attributes;
use crate::frequency::FrequencyTable;
use crate::keywords::{resolve_fixed_keywords, select_auto_keywords};
use crate::lexicon::Lexicon;
use crate::readability::reorder_for_readability;
use crate::settings::MinerConfig;
use crate::tags::{RejectReason, TagSelector, UsedTerms, count_raw_tags};

/// One competitor listing. `None` marks a missing or malformed cell, which
/// contributes nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Free-text title.
    pub title: Option<String>,
    /// Delimited attribute list.
    pub attributes: Option<String>,
    /// Delimited tag list.
    pub tags: Option<String>,
}

impl ProductRecord {
    /// Create a record with all three cells present.
    pub fn new(
        title: impl Into<String>,
        attributes: impl Into<String>,
        tags: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            attributes: Some(attributes.into()),
            tags: Some(tags.into()),
        }
    }
}

/// Everything one run produces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Analysis {
    /// Manual keywords, deduplicated, in group order.
    pub fixed_keywords: Vec<String>,
    /// Auto-mined title keywords with their title-corpus counts, in
    /// readability order.
    pub auto_keyword_pairs: Vec<(String, usize)>,
    /// Top attribute values with counts.
    pub attribute_pairs: Vec<(String, usize)>,
    /// Selected tags with raw counts, by descending raw count.
    pub tag_pairs: Vec<(String, usize)>,
    /// Unfiltered tag counts, first-seen order.
    pub raw_tag_frequency: FrequencyTable,
    /// Pool tags the selector refused.
    pub tag_rejections: Vec<(String, RejectReason)>,
}

impl Analysis {
    /// Title keyword sequence: fixed keywords then auto keywords.
    #[must_use]
    pub fn title_keywords(&self) -> Vec<&str> {
        self.fixed_keywords
            .iter()
            .map(String::as_str)
            .chain(self.auto_keyword_pairs.iter().map(|(t, _)| t.as_str()))
            .collect()
    }
}

/// Run every mining stage over `records` with `config`.
///
/// Total: degenerate input (empty corpus, placeholder cells, a target below
/// the fixed keyword count) yields empty or clamped outputs, never an error.
#[must_use]
pub fn analyze(records: &[ProductRecord], config: &MinerConfig) -> Analysis {
    let _span = info_span!("analyze", records = records.len()).entered();
    let lexicon = Lexicon::from_config(config);

    // Titles → fixed + auto keywords
    let title_table: FrequencyTable = records
        .iter()
        .filter_map(|r| r.title.as_deref())
        .flat_map(|title| lexicon.tokenize(title))
        .collect();
    debug!(distinct = title_table.len(), "Counted title terms");

    let fixed = resolve_fixed_keywords(&config.manual_keyword_groups, &lexicon);
    let auto = select_auto_keywords(
        &title_table.ranked(),
        fixed.as_slice(),
        config.target_title_keyword_count,
        config.auto_filter_policy,
    );
    let auto_keyword_pairs = reorder_for_readability(auto, &config.readability);

    // Attributes
    let attribute_pairs = mine_attributes(
        records.iter().map(|r| r.attributes.as_deref()),
        &lexicon,
        &config.attribute_separator,
        config.attribute_top_k,
    );

    // Tags: count first, filter second
    let raw_tag_frequency = count_raw_tags(
        records
            .iter()
            .map(|r| r.tags.as_deref().filter(|f| !lexicon.is_placeholder(f))),
        &config.tag_separator,
    );
    let used = UsedTerms::new(
        fixed
            .as_slice()
            .iter()
            .chain(auto_keyword_pairs.iter().map(|(t, _)| t))
            .chain(attribute_pairs.iter().map(|(v, _)| v))
            .cloned(),
    );
    let selection = TagSelector::new(&lexicon, config).select(&raw_tag_frequency, &used);

    Analysis {
        fixed_keywords: fixed.into_vec(),
        auto_keyword_pairs,
        attribute_pairs,
        tag_pairs: selection.tags,
        raw_tag_frequency,
        tag_rejections: selection.rejections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_corpus_yields_empty_outputs() {
        let analysis = analyze(&[], &MinerConfig::default());
        assert!(analysis.fixed_keywords.is_empty());
        assert!(analysis.auto_keyword_pairs.is_empty());
        assert!(analysis.attribute_pairs.is_empty());
        assert!(analysis.tag_pairs.is_empty());
        assert!(analysis.raw_tag_frequency.is_empty());
    }

    #[test]
    fn malformed_cells_contribute_nothing() {
        let records = [
            ProductRecord::default(),
            ProductRecord {
                title: Some("-".to_string()),
                attributes: None,
                tags: Some("nan".to_string()),
            },
        ];
        let analysis = analyze(&records, &MinerConfig::default());
        assert!(analysis.auto_keyword_pairs.is_empty());
        assert!(analysis.raw_tag_frequency.is_empty());
    }

    #[test]
    fn tags_avoid_title_and_attribute_terms() {
        let records = [
            ProductRecord::new("전지분유 우유", "국산|분말", "우유,국산,간식"),
            ProductRecord::new("전지분유", "국산", "우유,선물"),
        ];
        let config = MinerConfig {
            target_title_keyword_count: 3,
            ..MinerConfig::default()
        };
        let analysis = analyze(&records, &config);

        assert_eq!(analysis.title_keywords(), ["전지분유", "우유"]);
        assert_eq!(
            analysis.tag_pairs,
            [("간식".to_string(), 1), ("선물".to_string(), 1)]
        );
        // Raw counts ignore the filters.
        assert_eq!(analysis.raw_tag_frequency.count("우유"), 2);
        assert_eq!(analysis.raw_tag_frequency.count("국산"), 1);
    }

    #[test]
    fn manual_groups_precede_auto_keywords() {
        let records = [ProductRecord::new("고소한 전지분유", "", "")];
        let config = MinerConfig {
            manual_keyword_groups: vec!["전지분유".to_string(), "대용량 1kg".to_string()],
            target_title_keyword_count: 4,
            ..MinerConfig::default()
        };
        let analysis = analyze(&records, &config);
        assert_eq!(analysis.title_keywords(), ["전지분유", "대용량", "1kg", "고소한"]);
    }

    #[test]
    fn placeholder_pieces_stay_out_of_selected_tags() {
        let records = [
            ProductRecord::new("우유", "", "간식,-,nan"),
            ProductRecord::new("우유", "", "선물,-,nan"),
        ];
        let analysis = analyze(&records, &MinerConfig::default());

        assert_eq!(
            analysis.tag_pairs,
            [("간식".to_string(), 1), ("선물".to_string(), 1)]
        );
        // Still counted in the unfiltered table
        assert_eq!(analysis.raw_tag_frequency.count("-"), 2);
        assert_eq!(analysis.raw_tag_frequency.count("nan"), 2);
    }
}
