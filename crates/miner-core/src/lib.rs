//! Keyword Miner core library
//!
//! Mines keyword recommendations for catalog listings from a corpus of
//! competitor product records. Each record contributes a title, a delimited
//! attribute list and a delimited tag list; one run produces:
//!
//! - **Title keywords**: manual (fixed) keywords followed by corpus-mined
//!   terms, reordered for readability
//! - **Attribute values**: top values by frequency
//! - **Tags**: a diversified, redundancy-free selection, plus the raw
//!   unfiltered tag counts for audit
//!
//! The engine is synchronous, holds no global state and never fails: every
//! run is a pure function of `(records, config)`.
//!
//! # Example
//!
//! ```rust
//! use keyword_miner_core::{MinerConfig, ProductRecord, analyze};
//!
//! let records = vec![
//!     ProductRecord::new("전지분유 1kg 자판기우유", "분말|국산", "자판기,우유"),
//!     ProductRecord::new("자판기우유 전지분유", "분말", "자판기,간식"),
//! ];
//! let config = MinerConfig {
//!     compound_dictionary: vec!["자판기".into(), "우유".into(), "분유".into(), "전지".into()],
//!     ..MinerConfig::default()
//! };
//!
//! let analysis = analyze(&records, &config);
//! assert_eq!(analysis.raw_tag_frequency.count("자판기"), 2);
//! assert!(analysis.title_keywords().contains(&"분유"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod analysis;
pub mod attributes;
pub mod frequency;
pub mod keywords;
pub mod lexicon;
pub mod readability;
pub mod settings;
pub mod tags;

pub use analysis::{Analysis, ProductRecord, analyze};
pub use frequency::FrequencyTable;
pub use keywords::KeywordSet;
pub use lexicon::Lexicon;
pub use readability::ReadabilityOntology;
pub use settings::{
    AutoFilterPolicy, MinerConfig, ModifierPrefix, OverlapPolicy, RedundancyPolicy, Script,
    SemanticCluster,
};
pub use tags::{RejectReason, TagSelection};
