//! Corpus loading from CSV exports
//!
//! Marketplace exports arrive as CSV with a header row. Files are decoded as
//! UTF-8 (a leading byte-order mark is dropped) or, failing that, as CP949,
//! the code page spreadsheet software uses for Korean CSV exports. Columns
//! are located by name (see [`CorpusConfig`]). Missing columns are reported
//! here, before the engine runs. Short rows produce `None` cells, which the
//! engine treats as empty.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use encoding_rs::EUC_KR;
use keyword_miner_core::ProductRecord;
use tracing::{debug, info};

use crate::config::CorpusConfig;
use crate::{Error, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Records plus the brand names found in the optional brand column
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    /// Product records in file order
    pub records: Vec<ProductRecord>,
    /// Distinct brand names, first-seen order
    pub brands: Vec<String>,
}

impl Corpus {
    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Return `true` if the corpus has no record
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Load a CSV corpus from `path`
///
/// # Errors
///
/// Returns an error if the file cannot be opened, is neither UTF-8 nor
/// CP949, or lacks a required column.
pub fn load_csv(path: &Path, columns: &CorpusConfig) -> Result<Corpus> {
    let file = File::open(path).map_err(|e| {
        Error::Corpus(format!("Cannot open {}: {e}", path.display()))
    })?;
    let corpus = read_csv(file, columns)?;
    info!(
        path = %path.display(),
        records = corpus.len(),
        brands = corpus.brands.len(),
        "Loaded corpus"
    );
    Ok(corpus)
}

/// Read a CSV corpus from any reader
///
/// # Errors
///
/// See [`load_csv`].
pub fn read_csv<R: Read>(mut reader: R, columns: &CorpusConfig) -> Result<Corpus> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| Error::Corpus(format!("Cannot read corpus: {e}")))?;
    let text = decode(&bytes)?;

    let mut csv = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = csv.headers()?.iter().map(str::to_string).collect();

    let find = |name: &str| headers.iter().position(|h| h == name);
    let require = |name: &str| find(name).ok_or_else(|| Error::missing_column(name, &headers));

    let title = require(&columns.title_column)?;
    let attributes = require(&columns.attribute_column)?;
    let tags = require(&columns.tag_column)?;
    let brand = columns.brand_column.as_deref().and_then(find);
    debug!(title, attributes, tags, ?brand, "Resolved corpus columns");

    let mut corpus = Corpus::default();
    let mut seen_brands = HashSet::new();
    for row in csv.records() {
        let row = row?;
        let cell = |idx: usize| row.get(idx).map(str::to_string);

        if let Some(name) = brand.and_then(|idx| row.get(idx)).map(str::trim) {
            if !name.is_empty() && seen_brands.insert(name.to_string()) {
                corpus.brands.push(name.to_string());
            }
        }

        corpus.records.push(ProductRecord {
            title: cell(title),
            attributes: cell(attributes),
            tags: cell(tags),
        });
    }
    Ok(corpus)
}

/// Decode corpus bytes: UTF-8 first, CP949 as the fallback.
fn decode(bytes: &[u8]) -> Result<Cow<'_, str>> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(Cow::Borrowed(text));
    }

    // EUC-KR as WHATWG defines it is the full windows-949 table
    let (text, had_errors) = EUC_KR.decode_without_bom_handling(bytes);
    if had_errors {
        return Err(Error::Corpus(
            "Corpus is neither UTF-8 nor CP949; re-save the file as UTF-8".to_string(),
        ));
    }
    debug!("Decoded corpus as CP949");
    Ok(text)
}
