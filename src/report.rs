//! Report rendering and export
//!
//! Wraps an [`Analysis`] with the display-side extras: the joined title
//! string and its marketplace byte length.

use std::fmt::Write as _;
use std::io;
use std::path::Path;

use keyword_miner_core::Analysis;
use serde::Serialize;

use crate::config::OutputFormat;
use crate::{Error, Result};

/// Rows shown per section in text output
const TEXT_SECTION_LIMIT: usize = 20;

/// Analysis output ready for display or export
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Records analyzed
    pub records: usize,
    /// Title keywords joined by single spaces
    pub title: String,
    /// Byte length of `title` as marketplaces count it
    pub title_byte_length: usize,
    /// Engine outputs
    #[serde(flatten)]
    pub analysis: Analysis,
}

impl Report {
    /// Build a report from one run's analysis
    #[must_use]
    pub fn from_analysis(analysis: Analysis, records: usize) -> Self {
        let title = analysis.title_keywords().join(" ");
        Self {
            records,
            title_byte_length: marketplace_byte_len(&title),
            title,
            analysis,
        }
    }

    /// Render in the requested format
    ///
    /// # Errors
    ///
    /// Returns an error if JSON or YAML serialization fails.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(self)?),
        }
    }

    /// Human-readable rendering
    #[must_use]
    pub fn render_text(&self) -> String {
        let a = &self.analysis;
        let mut out = String::new();

        let _ = writeln!(out, "📦 {} record(s) analyzed\n", self.records);
        let _ = writeln!(out, "Title ({} bytes):", self.title_byte_length);
        let _ = writeln!(out, "  {}\n", self.title);

        let _ = writeln!(out, "Fixed keywords ({}):", a.fixed_keywords.len());
        if a.fixed_keywords.is_empty() {
            let _ = writeln!(out, "  (none)");
        } else {
            let _ = writeln!(out, "  {}", a.fixed_keywords.join(", "));
        }
        out.push('\n');

        write_pairs(&mut out, "Auto keywords", &a.auto_keyword_pairs);
        write_pairs(&mut out, "Attributes", &a.attribute_pairs);
        write_pairs(&mut out, "Tags", &a.tag_pairs);

        let raw = a.raw_tag_frequency.ranked();
        let shown: Vec<_> = raw.iter().take(TEXT_SECTION_LIMIT).cloned().collect();
        write_pairs(
            &mut out,
            &format!("Raw tag counts (top {} of {})", shown.len(), raw.len()),
            &shown,
        );

        if !a.tag_rejections.is_empty() {
            let _ = writeln!(out, "Rejected tags ({}):", a.tag_rejections.len());
            for (tag, reason) in a.tag_rejections.iter().take(TEXT_SECTION_LIMIT) {
                let _ = writeln!(out, "  • {tag}: {reason}");
            }
        }

        out
    }

    /// Write every section as `section,rank,term,count,note` CSV rows
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let a = &self.analysis;
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["section", "rank", "term", "count", "note"])?;

        for (rank, term) in a.fixed_keywords.iter().enumerate() {
            wtr.write_record(["fixed", (rank + 1).to_string().as_str(), term.as_str(), "", ""])?;
        }
        let sections = [
            ("auto", &a.auto_keyword_pairs),
            ("attribute", &a.attribute_pairs),
            ("tag", &a.tag_pairs),
        ];
        for (section, pairs) in sections {
            write_pair_rows(&mut wtr, section, pairs)?;
        }
        write_pair_rows(&mut wtr, "raw_tag", &a.raw_tag_frequency.ranked())?;
        for (rank, (tag, reason)) in a.tag_rejections.iter().enumerate() {
            wtr.write_record([
                "rejected_tag",
                (rank + 1).to_string().as_str(),
                tag.as_str(),
                a.raw_tag_frequency.count(tag).to_string().as_str(),
                reason.to_string().as_str(),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }

    /// Export CSV rows to `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn export_csv(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path).map_err(|e| {
            Error::Io(io::Error::new(
                e.kind(),
                format!("cannot create export file {}: {e}", path.display()),
            ))
        })?;
        self.write_csv(file)?;
        tracing::info!(path = %path.display(), "Exported report");
        Ok(())
    }
}

/// Byte length under the legacy double-byte rule: ASCII counts 1, any other
/// character 2.
#[must_use]
pub fn marketplace_byte_len(text: &str) -> usize {
    text.chars().map(|c| if c.is_ascii() { 1 } else { 2 }).sum()
}

fn write_pairs(out: &mut String, heading: &str, pairs: &[(String, usize)]) {
    let _ = writeln!(out, "{heading} ({}):", pairs.len());
    if pairs.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for (rank, (term, count)) in pairs.iter().enumerate() {
        let _ = writeln!(out, "  {:>2}. {term} ({count})", rank + 1);
    }
    out.push('\n');
}

fn write_pair_rows<W: io::Write>(
    wtr: &mut csv::Writer<W>,
    section: &str,
    pairs: &[(String, usize)],
) -> Result<()> {
    for (rank, (term, count)) in pairs.iter().enumerate() {
        wtr.write_record([
            section,
            (rank + 1).to_string().as_str(),
            term.as_str(),
            count.to_string().as_str(),
            "",
        ])?;
    }
    Ok(())
}
