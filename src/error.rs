//! Error types for Keyword Miner

use std::io;

use thiserror::Error;

/// Result type alias for Keyword Miner
pub type Result<T> = std::result::Result<T, Error>;

/// Keyword Miner errors
///
/// The mining engine itself never fails; these cover the surfaces around it
/// (configuration, corpus loading, report output).
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Corpus could not be read
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// A required corpus column is absent
    #[error("Missing column '{column}' (available: {available})")]
    MissingColumn {
        /// Column that was looked up
        column: String,
        /// Header names found in the file
        available: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Create a missing-column error from the headers that were found
    pub fn missing_column(column: impl Into<String>, headers: &[String]) -> Self {
        Self::MissingColumn {
            column: column.into(),
            available: headers.join(", "),
        }
    }

    /// Process exit code for this error
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            Self::Corpus(_) | Self::MissingColumn { .. } | Self::Csv(_) => 3,
            Self::Io(_) | Self::Json(_) | Self::Yaml(_) => 1,
        }
    }
}
