//! Keyword Miner Library
//!
//! Mines title keywords, attribute values and tags from a corpus of competitor
//! product listings.
//!
//! # Features
//!
//! - **Title keywords**: fixed keyword groups plus frequency-ranked auto keywords,
//!   reordered for readability
//! - **Attributes**: top attribute values across the corpus
//! - **Tags**: redundancy-free tag selection with semantic clusters and pluggable
//!   acceptance rules
//! - **Reports**: text, JSON or YAML on stdout, CSV export
//!
//! The mining engine lives in [`keyword_miner_core`] and is re-exported as
//! [`engine`]; this crate adds configuration, corpus loading and reporting.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod report;

pub use error::{Error, Result};
pub use keyword_miner_core as engine;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Setup tracing/logging
///
/// Logs go to stderr so reports on stdout stay machine-readable.
pub fn setup_tracing(level: &str, format: Option<&str>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry().with(filter);

    match format {
        Some("json") => {
            subscriber
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            subscriber
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
