//! Command-line interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::OutputFormat;

/// Keyword Miner - title, attribute and tag recommendations from competitor listings
#[derive(Parser, Debug)]
#[command(name = "keyword-miner")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short, long, env = "KEYWORD_MINER_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        long,
        default_value = "info",
        env = "KEYWORD_MINER_LOG_LEVEL",
        global = true
    )]
    pub log_level: String,

    /// Log format (text, json)
    #[arg(long, env = "KEYWORD_MINER_LOG_FORMAT", global = true)]
    pub log_format: Option<String>,

    /// Subcommand
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Mine keywords, attributes and tags from a CSV corpus
    Analyze {
        /// Path to the corpus CSV (UTF-8, header row)
        #[arg(required = true)]
        corpus: PathBuf,

        /// Report format (overrides `output.format`)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Also write the report as CSV rows to this path
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Fixed keyword group, repeatable (appended to `analysis.manual_keyword_groups`)
        #[arg(short, long = "keywords", value_name = "GROUP")]
        keywords: Vec<String>,

        /// Excluded word, repeatable (appended to `analysis.user_exclude_list`)
        #[arg(short = 'x', long = "exclude", value_name = "WORD")]
        exclude: Vec<String>,

        /// Title keyword target (overrides `analysis.target_title_keyword_count`)
        #[arg(short, long)]
        target: Option<usize>,
    },

    /// Show how a text is tokenized under the current configuration
    Tokenize {
        /// Text to tokenize
        #[arg(required = true)]
        text: String,

        /// Use manual tokenization (no filtering or compound splitting)
        #[arg(long)]
        manual: bool,
    },

    /// Print the effective configuration as YAML
    Config,
}
