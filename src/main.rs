//! Keyword Miner - keyword recommendations from competitor product listings

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing::{info, warn};

use keyword_miner::{
    Result,
    cli::{Cli, Command},
    config::{Config, OutputFormat},
    corpus,
    engine::{Lexicon, analyze},
    report::Report,
    setup_tracing,
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup tracing
    if let Err(e) = setup_tracing(&cli.log_level, cli.log_format.as_deref()) {
        eprintln!("Failed to setup tracing: {e}");
        return ExitCode::FAILURE;
    }

    let result = match cli.command {
        Command::Analyze {
            corpus,
            format,
            export,
            keywords,
            exclude,
            target,
        } => {
            let overrides = AnalyzeOverrides {
                keywords,
                exclude,
                target,
            };
            run_analyze(
                cli.config.as_deref(),
                &corpus,
                format,
                export.as_deref(),
                overrides,
            )
        }
        Command::Tokenize { text, manual } => run_tokenize(cli.config.as_deref(), &text, manual),
        Command::Config => run_config(cli.config.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

/// Command-line additions to the configured analysis
struct AnalyzeOverrides {
    keywords: Vec<String>,
    exclude: Vec<String>,
    target: Option<usize>,
}

/// Run the analyze command
fn run_analyze(
    config_path: Option<&Path>,
    corpus_path: &Path,
    format: Option<OutputFormat>,
    export: Option<&Path>,
    overrides: AnalyzeOverrides,
) -> Result<()> {
    let mut config = Config::load(config_path)?;

    // Apply CLI overrides
    config.analysis.manual_keyword_groups.extend(overrides.keywords);
    config.analysis.user_exclude_list.extend(overrides.exclude);
    if let Some(target) = overrides.target {
        config.analysis.target_title_keyword_count = target;
    }
    config.validate()?;

    let corpus = corpus::load_csv(corpus_path, &config.corpus)?;
    if corpus.is_empty() {
        warn!(path = %corpus_path.display(), "Corpus has no records; the report will be empty");
    }

    let lexicon = Lexicon::from_config(&config.analysis);
    let brands: Vec<String> = corpus
        .brands
        .into_iter()
        .filter(|brand| !lexicon.is_placeholder(brand))
        .collect();
    config.analysis.brand_names.extend(brands);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        records = corpus.records.len(),
        fixed_groups = config.analysis.manual_keyword_groups.len(),
        brands = config.analysis.brand_names.len(),
        "Starting analysis"
    );

    let analysis = analyze(&corpus.records, &config.analysis);
    let report = Report::from_analysis(analysis, corpus.records.len());

    println!("{}", report.render(format.unwrap_or(config.output.format))?);

    if let Some(path) = export {
        report.export_csv(path)?;
    }
    Ok(())
}

/// Run the tokenize command
fn run_tokenize(config_path: Option<&Path>, text: &str, manual: bool) -> Result<()> {
    let config = Config::load(config_path)?;
    let lexicon = Lexicon::from_config(&config.analysis);

    let tokens = if manual {
        lexicon.tokenize_manual(text)
    } else {
        lexicon.tokenize(text)
    };

    if tokens.is_empty() {
        println!("(no tokens)");
    }
    for token in &tokens {
        println!("{token}");
    }
    Ok(())
}

/// Run the config command
fn run_config(config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;
    print!("{}", config.to_yaml()?);
    Ok(())
}
