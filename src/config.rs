//! Configuration management

use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::ValueEnum;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use keyword_miner_core::MinerConfig;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Prefix of environment overrides, e.g. `KEYWORD_MINER_ANALYSIS__TAG_TARGET_COUNT=5`
pub const ENV_PREFIX: &str = "KEYWORD_MINER_";

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Environment files to load before environment overrides are read.
    /// Paths support ~ expansion. Loaded in order; existing variables win.
    pub env_files: Vec<String>,
    /// Mining engine configuration
    pub analysis: MinerConfig,
    /// Word lists kept in external files
    pub dictionaries: DictionaryFiles,
    /// Corpus column mapping
    pub corpus: CorpusConfig,
    /// Report output
    pub output: OutputConfig,
}

/// Word lists loaded from plain-text files (one entry per line, `#` comments)
/// and appended to the matching `analysis` lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryFiles {
    /// Files of brand names
    pub brands: Vec<PathBuf>,
    /// Files of excluded words
    pub excludes: Vec<PathBuf>,
    /// Files of compound sub-terms
    pub compounds: Vec<PathBuf>,
}

/// Column names of the corpus file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Title column
    pub title_column: String,
    /// Attribute list column
    pub attribute_column: String,
    /// Tag list column
    pub tag_column: String,
    /// Optional brand column; its values join the exclusion set
    pub brand_column: Option<String>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            title_column: "상품명".to_string(),
            attribute_column: "속성".to_string(),
            tag_column: "태그".to_string(),
            brand_column: Some("브랜드".to_string()),
        }
    }
}

/// Report output configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Report format
    pub format: OutputFormat,
}

/// Report format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON document
    Json,
    /// YAML document
    Yaml,
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// # Errors
    ///
    /// Returns an error if the config file does not exist or cannot be parsed,
    /// if a dictionary file is missing, or if validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new();

        // Load from file if provided
        if let Some(p) = path {
            if !p.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            figment = figment.merge(Yaml::file(p));
        }

        // Env files must land in the process environment before overrides are read
        let env_files: Vec<String> = figment.extract_inner("env_files").unwrap_or_default();
        load_env_files(&env_files);

        // Merge environment variables (KEYWORD_MINER_ prefix)
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let mut config: Self = figment
            .extract()
            .map_err(|e| Error::Config(e.to_string()))?;

        config.load_dictionary_files()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings the engine would silently degrade on.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] describing the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        let analysis = &self.analysis;
        if analysis.target_title_keyword_count == 0 {
            return Err(Error::Config(
                "analysis.target_title_keyword_count must be at least 1".to_string(),
            ));
        }
        if analysis.attribute_separator.is_empty() || analysis.tag_separator.is_empty() {
            return Err(Error::Config(
                "analysis separators must not be empty".to_string(),
            ));
        }
        if analysis.tag_pool_limit < analysis.tag_target_count {
            return Err(Error::Config(format!(
                "analysis.tag_pool_limit ({}) is below analysis.tag_target_count ({})",
                analysis.tag_pool_limit, analysis.tag_target_count
            )));
        }
        if let Some(prefix) = analysis.modifier_prefix {
            if prefix.short_len == 0 || prefix.long_len == 0 {
                return Err(Error::Config(
                    "analysis.modifier_prefix lengths must be at least 1".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Append word lists from `dictionaries` to the analysis lists.
    fn load_dictionary_files(&mut self) -> Result<()> {
        for path in &self.dictionaries.brands {
            self.analysis.brand_names.extend(read_word_list(path)?);
        }
        for path in &self.dictionaries.excludes {
            self.analysis.user_exclude_list.extend(read_word_list(path)?);
        }
        for path in &self.dictionaries.compounds {
            self.analysis.compound_dictionary.extend(read_word_list(path)?);
        }
        Ok(())
    }

    /// Render the effective configuration as YAML
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Read a word list: one entry per line, blank lines and `#` comments skipped.
///
/// # Errors
///
/// Returns [`Error::Config`] if the file cannot be read.
pub fn read_word_list(path: &Path) -> Result<Vec<String>> {
    let expanded = expand_home(&path.to_string_lossy());
    let content = fs::read_to_string(&expanded).map_err(|e| {
        Error::Config(format!("Cannot read word list {expanded}: {e}"))
    })?;
    let words: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();
    tracing::debug!(path = %expanded, words = words.len(), "Loaded word list");
    Ok(words)
}

/// Load environment files into the process environment.
/// Supports ~ expansion. Files that don't exist are silently skipped.
fn load_env_files(paths: &[String]) {
    for path_str in paths {
        let expanded = expand_home(path_str);
        let path = Path::new(&expanded);
        if path.exists() {
            match dotenvy::from_path(path) {
                Ok(()) => {
                    tracing::info!("Loaded env file: {expanded}");
                }
                Err(e) => {
                    tracing::warn!("Failed to load env file {expanded}: {e}");
                }
            }
        } else {
            tracing::debug!("Env file not found (skipped): {expanded}");
        }
    }
}

/// Replace a leading `~` with the home directory.
fn expand_home(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.display().to_string(), 1);
        }
    }
    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyword_miner_core::{OverlapPolicy, RedundancyPolicy};
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.corpus.tag_column, "태그");
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_analysis_section_deserialized_from_yaml() {
        let yaml = r#"
analysis:
  target_title_keyword_count: 8
  manual_keyword_groups: ["전지분유", "대용량"]
  redundancy_policy: prefer-shorter
  overlap_policy: subterm
  clusters:
    - name: gift
      match_keywords: ["선물"]
corpus:
  tag_column: tags
output:
  format: json
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.analysis.target_title_keyword_count, 8);
        assert_eq!(config.analysis.manual_keyword_groups.len(), 2);
        assert_eq!(config.analysis.redundancy_policy, RedundancyPolicy::PreferShorter);
        assert_eq!(config.analysis.overlap_policy, OverlapPolicy::Subterm);
        assert_eq!(config.analysis.clusters[0].name, "gift");
        assert_eq!(config.analysis.tag_target_count, 10);
        assert_eq!(config.corpus.tag_column, "tags");
        assert_eq!(config.corpus.title_column, "상품명");
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_validate_rejects_zero_target() {
        let mut config = Config::default();
        config.analysis.target_title_keyword_count = 0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_pool_below_target() {
        let mut config = Config::default();
        config.analysis.tag_pool_limit = 5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_separator() {
        let mut config = Config::default();
        config.analysis.tag_separator = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_read_word_list_skips_comments_and_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brands.txt");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "# brands").unwrap();
        writeln!(f, "남양").unwrap();
        writeln!(f).unwrap();
        writeln!(f, "  매일  ").unwrap();
        drop(f);

        assert_eq!(read_word_list(&path).unwrap(), ["남양", "매일"]);
    }

    #[test]
    fn test_load_merges_dictionary_files() {
        let dir = tempfile::tempdir().unwrap();
        let words = dir.path().join("compounds.txt");
        std::fs::write(&words, "자판기\n우유\n").unwrap();
        let config_path = dir.path().join("miner.yaml");
        std::fs::write(
            &config_path,
            format!(
                "analysis:\n  compound_dictionary: [\"분유\"]\ndictionaries:\n  compounds: [\"{}\"]\n",
                words.display()
            ),
        )
        .unwrap();

        let config = Config::load(Some(&config_path)).unwrap();
        assert_eq!(config.analysis.compound_dictionary, ["분유", "자판기", "우유"]);
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let err = Config::load(Some(Path::new("/nonexistent/miner.yaml"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_missing_dictionary_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("miner.yaml");
        std::fs::write(&config_path, "dictionaries:\n  brands: [\"/nonexistent/brands.txt\"]\n")
            .unwrap();
        assert!(matches!(
            Config::load(Some(&config_path)),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_load_env_files_skips_missing() {
        // Should not panic
        load_env_files(&["/nonexistent/path/.env".to_string()]);
    }

    #[test]
    fn test_expand_home_leaves_plain_paths() {
        assert_eq!(expand_home("/tmp/words.txt"), "/tmp/words.txt");
    }

    #[test]
    fn test_to_yaml_round_trips_policies() {
        let yaml = Config::default().to_yaml().unwrap();
        assert!(yaml.contains("redundancy_policy: prefer-longer"));
        assert!(yaml.contains("tag_pool_limit: 300"));
    }
}
