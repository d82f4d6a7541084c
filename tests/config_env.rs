//! Environment overrides for configuration
//!
//! Kept in its own test binary: loading the env file mutates the process
//! environment.

use keyword_miner::config::Config;
use pretty_assertions::assert_eq;

#[test]
fn test_env_file_overrides_yaml_values() {
    let dir = tempfile::tempdir().unwrap();
    let env_path = dir.path().join("miner.env");
    std::fs::write(
        &env_path,
        "KEYWORD_MINER_ANALYSIS__TAG_TARGET_COUNT=4\nKEYWORD_MINER_CORPUS__TAG_COLUMN=tags\n",
    )
    .unwrap();

    let config_path = dir.path().join("miner.yaml");
    std::fs::write(
        &config_path,
        format!(
            "env_files: [\"{}\", \"/nonexistent/.env\"]\nanalysis:\n  tag_target_count: 7\n  attribute_top_k: 5\n",
            env_path.display()
        ),
    )
    .unwrap();

    let config = Config::load(Some(&config_path)).unwrap();

    // GIVEN env value wins over YAML, untouched YAML values stay
    assert_eq!(config.analysis.tag_target_count, 4);
    assert_eq!(config.analysis.attribute_top_k, 5);
    assert_eq!(config.corpus.tag_column, "tags");
    assert_eq!(config.corpus.title_column, "상품명");
}
