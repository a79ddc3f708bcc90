use std::fs;
use std::path::PathBuf;

use skemi::config::Config;
use skemi::search::Tokenization;
use skemi::test_utils::{TestCase, run_table_tests};

fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

#[test]
fn config_sections_from_fixture() -> Result<(), String> {
    let cases = vec![
        TestCase {
            name: "default",
            input: "tests/fixtures/configs/default.toml",
            expected: (
                "Train/VectorData.json".to_string(),
                10u64,
                Tokenization::Ascii,
                1usize,
                true,
            ),
        },
        TestCase {
            name: "custom",
            input: "tests/fixtures/configs/custom.toml",
            expected: (
                "https://notes.example.com/VectorData.json".to_string(),
                10u64,
                Tokenization::Unicode,
                3usize,
                true,
            ),
        },
    ];

    run_table_tests(cases, |relative_path| {
        let content = fs::read_to_string(fixture_path(relative_path)).expect("read fixture");
        let config = Config::from_toml_str(&content).expect("parse config");
        (
            config.corpus.source,
            config.corpus.timeout_secs,
            config.embedding.tokenization,
            config.matching.top_k,
            config.matching.parallel,
        )
    })?;
    Ok(())
}

#[test]
fn explicit_config_file_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[matching]\ntop_k = 4\nparallel = false\n").unwrap();

    let config = Config::load(Some(path.as_path()), dir.path()).unwrap();
    assert_eq!(config.matching.top_k, 4);
    assert!(!config.matching.parallel);
}

#[test]
fn missing_explicit_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load(Some(dir.path().join("nope.toml").as_path()), dir.path()).unwrap();
    assert_eq!(config.embedding.tokenization, Tokenization::Ascii);
}

#[test]
fn malformed_config_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[matching\ntop_k = ").unwrap();

    let err = Config::load(Some(path.as_path()), dir.path()).unwrap_err();
    assert_eq!(err.code(), "config_error");
}

#[test]
fn env_lookup_overrides_file_values() {
    let content = fs::read_to_string(fixture_path("tests/fixtures/configs/custom.toml")).unwrap();
    let mut config = Config::from_toml_str(&content).unwrap();
    config
        .apply_env_overrides(&|key| match key {
            "SKEMI_CORPUS_SOURCE" => Some("local/topics.json".to_string()),
            "SKEMI_EMBEDDING_TOKENIZATION" => Some("ASCII".to_string()),
            _ => None,
        })
        .unwrap();

    assert_eq!(config.corpus.source, "local/topics.json");
    assert_eq!(config.embedding.tokenization, Tokenization::Ascii);
    assert_eq!(config.matching.top_k, 3);
}
