//! Integration tests for configuration loading.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

use agentic_router::config::{ENV_INTELLIGENCE_LEVEL, ENV_MAX_MODELS, RouterConfig};
use agentic_router::models::IntelligenceLevel;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_full_file() {
    let file = write_config(
        r#"
intelligence_level = "predictive"
max_models = 3
history_capacity = 50
deep_thinker_threshold = 0.5

[observability.logging]
format = "json"
level = "info"

[observability.metrics]
enabled = false
"#,
    );

    let config = RouterConfig::load_from_file(file.path()).unwrap();
    assert_eq!(config.intelligence_level, IntelligenceLevel::Predictive);
    assert_eq!(config.max_models, 3);
    assert_eq!(config.history_capacity, 50);
    assert_eq!(config.deep_thinker_threshold, 0.5);
    assert_eq!(config.router_max_models, 3);

    let logging = config.observability.logging.unwrap();
    assert_eq!(logging.format.as_deref(), Some("json"));
    assert_eq!(config.observability.metrics.unwrap().enabled, Some(false));
}

#[test]
fn test_numeric_level() {
    let file = write_config("intelligence_level = 5\n");
    let config = RouterConfig::load_from_file(file.path()).unwrap();
    assert_eq!(config.intelligence_level, IntelligenceLevel::Orchestrative);
}

#[test]
fn test_unknown_key_rejected() {
    let file = write_config("max_modles = 3\n");
    assert!(RouterConfig::load_from_file(file.path()).is_err());
}

#[test]
fn test_invalid_level_rejected() {
    let file = write_config("intelligence_level = \"omniscient\"\n");
    assert!(RouterConfig::load_from_file(file.path()).is_err());
}

#[test]
fn test_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(RouterConfig::load_from_file(&dir.path().join("absent.toml")).is_err());
}

#[test]
fn test_env_overrides_file_values() {
    let file = write_config("intelligence_level = \"reactive\"\nmax_models = 6\n");
    let config = RouterConfig::load_from_file(file.path())
        .unwrap()
        .with_overrides_from(|key| match key {
            ENV_INTELLIGENCE_LEVEL => Some("orchestrative".to_string()),
            ENV_MAX_MODELS => Some("2".to_string()),
            _ => None,
        });

    assert_eq!(config.intelligence_level, IntelligenceLevel::Orchestrative);
    assert_eq!(config.max_models, 2);
}

#[test]
fn test_load_first_skips_and_reports_invalid_files() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.toml");
    let broken = write_config("max_models = \"lots\"\n");
    let valid = write_config("max_models = 6\n");
    let paths = vec![
        missing,
        broken.path().to_path_buf(),
        valid.path().to_path_buf(),
    ];

    let mut reported = Vec::new();
    let config = RouterConfig::load_first(&paths, |path, _| reported.push(path.to_path_buf()));

    assert_eq!(config.max_models, 6);
    assert_eq!(reported, vec![broken.path().to_path_buf()]);
}

#[test]
fn test_load_first_falls_back_to_defaults() {
    let broken = write_config("intelligence_level = 9\n");
    let mut reported = 0;
    let config = RouterConfig::load_first(&[broken.path().to_path_buf()], |_, _| reported += 1);

    assert_eq!(config, RouterConfig::default());
    assert_eq!(reported, 1);
}
