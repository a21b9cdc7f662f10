//! Settings file parsing.

use std::fs;
use std::time::Duration;

use roster_cli::config::{GeneratorConfig, Settings};
use roster_model::ValidationThresholds;
use roster_rules::{DEFAULT_API_KEY_ENV, DEFAULT_MODEL, GenerationError};
use tempfile::TempDir;

#[test]
fn no_file_means_defaults() {
    let settings = Settings::load(None).expect("defaults");
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.generator.model, DEFAULT_MODEL);
    assert_eq!(settings.generator.api_key_env, DEFAULT_API_KEY_ENV);
    assert_eq!(settings.generator.timeout(), Duration::from_secs(30));
}

#[test]
fn partial_tables_keep_other_defaults() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("roster.toml");
    fs::write(
        &path,
        "[generator]\nmodel = \"gpt-4o\"\ntimeout_secs = 5\n\n[thresholds]\nmax_duration = 12.0\n",
    )
    .expect("write settings");

    let settings = Settings::load(Some(path.as_path())).expect("load");
    assert_eq!(settings.generator.model, "gpt-4o");
    assert_eq!(settings.generator.timeout(), Duration::from_secs(5));
    assert_eq!(
        settings.generator.base_url,
        GeneratorConfig::default().base_url
    );
    assert_eq!(settings.thresholds.max_duration, 12.0);
    assert_eq!(
        settings.thresholds.high_priority_from,
        ValidationThresholds::default().high_priority_from
    );
}

#[test]
fn bad_files_are_errors() {
    let dir = TempDir::new().expect("temp dir");
    let missing = dir.path().join("missing.toml");
    let error = Settings::load(Some(missing.as_path())).unwrap_err();
    assert!(format!("{error:#}").contains("read settings"));

    let broken = dir.path().join("broken.toml");
    fs::write(&broken, "[generator\nmodel = 1").expect("write settings");
    let error = Settings::load(Some(broken.as_path())).unwrap_err();
    assert!(format!("{error:#}").contains("parse settings"));

    assert!(Settings::from_toml("[thresholds]\nmax_requested_tasks = \"many\"\n").is_err());
}

#[test]
fn missing_api_key_is_reported_by_name() {
    let config = GeneratorConfig {
        api_key_env: "ROSTER_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
        ..GeneratorConfig::default()
    };
    let error = config.client_settings().unwrap_err();
    assert!(matches!(
        error,
        GenerationError::MissingApiKey(ref name) if name == "ROSTER_TEST_KEY_THAT_IS_NEVER_SET"
    ));
}
