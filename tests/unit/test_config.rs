//! Unit tests for the config module
//!
//! Tests cover:
//! - Defaults
//! - Loading from an explicit TOML file
//! - Partial sections falling back to defaults
//! - Generation settings derived from config

use std::io::Write;

use ceh_coach::coach::GenerationSettings;
use ceh_coach::config::{Config, RetrySettings};

#[test]
fn test_defaults_target_gemini() {
    let config = Config::default();
    assert!(config.endpoint.starts_with("https://generativelanguage.googleapis.com"));
    assert_eq!(config.model, "gemini-2.5-flash");
    assert_eq!(config.retry.max_retries, RetrySettings::default().max_retries);
    assert!(!config.ui.compact_mode);
    assert!(!config.ui.no_color);
}

#[test]
fn test_load_explicit_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "model = \"gemini-2.5-pro\"").unwrap();
    writeln!(file, "max_output_tokens = 1024").unwrap();
    writeln!(file, "[ui]").unwrap();
    writeln!(file, "compact_mode = true").unwrap();

    let path = file.path().to_string_lossy().to_string();
    let config = Config::load(Some(path.as_str())).unwrap();
    assert_eq!(config.max_output_tokens, 1024);
    assert!(config.ui.compact_mode);
    assert_eq!(config.retry.max_retries, RetrySettings::default().max_retries);
}

#[test]
fn test_load_rejects_malformed_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "temperature = \"hot\"").unwrap();
    let path = file.path().to_string_lossy().to_string();
    assert!(Config::load(Some(path.as_str())).is_err());
}

#[test]
fn test_load_missing_explicit_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml").to_string_lossy().to_string();
    assert!(Config::load(Some(missing.as_str())).is_err());
}

#[test]
fn test_generation_settings_follow_config() {
    let config = Config {
        model: "gemini-test".into(),
        temperature: 0.2,
        max_output_tokens: 512,
        ..Config::default()
    };
    let settings = GenerationSettings::from_config(&config);
    assert_eq!(settings.model, "gemini-test");
    assert_eq!(settings.temperature, Some(0.2));
    assert_eq!(settings.max_output_tokens, Some(512));
}
