//! # Configuration Tests
//!
//! Tests for `get_config`: defaults, the YAML file with `${VAR}` substitution, the
//! environment layers and the mandatory API key. Environment variables are process
//! global, so every test here runs serially.

use filmqa_server::config::{get_config, ConfigError};
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::tempdir;

/// Clears every variable `get_config` may read, for a clean slate per test.
fn clear_env_vars() {
    for var in [
        "GROQ_API_KEY",
        "PORT",
        "CATALOG_PATH",
        "MAX_PROMPT_CHARS",
        "SEARCH_URL",
        "FILMQA_PORT",
        "FILMQA_CATALOG_PATH",
        "FILMQA_AI__API_KEY",
        "FILMQA_AI__MODEL_NAME",
        "FILMQA_AI__TEMPERATURE",
        "TEST_FILMQA_KEY",
    ] {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_get_config_defaults() {
    clear_env_vars();
    env::set_var("GROQ_API_KEY", "gsk_env");

    let config = get_config(None).expect("Configuration should load with defaults");

    assert_eq!(config.port, 9090);
    assert_eq!(config.catalog_path, "tim_burton_data.csv");
    assert_eq!(config.max_prompt_chars, 400_000);
    assert_eq!(config.search_url, "https://www.google.com/search");
    assert_eq!(
        config.ai.api_url,
        "https://api.groq.com/openai/v1/chat/completions"
    );
    assert_eq!(config.ai.model_name, "llama-3.1-8b-instant");
    assert!((config.ai.temperature - 0.1).abs() < f32::EPSILON);
    assert_eq!(config.ai.max_tokens, 3000);
    assert_eq!(config.ai.timeout_secs, 60);
    assert_eq!(config.ai.api_key.as_deref(), Some("gsk_env"));

    clear_env_vars();
}

#[test]
#[serial]
fn test_get_config_from_file_with_substitution() {
    clear_env_vars();
    env::set_var("TEST_FILMQA_KEY", "gsk_from_file");
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yml");
    fs::write(
        &path,
        r#"
port: 8181
catalog_path: "films.csv"
max_prompt_chars: 1000
ai:
  api_url: "http://localhost:1234/v1/chat/completions"
  api_key: "${TEST_FILMQA_KEY}"
  model_name: "local-model"
  temperature: 0.3
"#,
    )
    .unwrap();

    let config = get_config(Some(path.to_str().unwrap())).expect("Config file should load");

    assert_eq!(config.port, 8181);
    assert_eq!(config.catalog_path, "films.csv");
    assert_eq!(config.max_prompt_chars, 1000);
    assert_eq!(config.ai.api_url, "http://localhost:1234/v1/chat/completions");
    assert_eq!(config.ai.api_key.as_deref(), Some("gsk_from_file"));
    assert_eq!(config.ai.model_name, "local-model");
    assert!((config.ai.temperature - 0.3).abs() < f32::EPSILON);
    // Keys absent from the file keep their defaults.
    assert_eq!(config.ai.max_tokens, 3000);

    clear_env_vars();
}

#[test]
#[serial]
fn test_env_overrides_file() {
    clear_env_vars();
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yml");
    fs::write(
        &path,
        "port: 8181\nai:\n  api_key: \"gsk_file\"\n  model_name: \"from-file\"\n",
    )
    .unwrap();
    env::set_var("PORT", "7070");
    env::set_var("FILMQA_AI__MODEL_NAME", "from-env");

    let config = get_config(Some(path.to_str().unwrap())).unwrap();

    assert_eq!(config.port, 7070);
    assert_eq!(config.ai.model_name, "from-env");
    assert_eq!(config.ai.api_key.as_deref(), Some("gsk_file"));

    clear_env_vars();
}

#[test]
#[serial]
fn test_missing_api_key_is_rejected() {
    clear_env_vars();

    let result = get_config(None);
    assert!(matches!(result, Err(ConfigError::MissingApiKey)));

    // A blank key counts as missing.
    env::set_var("GROQ_API_KEY", "   ");
    let result = get_config(None);
    assert!(matches!(result, Err(ConfigError::MissingApiKey)));

    clear_env_vars();
}

#[test]
#[serial]
fn test_explicit_config_path_must_exist() {
    clear_env_vars();
    env::set_var("GROQ_API_KEY", "gsk_env");

    let result = get_config(Some("/definitely/not/here/config.yml"));
    match result {
        Err(ConfigError::NotFound(msg)) => assert!(msg.contains("/definitely/not/here")),
        other => panic!("expected NotFound, got {other:?}"),
    }

    clear_env_vars();
}
