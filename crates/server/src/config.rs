//! # Application Configuration
//!
//! This module defines the configuration structure for the `filmqa-server` and
//! provides the logic for loading it from an optional `config.yml` file and
//! environment variables.
//!
//! Layers, lowest precedence first:
//! 1. Defaults declared on the structs below.
//! 2. The YAML file, with `${VAR}` references substituted from the environment.
//! 3. Plain environment variables for top-level keys (`PORT`, `CATALOG_PATH`, ...).
//! 4. `FILMQA_` prefixed variables for nested keys (e.g. `FILMQA_AI__MODEL_NAME`).
//!
//! The completion service credential falls back to `GROQ_API_KEY`. Without it the
//! configuration is rejected, so the server never starts in a state where every
//! question would fail.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use filmqa::constants::{
    API_KEY_ENV_VAR, DEFAULT_AI_API_URL, DEFAULT_AI_MODEL, DEFAULT_CATALOG_FILE,
    DEFAULT_MAX_PROMPT_CHARS, DEFAULT_MAX_TOKENS, DEFAULT_SEARCH_URL, DEFAULT_TEMPERATURE,
    DEFAULT_TIMEOUT_SECS,
};
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use tracing::info;

/// The file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.yml";

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates a required configuration file was not found.
    NotFound(String),
    /// The completion service credential is not set.
    MissingApiKey,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
            ConfigError::MissingApiKey => write!(
                f,
                "API key is missing. Set {API_KEY_ENV_VAR} or `ai.api_key` in the config file."
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// The catalog CSV file. Loaded from `CATALOG_PATH` env var.
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,
    /// Largest prompt, in characters, that will be sent to the model.
    #[serde(default = "default_max_prompt_chars")]
    pub max_prompt_chars: usize,
    /// Base URL of the fallback web search.
    #[serde(default = "default_search_url")]
    pub search_url: String,
    /// The completion service settings.
    #[serde(default)]
    pub ai: AiConfig,
}

/// Settings of the OpenAI-compatible completion endpoint.
#[derive(Debug, Deserialize, Clone)]
pub struct AiConfig {
    #[serde(default = "default_ai_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_ai_model")]
    pub model_name: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_url: default_ai_api_url(),
            api_key: None,
            model_name: default_ai_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_port() -> u16 {
    9090
}
fn default_catalog_path() -> String {
    DEFAULT_CATALOG_FILE.to_string()
}
fn default_max_prompt_chars() -> usize {
    DEFAULT_MAX_PROMPT_CHARS
}
fn default_search_url() -> String {
    DEFAULT_SEARCH_URL.to_string()
}
fn default_ai_api_url() -> String {
    DEFAULT_AI_API_URL.to_string()
}
fn default_ai_model() -> String {
    DEFAULT_AI_MODEL.to_string()
}
fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}
fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(format!("Invalid substitution pattern: {e}")))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration from a file and environment variables.
///
/// An explicitly given path must exist. Without one, `config.yml` in the working
/// directory is used when present and skipped otherwise.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = ConfigBuilder::builder();

    match config_path_override {
        Some(path) => {
            let content = read_and_substitute(path)?.ok_or_else(|| {
                ConfigError::NotFound(format!("Config file not found at '{path}'."))
            })?;
            info!("Loading configuration from '{path}'.");
            builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
        }
        None => {
            if let Some(content) = read_and_substitute(DEFAULT_CONFIG_FILE)? {
                info!("Loading configuration from '{DEFAULT_CONFIG_FILE}'.");
                builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
            }
        }
    }

    let settings = builder
        // Load environment variables for top-level keys like PORT.
        .add_source(Environment::default())
        // Load prefixed environment variables for nested overrides.
        .add_source(
            Environment::with_prefix("FILMQA")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;

    if config.ai.api_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
        config.ai.api_key = env::var(API_KEY_ENV_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty());
    }
    if config.ai.api_key.is_none() {
        return Err(ConfigError::MissingApiKey);
    }

    Ok(config)
}
