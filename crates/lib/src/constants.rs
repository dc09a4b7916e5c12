//
//! # Shared Constants
//!
//! This module provides a centralized location for constants that are shared across
//! the `filmqa` workspace crates. Using these constants helps to avoid "magic strings"
//! and keeps the server, the CLI and the tests on the same defaults.

/// The default path of the catalog CSV file.
pub const DEFAULT_CATALOG_FILE: &str = "tim_burton_data.csv";

/// The default OpenAI-compatible chat completions endpoint (Groq).
pub const DEFAULT_AI_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// The default model served by the completion endpoint.
pub const DEFAULT_AI_MODEL: &str = "llama-3.1-8b-instant";

/// The environment variable holding the completion service credential.
pub const API_KEY_ENV_VAR: &str = "GROQ_API_KEY";

/// Sampling temperature for answer generation. Kept low to favour template adherence.
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Maximum number of tokens the model may generate per answer.
pub const DEFAULT_MAX_TOKENS: u32 = 3000;

/// Upper bound on a single completion call, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Largest prompt, in characters, the pipeline will submit.
pub const DEFAULT_MAX_PROMPT_CHARS: usize = 400_000;

/// Base URL of the web search used as the "not found" fallback.
pub const DEFAULT_SEARCH_URL: &str = "https://www.google.com/search";
