pub mod local;

use crate::constants::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use crate::errors::QaError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Sampling parameters for a single completion call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// A trait for interacting with a text completion service.
///
/// Implementations send the prompt once as a single user message and return the text
/// of the first generated choice. They must not retry or stream.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates a completion for the given prompt.
    async fn generate(&self, prompt: &str, options: &GenerationOptions)
        -> Result<String, QaError>;
}

dyn_clone::clone_trait_object!(AiProvider);
