use crate::constants::{
    DEFAULT_AI_API_URL, DEFAULT_AI_MODEL, DEFAULT_MAX_PROMPT_CHARS, DEFAULT_TIMEOUT_SECS,
};
use crate::errors::QaError;
use crate::interpreter::ParsedAnswer;
use crate::providers::ai::{local::LocalAiProvider, AiProvider, GenerationOptions};
use crate::render::{Rendered, Renderer};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Answers questions about a catalog through a completion service.
///
/// The client holds no catalog and no conversation state. Each call receives the catalog
/// snapshot by reference and runs the pipeline once.
pub struct AnswerClient {
    pub(crate) ai_provider: Box<dyn AiProvider>,
    pub(crate) generation: GenerationOptions,
    pub(crate) timeout: Duration,
    pub(crate) max_prompt_chars: usize,
    pub(crate) renderer: Renderer,
}

impl fmt::Debug for AnswerClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnswerClient")
            .field("ai_provider", &self.ai_provider)
            .field("generation", &self.generation)
            .field("timeout", &self.timeout)
            .field("max_prompt_chars", &self.max_prompt_chars)
            .finish_non_exhaustive()
    }
}

/// The outcome of one successful pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct AskResult {
    pub parsed: ParsedAnswer,
    pub rendered: Rendered,
    /// Size of the submitted prompt, in characters.
    pub prompt_chars: usize,
}

/// A builder for creating `AnswerClient` instances.
pub struct AnswerClientBuilder {
    ai_provider: Option<Box<dyn AiProvider>>,
    generation: GenerationOptions,
    timeout: Duration,
    max_prompt_chars: usize,
    search_url: Option<String>,
}

impl Default for AnswerClientBuilder {
    fn default() -> Self {
        Self {
            ai_provider: None,
            generation: GenerationOptions::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_prompt_chars: DEFAULT_MAX_PROMPT_CHARS,
            search_url: None,
        }
    }
}

impl AnswerClientBuilder {
    /// Creates a new `AnswerClientBuilder`.
    ///
    /// # Examples
    ///
    /// ```
    /// use filmqa::AnswerClientBuilder;
    ///
    /// let builder = AnswerClientBuilder::new();
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the AI provider.
    pub fn ai_provider(mut self, ai_provider: Box<dyn AiProvider>) -> Self {
        self.ai_provider = Some(ai_provider);
        self
    }

    /// Configures an OpenAI-compatible endpoint, Groq by default.
    ///
    /// The API key is mandatory: a missing or blank key fails with
    /// [`QaError::MissingApiKey`] before any request can be made.
    pub fn openai_compatible(
        mut self,
        api_url: Option<String>,
        api_key: Option<String>,
        model: Option<String>,
    ) -> Result<Self, QaError> {
        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(QaError::MissingApiKey)?;
        let provider = LocalAiProvider::new(
            api_url.unwrap_or_else(|| DEFAULT_AI_API_URL.to_string()),
            Some(api_key),
            Some(model.unwrap_or_else(|| DEFAULT_AI_MODEL.to_string())),
        )?
        .with_timeout(self.timeout)?;
        self.ai_provider = Some(Box::new(provider));
        Ok(self)
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.generation.temperature = temperature;
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.generation.max_tokens = max_tokens;
        self
    }

    /// Upper bound on one completion call. Set it before `openai_compatible` so the
    /// HTTP client picks it up too.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn max_prompt_chars(mut self, max_prompt_chars: usize) -> Self {
        self.max_prompt_chars = max_prompt_chars;
        self
    }

    /// Sets the base URL of the fallback web search.
    pub fn search_url(mut self, search_url: impl Into<String>) -> Self {
        self.search_url = Some(search_url.into());
        self
    }

    /// Builds the `AnswerClient`.
    pub fn build(self) -> Result<AnswerClient, QaError> {
        let ai_provider = self.ai_provider.ok_or(QaError::MissingAiProvider)?;
        let renderer = self.search_url.map(Renderer::new).unwrap_or_default();
        Ok(AnswerClient {
            ai_provider,
            generation: self.generation,
            timeout: self.timeout,
            max_prompt_chars: self.max_prompt_chars,
            renderer,
        })
    }
}
