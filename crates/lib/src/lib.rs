//! # Catalog Question Answering
//!
//! This crate answers natural-language questions about a fixed catalog of films. It
//! serializes the whole catalog into a prompt, sends it to an OpenAI-compatible
//! completion endpoint, and turns the reply into HTML panels, falling back to a web
//! search link when the model reports that the catalog has no answer.

pub mod catalog;
pub mod constants;
pub mod errors;
pub mod interpreter;
pub mod prompts;
pub mod providers;
pub mod render;
pub mod types;

pub use catalog::{Catalog, CatalogRow, CatalogStats, CatalogStore};
pub use errors::QaError;
pub use interpreter::ParsedAnswer;
pub use render::{AnswerKind, Rendered, Renderer};
pub use types::{AnswerClient, AnswerClientBuilder, AskResult};

use interpreter::interpret;
use prompts::answer::compose_answer_prompt;
use std::future::Future;
use tracing::{debug, error, info};

impl AnswerClient {
    /// Composes the prompt for a question without sending it.
    ///
    /// Fails with [`QaError::EmptyQuestion`] for a blank question and with
    /// [`QaError::PromptTooLarge`] when the full catalog does not fit the configured
    /// budget. The catalog is never truncated to make it fit.
    pub fn prepare_prompt(&self, catalog: &Catalog, question: &str) -> Result<String, QaError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(QaError::EmptyQuestion);
        }

        let prompt = compose_answer_prompt(&catalog.serialize(), question);
        let size = prompt.chars().count();
        if size > self.max_prompt_chars {
            return Err(QaError::PromptTooLarge {
                size,
                limit: self.max_prompt_chars,
            });
        }
        Ok(prompt)
    }

    /// Runs the pipeline once: compose, invoke, interpret, render.
    ///
    /// The completion call is bounded by the configured timeout and is never retried.
    pub async fn ask(&self, catalog: &Catalog, question: &str) -> Result<AskResult, QaError> {
        info!(works = catalog.len(), "[ask] received question: {:?}", question);
        let prompt = self.prepare_prompt(catalog, question)?;
        let prompt_chars = prompt.chars().count();

        debug!(prompt_chars, "--> Sending answer prompt to AI provider");
        let reply = tokio::time::timeout(
            self.timeout,
            self.ai_provider.generate(&prompt, &self.generation),
        )
        .await
        .map_err(|_| QaError::Timeout(self.timeout))??;
        debug!("<-- Reply from AI: {}", &reply);

        let parsed = interpret(&reply, question.trim());
        info!(kind = parsed.kind(), "[ask] reply classified");
        let rendered = self.renderer.render(&parsed);

        Ok(AskResult {
            parsed,
            rendered,
            prompt_chars,
        })
    }

    /// Like [`AnswerClient::ask`], but gives up with [`QaError::Cancelled`] as soon as
    /// `cancel` completes. The in-flight request is dropped.
    pub async fn ask_with_cancel<C>(
        &self,
        catalog: &Catalog,
        question: &str,
        cancel: C,
    ) -> Result<AskResult, QaError>
    where
        C: Future<Output = ()>,
    {
        tokio::select! {
            result = self.ask(catalog, question) => result,
            _ = cancel => {
                info!("[ask] cancelled by caller");
                Err(QaError::Cancelled)
            }
        }
    }

    /// The outermost boundary: always returns a panel, never an error.
    ///
    /// A blank question yields the warning panel and any failure yields the error panel,
    /// so the caller never keeps partial state from a failed attempt.
    pub async fn answer(&self, catalog: &Catalog, question: &str) -> Rendered {
        match self.ask(catalog, question).await {
            Ok(result) => result.rendered,
            Err(e) => self.render_failure(&e),
        }
    }

    /// Maps a pipeline failure to the panel shown to the user.
    pub fn render_failure(&self, err: &QaError) -> Rendered {
        match err {
            QaError::EmptyQuestion => self.renderer.render_empty_question(),
            QaError::MissingApiKey => self.renderer.render_config_error(),
            QaError::KnowledgeBaseUnavailable(_)
            | QaError::Io(_)
            | QaError::Csv(_)
            | QaError::MissingCatalog => {
                self.renderer.render_catalog_error()
            }
            other => {
                error!("[answer] pipeline failed: {other}");
                self.renderer.render_error(other)
            }
        }
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }
}
