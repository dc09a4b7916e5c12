use std::time::Duration;
use thiserror::Error;

/// Custom error types for the question-answering pipeline.
///
/// Contract violations by the model are deliberately absent: a reply that does not
/// follow the requested template is downgraded to a raw answer, never an error.
#[derive(Error, Debug)]
pub enum QaError {
    #[error("API key is missing")]
    MissingApiKey,
    #[error("Knowledge base is unavailable: {0}")]
    KnowledgeBaseUnavailable(String),
    #[error("Failed to read knowledge base file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse knowledge base CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error: {0}")]
    AiApi(String),
    #[error("AI provider returned no completion text")]
    EmptyCompletion,
    #[error("AI provider did not answer within {0:?}")]
    Timeout(Duration),
    #[error("The request was cancelled")]
    Cancelled,
    #[error("Composed prompt is {size} characters, above the limit of {limit}")]
    PromptTooLarge { size: usize, limit: usize },
    #[error("The question is empty")]
    EmptyQuestion,
    #[error("AI provider is not configured")]
    MissingAiProvider,
    #[error("Knowledge base is not configured")]
    MissingCatalog,
}

impl QaError {
    /// Returns `true` for failures of the completion call itself.
    ///
    /// These are per-query failures: they are shown to the user once and the
    /// session keeps running.
    pub fn is_invocation_error(&self) -> bool {
        matches!(
            self,
            QaError::AiRequest(_)
                | QaError::AiDeserialization(_)
                | QaError::AiApi(_)
                | QaError::EmptyCompletion
                | QaError::Timeout(_)
                | QaError::Cancelled
        )
    }

    /// Returns `true` for failures that block every query of the session.
    pub fn is_session_fatal(&self) -> bool {
        matches!(
            self,
            QaError::MissingApiKey
                | QaError::MissingAiProvider
                | QaError::MissingCatalog
                | QaError::KnowledgeBaseUnavailable(_)
                | QaError::Io(_)
                | QaError::Csv(_)
                | QaError::ReqwestClientBuild(_)
        )
    }
}
