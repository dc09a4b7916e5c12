use anyhow::Result;
use async_trait::async_trait;
use filmqa::errors::QaError;
use filmqa::prompts::contract::{ANSWER_MARKER, REASONING_MARKER};
use filmqa::providers::ai::{AiProvider, GenerationOptions};
use filmqa::{Catalog, CatalogRow};
use std::fmt::Debug;
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::NamedTempFile;

// --- Catalog Fixtures ---

/// The CSV header with every catalog column.
pub const FULL_HEADER: &str =
    "Name,Budget,Age rating,Release year,Box office,Original title,Synopsis,Duration,Tagline,Country";

/// A single-row catalog with "Edward Scissorhands" (1990).
pub fn edward_scissorhands_catalog() -> Catalog {
    Catalog::new(vec![CatalogRow::from_pairs(&[
        ("Name", "Edward Scissorhands"),
        ("Budget", "$20,000,000"),
        ("Age rating", "12+"),
        ("Release year", "1990"),
        ("Box office", "$86,024,005"),
        ("Original title", "Edward Scissorhands"),
        ("Synopsis", "An artificial man with scissors for hands."),
        ("Duration", "105 мин"),
        ("Tagline", "His story will touch you, even though he can't."),
        ("Country", "США"),
    ])])
}

/// A three-row catalog spanning several decades.
pub fn sample_catalog() -> Catalog {
    Catalog::new(vec![
        CatalogRow::from_pairs(&[
            ("Name", "Beetlejuice"),
            ("Release year", "1988"),
            ("Country", "США"),
        ]),
        CatalogRow::from_pairs(&[
            ("Name", "Edward Scissorhands"),
            ("Release year", "1990"),
            ("Budget", "$20,000,000"),
        ]),
        CatalogRow::from_pairs(&[
            ("Name", "Corpse Bride"),
            ("Release year", "2005"),
            ("Age rating", "12+"),
        ]),
    ])
}

/// Writes `content` to a temporary `.csv` file that lives as long as the handle.
pub fn write_csv(content: &str) -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile()?;
    file.write_all(content.as_bytes())?;
    file.flush()?;
    Ok(file)
}

/// Builds a reply that follows the two-section template.
pub fn structured_reply(reasoning: &str, final_answer: &str) -> String {
    format!("{REASONING_MARKER}\n{reasoning}\n\n{ANSWER_MARKER}\n{final_answer}")
}

// --- Mock AI Provider ---

/// An `AiProvider` that replays queued replies and records every prompt it receives.
#[derive(Clone, Debug)]
pub struct MockAiProvider {
    replies: Arc<Mutex<Vec<Result<String, String>>>>,
    calls: Arc<Mutex<Vec<(String, GenerationOptions)>>>,
    delay: Option<Duration>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            delay: None,
        }
    }

    /// A provider that answers every call with `reply`.
    pub fn replying(reply: &str) -> Self {
        let mock = Self::new();
        mock.add_reply(reply);
        mock
    }

    /// Queues a successful reply. Replies are served in insertion order; the last one
    /// is repeated once the queue is drained.
    pub fn add_reply(&self, reply: &str) {
        self.replies.lock().unwrap().push(Ok(reply.to_string()));
    }

    /// Queues an API failure with the given detail.
    pub fn add_failure(&self, detail: &str) {
        self.replies.lock().unwrap().push(Err(detail.to_string()));
    }

    /// Makes every call sleep before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Retrieves the recorded calls for assertion.
    pub fn get_calls(&self) -> Vec<(String, GenerationOptions)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, QaError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), *options));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = {
            let mut replies = self.replies.lock().unwrap();
            if replies.len() > 1 {
                Some(replies.remove(0))
            } else {
                replies.first().cloned()
            }
        };

        match next {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(detail)) => Err(QaError::AiApi(detail)),
            None => Err(QaError::AiApi(
                "MockAiProvider: No reply programmed.".to_string(),
            )),
        }
    }
}
