//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup. The state holds the configuration, the answer
//! client and the catalog store, making them accessible to all request handlers.

use crate::config::AppConfig;
use filmqa::{AnswerClient, AnswerClientBuilder, CatalogStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Arc<AppConfig>,
    /// The question-answering pipeline.
    pub answer_client: Arc<AnswerClient>,
    /// The current catalog snapshot and its reload source.
    pub catalog: Arc<CatalogStore>,
}

/// Builds the shared application state from the configuration.
///
/// Both the catalog and the completion client are required: a catalog that cannot be
/// loaded or a missing API key stops startup instead of failing every question later.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let catalog = CatalogStore::load(&config.catalog_path)?;
    info!(
        catalog_path = %config.catalog_path,
        works = catalog.snapshot().await.len(),
        "Initialized catalog store."
    );

    let answer_client = AnswerClientBuilder::new()
        .temperature(config.ai.temperature)
        .max_tokens(config.ai.max_tokens)
        .timeout(Duration::from_secs(config.ai.timeout_secs))
        .max_prompt_chars(config.max_prompt_chars)
        .search_url(config.search_url.clone())
        .openai_compatible(
            Some(config.ai.api_url.clone()),
            config.ai.api_key.clone(),
            Some(config.ai.model_name.clone()),
        )?
        .build()?;
    info!(api_url = %config.ai.api_url, model = %config.ai.model_name, "Initialized answer client.");

    Ok(AppState {
        config: Arc::new(config),
        answer_client: Arc::new(answer_client),
        catalog: Arc::new(catalog),
    })
}
