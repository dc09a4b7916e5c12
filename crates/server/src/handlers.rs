//! # Route Handlers
//!
//! The Axum handlers of `filmqa-server`: the page, the question endpoint, the
//! catalog endpoints and the health check.

use super::{
    errors::AppError,
    page::render_page,
    state::AppState,
    types::{ApiResponse, AskRequest, DebugParams, ReloadResponse},
};
use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use filmqa::{CatalogStats, Rendered};
use serde_json::{json, Value};
use tracing::{info, warn};

// --- Helper Functions ---

fn wrap_response<T>(
    result: T,
    debug_params: Query<DebugParams>,
    debug_info: Option<Value>,
) -> Json<ApiResponse<T>> {
    let debug = if debug_params.debug.unwrap_or(false) {
        debug_info
    } else {
        None
    };
    Json(ApiResponse { debug, result })
}

// --- Route Handlers ---

/// The handler for the root (`/`) endpoint: the question page.
pub async fn root(State(app_state): State<AppState>) -> Html<String> {
    let stats = app_state.catalog.snapshot().await.stats();
    Html(render_page(&stats))
}

/// The handler for the health check (`/health`) endpoint.
pub async fn health_check() -> &'static str {
    "OK"
}

/// The handler for the `/ask` endpoint.
///
/// Always answers with a rendered panel. Failures of the pipeline for this question
/// (empty question, oversized prompt, completion errors) become the warning or error
/// panel; they are never retried.
pub async fn ask_handler(
    State(app_state): State<AppState>,
    debug_params: Query<DebugParams>,
    Json(payload): Json<AskRequest>,
) -> Result<Json<ApiResponse<Rendered>>, AppError> {
    info!("Received question: '{}'", payload.question);
    let catalog = app_state.catalog.snapshot().await;

    match app_state
        .answer_client
        .ask(&catalog, &payload.question)
        .await
    {
        Ok(result) => {
            let debug_info = json!({
                "parsed": serde_json::to_value(&result.parsed).map_err(anyhow::Error::from)?,
                "prompt_chars": result.prompt_chars,
                "catalog_works": catalog.len(),
                "model": app_state.config.ai.model_name,
            });
            Ok(wrap_response(result.rendered, debug_params, Some(debug_info)))
        }
        Err(e) => {
            warn!("Question failed: {e}");
            let debug_info = json!({ "error": e.to_string() });
            let rendered = app_state.answer_client.render_failure(&e);
            Ok(wrap_response(rendered, debug_params, Some(debug_info)))
        }
    }
}

/// The handler for the `/catalog/stats` endpoint.
pub async fn catalog_stats_handler(
    State(app_state): State<AppState>,
    debug_params: Query<DebugParams>,
) -> Json<ApiResponse<CatalogStats>> {
    let stats = app_state.catalog.snapshot().await.stats();
    let debug_info = json!({
        "catalog_path": app_state.config.catalog_path,
        "max_prompt_chars": app_state.config.max_prompt_chars,
    });
    wrap_response(stats, debug_params, Some(debug_info))
}

/// The handler for the `/catalog/reload` endpoint.
///
/// Re-reads the catalog file. On failure the previous snapshot keeps serving questions.
pub async fn catalog_reload_handler(
    State(app_state): State<AppState>,
    debug_params: Query<DebugParams>,
) -> Result<Json<ApiResponse<ReloadResponse>>, AppError> {
    info!(
        "Reloading catalog from '{}'",
        app_state.catalog.path().display()
    );
    let catalog = app_state.catalog.reload().await?;
    let response = ReloadResponse {
        message: "Catalog reloaded".to_string(),
        total_works: catalog.len(),
    };
    Ok(wrap_response(response, debug_params, None))
}
