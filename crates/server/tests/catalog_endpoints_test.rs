//! # Catalog Endpoint Tests
//!
//! Covers `GET /catalog/stats` and `POST /catalog/reload`, including a failed reload
//! that must leave the previous snapshot in service.

mod common;

use anyhow::Result;
use common::TestApp;
use filmqa_test_utils::FULL_HEADER;
use serde_json::Value;
use std::fs;

#[tokio::test]
async fn test_catalog_stats() -> Result<()> {
    let app = TestApp::spawn().await?;

    let response = app
        .client
        .get(format!("{}/catalog/stats?debug=true", app.address))
        .send()
        .await?;

    assert!(response.status().is_success());
    let body: Value = response.json().await?;
    assert_eq!(body["result"]["total_works"], 2);
    assert_eq!(body["result"]["min_release_year"], "1988");
    assert_eq!(body["result"]["max_release_year"], "1990");
    assert_eq!(
        body["debug"]["catalog_path"],
        app.catalog_path.display().to_string()
    );
    assert_eq!(body["debug"]["max_prompt_chars"], 400_000);
    Ok(())
}

#[tokio::test]
async fn test_catalog_reload_picks_up_new_rows() -> Result<()> {
    let app = TestApp::spawn().await?;
    fs::write(
        &app.catalog_path,
        format!("{FULL_HEADER}\nBeetlejuice,,,1988,,,,,,\nEd Wood,,,1994,,,,,,\nBig Fish,,,2003,,,,,,\n"),
    )?;

    let response = app
        .client
        .post(format!("{}/catalog/reload", app.address))
        .send()
        .await?;

    assert!(response.status().is_success());
    let body: Value = response.json().await?;
    assert_eq!(body["result"]["total_works"], 3);

    let stats = app.app_state.catalog.snapshot().await.stats();
    assert_eq!(stats.total_works, 3);
    assert_eq!(stats.max_release_year.as_deref(), Some("2003"));
    Ok(())
}

#[tokio::test]
async fn test_failed_reload_keeps_previous_catalog() -> Result<()> {
    let app = TestApp::spawn().await?;
    fs::remove_file(&app.catalog_path)?;

    let response = app
        .client
        .post(format!("{}/catalog/reload", app.address))
        .send()
        .await?;

    assert_eq!(
        response.status(),
        reqwest::StatusCode::UNPROCESSABLE_ENTITY
    );
    let body: Value = response.json().await?;
    assert!(body["error"].as_str().unwrap().contains("cannot read"));

    let snapshot = app.app_state.catalog.snapshot().await;
    assert_eq!(snapshot.len(), 2);
    Ok(())
}
