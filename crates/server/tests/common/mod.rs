//! # Common Test Utilities
//!
//! `TestApp` spawns a real `filmqa-server` on a random port. The catalog is a CSV
//! file in a temporary directory, and the completion endpoint points at an
//! `httpmock::MockServer`, so every test controls what the model "replies".

// Not every helper is used by every test file that includes this module.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use filmqa_server::{
    config, router,
    state::{build_app_state, AppState},
};
use filmqa_test_utils::FULL_HEADER;
use httpmock::{Method::POST, Mock, MockServer};
use reqwest::Client;
use serde_json::json;
use std::{fs, net::SocketAddr, path::PathBuf};
use tempfile::{tempdir, TempDir};
use tokio::{net::TcpListener, task::JoinHandle};

/// Path of the chat completions endpoint on the mock server.
pub const COMPLETIONS_PATH: &str = "/openai/v1/chat/completions";

/// Two works, 1988 and 1990.
pub fn default_catalog_csv() -> String {
    format!(
        "{FULL_HEADER}\n\
         Beetlejuice,\"$15,000,000\",16+,1988,\"$74,849,333\",Beetlejuice,A ghost hired to scare.,92 мин,nan,США\n\
         Edward Scissorhands,\"$20,000,000\",12+,1990,\"$86,024,005\",Edward Scissorhands,A man with scissors for hands.,105 мин,,США\n"
    )
}

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub catalog_path: PathBuf,
    pub app_state: AppState,
    _dir: TempDir,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the server with the default two-work catalog.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with_catalog(&default_catalog_csv()).await
    }

    /// Spawns the server with the given CSV content as its catalog.
    pub async fn spawn_with_catalog(csv: &str) -> Result<Self> {
        dotenvy::dotenv().ok();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let mock_server = MockServer::start();
        let dir = tempdir()?;

        let catalog_path = dir.path().join("catalog.csv");
        fs::write(&catalog_path, csv)?;

        let config_path = dir.path().join("config.yml");
        let config_content = format!(
            r#"
port: 0
catalog_path: "{}"
ai:
  api_url: "{}"
  api_key: "test-api-key"
  model_name: "mock-chat-model"
  timeout_secs: 5
"#,
            catalog_path.display(),
            mock_server.url(COMPLETIONS_PATH)
        );
        fs::write(&config_path, config_content)?;

        let config = config::get_config(Some(config_path.to_str().unwrap()))?;
        let app_state = build_app_state(config).await?;
        let app_state_for_harness = app_state.clone();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            catalog_path,
            app_state: app_state_for_harness,
            _dir: dir,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// Makes the mock model answer every completion request with `content`.
    pub fn mock_reply(&self, content: &str) -> Mock<'_> {
        let body = json!({
            "choices": [{ "message": { "role": "assistant", "content": content } }]
        });
        self.mock_server.mock(|when, then| {
            when.method(POST).path(COMPLETIONS_PATH);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(body);
        })
    }

    /// Posts a question to `/ask` and returns the decoded JSON body.
    pub async fn ask(&self, question: &str, debug: bool) -> Result<serde_json::Value> {
        let url = if debug {
            format!("{}/ask?debug=true", self.address)
        } else {
            format!("{}/ask", self.address)
        };
        let response = self
            .client
            .post(url)
            .json(&json!({ "question": question }))
            .send()
            .await?;
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        Ok(response.json().await?)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
