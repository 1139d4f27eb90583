//! # Common Test Utilities
//!
//! This module centralizes the test harness and helper functions used across the
//! `slidemix-server` integration tests.
//!
//! - `TestApp`: A full application harness that spawns a real server on a random port,
//!   with the slide provider pointed at an `httpmock::MockServer`, so every page
//!   fetch hits the mock instead of the real site.
//! - Helpers for building slide pages served by the mock.

// Allow unused code because this is a test utility module, and not all
// functions might be used by every test file that includes it.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use httpmock::MockServer;
use reqwest::Client;
use slidemix_server::{
    config, router,
    state::{build_app_state, AppState},
};
use std::{fs::File, io::Write, net::SocketAddr};
use tempfile::{tempdir, TempDir};
use tokio::{net::TcpListener, task::JoinHandle};

// --- Full Application Test Harness ---

/// A harness for end-to-end testing of the Axum server.
///
/// This struct spawns the server on a random available port and configures the
/// slide provider to be an `httpmock::MockServer` instance.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub app_state: AppState,
    _config_dir: TempDir,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the application server and returns a `TestApp` instance.
    pub async fn spawn() -> Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let mock_server = MockServer::start_async().await;

        let config_dir = tempdir()?;
        let config_path = config_dir.path().join("config.yml");
        let config_content = format!(
            r#"
port: 0
provider:
  name: "SlideShare"
  url: "{}"
fetch:
  timeout_secs: 2
  user_agent: "slidemix-test"
mixes:
  recent_limit: 3
"#,
            mock_server.base_url()
        );
        let mut file = File::create(&config_path)?;
        file.write_all(config_content.as_bytes())?;

        let config = config::get_config(Some(config_path.to_str().unwrap()))?;
        let app_state = build_app_state(config)?;
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
            app_state: app_state_for_harness,
            _config_dir: config_dir,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// A slide URL on the mocked provider.
    pub fn slide_url(&self, owner: &str, page: &str) -> String {
        format!("{}/{owner}/deck-123/{page}", self.mock_server.base_url())
    }

    /// The mock path serving `slide_url(owner, page)`.
    pub fn slide_path(owner: &str, page: &str) -> String {
        format!("/{owner}/deck-123/{page}")
    }

    pub async fn get_oembed(&self, route: &str, query: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .get(format!("{}{route}", self.address))
            .query(query)
            .send()
            .await
            .expect("Failed to execute oEmbed request")
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

// --- Page Fixtures ---

/// A slide page with every field the extractor needs, with the given
/// `data-index` region.
pub fn slide_page(owner: &str, page: &str, image: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <title>Example Deck</title>
  <meta name="description" content="An example">
  <script>var slideshare_object = {{"user_name":"{owner}","id":1}};</script>
</head>
<body>
  <div class="slide" data-index="{page}"><img data-normal="{image}"></div>
</body>
</html>"#
    )
}
