//! Test server lifecycle management
//!
//! This module manages spawning and shutting down test HTTP servers.
//! Each test gets an isolated server with its own catalog and fake provider.

use super::constants::*;
use super::fixtures::spawn_fake_provider;
use mirror_catalog_server::catalog::CatalogManager;
use mirror_catalog_server::provider::{DeezerClient, MetadataProvider};
use mirror_catalog_server::server::{make_app, RequestsLoggingLevel, ServerConfig, ServerState};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// Test server instance with an isolated in-memory catalog
///
/// When dropped, the server and its fake provider shut down.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    /// Base URL of the fake provider backing this server
    pub provider_url: String,

    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    _provider_shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a new test server with an empty catalog on a random port
    pub async fn spawn() -> Self {
        Self::spawn_with_seed(&[]).await
    }

    /// Spawns a new test server whose catalog is seeded with `artist_ids`
    /// imported from the fake provider before the first request is served
    ///
    /// # Panics
    ///
    /// Panics if port binding fails or the server doesn't become ready in time.
    pub async fn spawn_with_seed(artist_ids: &[u64]) -> Self {
        let (provider_url, provider_shutdown_tx) = spawn_fake_provider().await;
        let provider: Arc<dyn MetadataProvider> = Arc::new(
            DeezerClient::new(provider_url.clone(), REQUEST_TIMEOUT_SECS)
                .expect("Failed to build provider client"),
        );

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");

        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let base_url = format!("http://127.0.0.1:{}", port);

        let config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
            content_cache_age_sec: TEST_CACHE_AGE_SEC,
            ..ServerConfig::default()
        };
        let state = ServerState::new(config, CatalogManager::new(), provider);
        state.proxy.seed(artist_ids).await;

        let app = make_app(state);

        // Create shutdown channel
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        // Spawn server in background task with graceful shutdown
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            port,
            provider_url,
            _shutdown_tx: Some(shutdown_tx),
            _provider_shutdown_tx: Some(provider_shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling the home endpoint
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(tx) = self._provider_shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
