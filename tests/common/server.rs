//! Test server lifecycle management
//!
//! Spawns the real router on a random port, backed by a temporary SQLite
//! database and a real `TmdbClient` talking to the fake TMDB.

use super::constants::*;
use super::fake_tmdb::spawn_fake_tmdb;
use movie_catalog_server::{
    make_app, FormTokens, MovieCatalog, RequestsLoggingLevel, ServerConfig, SqliteMovieStore,
    TmdbClient,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// A running server instance for end-to-end tests
///
/// The server is shut down when this value is dropped.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// Base URL of the fake TMDB the server talks to
    pub tmdb_base_url: String,

    /// Path of the SQLite database backing the server
    pub db_path: PathBuf,

    // Private fields - keep resources alive until drop
    _temp_db_dir: TempDir,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a server with an empty catalog.
    pub async fn spawn() -> Self {
        let temp_db_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_db_dir.path().join("movies.db");
        let tmdb_base_url = spawn_fake_tmdb().await;

        let store = SqliteMovieStore::new(&db_path).expect("Failed to open movie store");
        let provider = TmdbClient::new(&tmdb_base_url, TEST_TMDB_API_KEY, 5)
            .expect("Failed to create TMDB client");
        let catalog = MovieCatalog::new(Arc::new(store), Arc::new(provider), TEST_IMAGE_BASE_URL);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let config = ServerConfig {
            requests_logging_level: RequestsLoggingLevel::None,
            port,
            frontend_dir_path: None,
        };
        let app = make_app(
            config,
            Arc::new(catalog),
            Arc::new(FormTokens::new(TEST_SECRET_KEY)),
        );

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
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
            tmdb_base_url,
            db_path,
            _temp_db_dir: temp_db_dir,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling the listing
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
    }
}
