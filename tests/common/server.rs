//! Test server lifecycle management
//!
//! Each test gets an isolated server on a random port with its own seeded
//! catalog database in a temp directory.

use super::fixtures::seed_catalog;
use music_catalog_server::server::{make_app, RequestsLoggingLevel, ServerConfig};
use music_catalog_server::{HtmlRenderer, SqliteCatalogStore};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Test server instance with an isolated catalog database.
///
/// When dropped, the server shuts down and the temp directory is removed.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// Store handle for direct catalog access in tests
    pub store: Arc<SqliteCatalogStore>,

    // Private fields - keep resources alive until drop
    _temp_db_dir: TempDir,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a new test server on a random port with the seeded catalog.
    ///
    /// # Panics
    ///
    /// Panics if the database cannot be created or the port cannot be bound
    /// (indicates a test infrastructure problem).
    pub async fn spawn() -> Self {
        let temp_db_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_db_dir.path().join("catalog.db");

        let store =
            Arc::new(SqliteCatalogStore::new(&db_path).expect("Failed to open catalog store"));
        seed_catalog(store.as_ref());

        let config = ServerConfig {
            requests_logging_level: RequestsLoggingLevel::None,
            ..Default::default()
        };
        let app = make_app(config, store.clone(), Arc::new(HtmlRenderer));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to read local addr")
            .port();

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .expect("Test server failed");
        });

        TestServer {
            base_url: format!("http://127.0.0.1:{}", port),
            store,
            _temp_db_dir: temp_db_dir,
            _shutdown_tx: Some(shutdown_tx),
        }
    }
}
