//! Testing utilities for provisio client tests.
//!
//! Available when running tests or when the `test-utils` feature is enabled.
//!
//! ```ignore
//! use provisio_client::testing::{load_fixture, client_for};
//!
//! let deployment = load_fixture("deployments/failed.json");
//! let (client, store) = client_for(&mock_server.uri(), Some("old-token"));
//! ```

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use provisio_config::PollingConfig;

use crate::auth::{MemorySessionStore, SessionStore};
use crate::client::ProvisioningClient;

/// Load a JSON fixture file from the fixtures directory.
///
/// # Panics
/// - If the fixture file cannot be read
/// - If the file content is not valid JSON
pub fn load_fixture(fixture_path: &str) -> serde_json::Value {
    let full_path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(fixture_path);
    let content = std::fs::read_to_string(&full_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", full_path.display()));
    serde_json::from_str(&content).expect("Invalid JSON in fixture")
}

/// Client pointed at `base_url` with an in-memory session, optionally
/// holding `token`. The store is returned so tests can inspect it.
///
/// # Panics
/// If the client fails to build.
pub fn client_for(base_url: &str, token: Option<&str>) -> (ProvisioningClient, Arc<MemorySessionStore>) {
    let store = Arc::new(match token {
        Some(t) => MemorySessionStore::with_token(t),
        None => MemorySessionStore::new(),
    });
    let session: Arc<dyn SessionStore> = store.clone();
    let client = ProvisioningClient::builder()
        .base_url(base_url.to_string())
        .timeout(Duration::from_secs(5))
        .session_store(session)
        .polling(PollingConfig::default())
        .build()
        .expect("test client should build");
    (client, store)
}
