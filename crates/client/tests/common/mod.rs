//! Common test utilities for integration tests.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - Every client built here uses an in-memory session store
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use provisio_client::{MemorySessionStore, ProvisioningClient, SessionStore};
use provisio_config::PollingConfig;

#[allow(unused_imports)]
pub use provisio_client::testing::{client_for, load_fixture};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Client with a fast poll interval so watch tests run in real time.
#[allow(dead_code)]
pub fn polling_client(
    base_url: &str,
    token: &str,
    interval: Duration,
    retry_timeout: Duration,
) -> ProvisioningClient {
    let store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::with_token(token));
    ProvisioningClient::builder()
        .base_url(base_url.to_string())
        .timeout(Duration::from_secs(5))
        .session_store(store)
        .polling(PollingConfig {
            interval,
            retry_timeout,
        })
        .build()
        .expect("client should build")
}

/// Counter shared between a responder and the test body.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct HitCounter(Arc<AtomicUsize>);

#[allow(dead_code)]
impl HitCounter {
    pub fn hit(&self) -> usize {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Value of the `Authorization` header, if any.
#[allow(dead_code)]
pub fn bearer_of(request: &Request) -> Option<String> {
    request
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
