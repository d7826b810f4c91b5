//! Shared test utilities for provisio CLI integration tests.
//!
//! Invariants:
//! - Every command built here ignores `.env` and host `PROVISIO_*` variables.
//! - Each test gets its own session file in a temp directory.

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// A hermetic `provisio` command.
pub fn provisio_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("provisio");

    cmd.env("DOTENV_DISABLED", "1");
    cmd.env_remove("PROVISIO_API_URL")
        .env_remove("VITE_API_URL")
        .env_remove("PROVISIO_TIMEOUT")
        .env_remove("PROVISIO_SKIP_VERIFY")
        .env_remove("PROVISIO_SESSION_FILE")
        .env_remove("PROVISIO_POLL_INTERVAL_MS")
        .env_remove("PROVISIO_WATCH_TIMEOUT")
        .env_remove("PROVISIO_LOGIN_ROUTE")
        .env_remove("RUST_LOG");

    cmd
}

/// Session file seeded with a token and, optionally, an active business unit.
pub struct SeededSession {
    _dir: TempDir,
    pub path: PathBuf,
}

#[allow(dead_code)]
impl SeededSession {
    pub fn with_token(token: &str) -> Self {
        Self::write(serde_json::json!({ "access_token": token }))
    }

    pub fn with_business_unit(token: &str, id: &str, name: &str) -> Self {
        Self::write(serde_json::json!({
            "access_token": token,
            "active_business_unit": { "id": id, "name": name }
        }))
    }

    pub fn empty() -> Self {
        Self::write(serde_json::json!({}))
    }

    fn write(contents: serde_json::Value) -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("session.json");
        std::fs::write(&path, contents.to_string()).expect("write session");
        Self { _dir: dir, path }
    }

    pub fn contents(&self) -> serde_json::Value {
        let raw = std::fs::read_to_string(&self.path).expect("read session");
        serde_json::from_str(&raw).expect("session json")
    }
}

/// `provisio` pointed at `base_url` with the given session file.
pub fn provisio_with(base_url: &str, session: &SeededSession) -> Command {
    let mut cmd = provisio_cmd();
    cmd.env("PROVISIO_API_URL", base_url)
        .env("PROVISIO_SESSION_FILE", &session.path)
        .env("PROVISIO_POLL_INTERVAL_MS", "100");
    cmd
}

#[allow(dead_code)]
pub fn deployment_json(id: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": "orders-db",
        "status": status,
        "plugin_id": "pg",
        "version": "15.2",
        "inputs": { "size": "small" },
        "created_at": "2024-05-01T10:00:00Z"
    })
}
