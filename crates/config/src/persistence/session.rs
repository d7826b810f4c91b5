//! Session file reading and atomic writing.
//!
//! Responsibilities:
//! - Define `SessionState` (access token + active business unit).
//! - Load it from disk, tolerating a missing or corrupt file.
//! - Save it atomically (temp file + rename) with owner-only permissions.
//!
//! Does NOT handle:
//! - Deciding when tokens change (see the client crate's session store).
//!
//! Invariants:
//! - A missing file loads as an empty state.
//! - A corrupt file is moved aside to `<name>.json.corrupt` and loads as empty.
//! - The access token never appears in `Debug` output.

use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::types::BusinessUnitRef;

/// Errors raised while reading or writing the session file.
#[derive(Error, Debug)]
pub enum SessionStoreError {
    #[error("Unable to determine a data directory for the session file")]
    NoDataDir,

    #[error("Failed to access session file at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize session state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Client-side session state.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub access_token: Option<SecretString>,
    pub active_business_unit: Option<BusinessUnitRef>,
}

/// On-disk representation. Private so the plain token never leaks through a
/// public type.
#[derive(Serialize, Deserialize, Default)]
struct StoredSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    active_business_unit: Option<BusinessUnitRef>,
}

impl From<StoredSession> for SessionState {
    fn from(stored: StoredSession) -> Self {
        Self {
            access_token: stored.access_token.map(|t| SecretString::new(t.into())),
            active_business_unit: stored.active_business_unit,
        }
    }
}

impl From<&SessionState> for StoredSession {
    fn from(state: &SessionState) -> Self {
        Self {
            access_token: state
                .access_token
                .as_ref()
                .map(|t| t.expose_secret().to_string()),
            active_business_unit: state.active_business_unit.clone(),
        }
    }
}

/// Handle to a session file on disk.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the session state.
    ///
    /// A missing file is an empty session. A file that does not parse is
    /// renamed to `*.json.corrupt` and also treated as empty; if the rename
    /// fails the original stays where it is.
    pub fn load(&self) -> Result<SessionState, SessionStoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No session file, starting empty");
                return Ok(SessionState::default());
            }
            Err(source) => {
                return Err(SessionStoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        match serde_json::from_str::<StoredSession>(&content) {
            Ok(stored) => Ok(stored.into()),
            Err(e) => {
                let backup = self.path.with_extension("json.corrupt");
                warn!(
                    path = %self.path.display(),
                    backup = %backup.display(),
                    error = %e,
                    "Session file is corrupt, moving it aside"
                );
                if let Err(rename_err) = std::fs::rename(&self.path, &backup) {
                    warn!(
                        path = %self.path.display(),
                        error = %rename_err,
                        "Could not move corrupt session file aside; leaving it in place"
                    );
                }
                Ok(SessionState::default())
            }
        }
    }

    /// Write the session state atomically.
    pub fn save(&self, state: &SessionState) -> Result<(), SessionStoreError> {
        let io_err = |source| SessionStoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let content = serde_json::to_string_pretty(&StoredSession::from(state))?;
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, content).map_err(io_err)?;
        restrict_permissions(&temp_path).map_err(io_err)?;
        std::fs::rename(&temp_path, &self.path).map_err(io_err)?;

        debug!(path = %self.path.display(), "Session state saved");
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file = SessionFile::new(dir.path().join("session.json"));
        let state = file.load().unwrap();
        assert!(state.access_token.is_none());
        assert!(state.active_business_unit.is_none());
    }

    #[test]
    fn test_save_then_load_preserves_state() {
        let dir = tempfile::tempdir().unwrap();
        let file = SessionFile::new(dir.path().join("nested").join("session.json"));
        let bu = BusinessUnitRef {
            id: Uuid::new_v4(),
            name: "Payments".to_string(),
        };
        let state = SessionState {
            access_token: Some(SecretString::new("tok-123".to_string().into())),
            active_business_unit: Some(bu.clone()),
        };

        file.save(&state).unwrap();
        let loaded = file.load().unwrap();

        assert_eq!(
            loaded
                .access_token
                .as_ref()
                .map(|t| t.expose_secret().to_string()),
            Some("tok-123".to_string())
        );
        assert_eq!(loaded.active_business_unit, Some(bu));
        assert!(!dir.path().join("nested").join("session.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_is_moved_aside() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let file = SessionFile::new(&path);
        let state = file.load().unwrap();

        assert!(state.access_token.is_none());
        assert!(!path.exists());
        assert!(dir.path().join("session.json.corrupt").exists());
    }

    #[test]
    fn test_debug_hides_token() {
        let state = SessionState {
            access_token: Some(SecretString::new("super-secret-token".to_string().into())),
            active_business_unit: None,
        };
        let debug = format!("{:?}", state);
        assert!(!debug.contains("super-secret-token"));
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        SessionFile::new(&path)
            .save(&SessionState::default())
            .unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
