//! Path helpers for the session file location.
//!
//! Uses the `directories` crate for platform-appropriate paths:
//! - Linux: `~/.local/share/provisio/session.json`
//! - macOS: `~/Library/Application Support/provisio/session.json`
//! - Windows: `%AppData%\provisio\data\session.json`

use std::path::PathBuf;

use super::session::SessionStoreError;

/// Returns the default path to the session file.
pub fn default_session_path() -> Result<PathBuf, SessionStoreError> {
    let proj_dirs =
        directories::ProjectDirs::from("", "", "provisio").ok_or(SessionStoreError::NoDataDir)?;

    Ok(proj_dirs.data_dir().join("session.json"))
}
