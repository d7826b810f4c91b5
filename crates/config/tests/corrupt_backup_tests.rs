//! Regression tests for corrupt session file handling.
//!
//! A session file that does not parse must never stop the CLI from
//! starting, and its contents must never be deleted.

use std::io::Write;

use provisio_config::{BusinessUnitRef, SessionFile, SessionState};
use secrecy::{ExposeSecret, SecretString};
use uuid::Uuid;

fn write_corrupt(path: &std::path::Path, content: &[u8]) {
    let mut file = std::fs::File::create(path).unwrap();
    file.write_all(content).unwrap();
}

#[test]
fn test_corrupt_session_is_backed_up_and_loads_empty() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("session.json");
    write_corrupt(&path, b"{ invalid json }");

    let state = SessionFile::new(&path).load().unwrap();

    assert!(state.access_token.is_none());
    assert!(state.active_business_unit.is_none());
    assert!(!path.exists(), "corrupt file should be moved aside");
    let backup = temp_dir.path().join("session.json.corrupt");
    assert_eq!(std::fs::read_to_string(backup).unwrap(), "{ invalid json }");
}

/// Scenario: the session file is corrupt AND its directory is read-only, so
/// the backup rename fails. Loading still succeeds with an empty session and
/// the original bytes stay on disk.
#[cfg(unix)]
#[test]
fn test_backup_failure_continues_with_empty_session() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("session.json");
    write_corrupt(&path, b"not json at all");

    std::fs::set_permissions(temp_dir.path(), std::fs::Permissions::from_mode(0o555)).unwrap();
    let result = SessionFile::new(&path).load();
    std::fs::set_permissions(temp_dir.path(), std::fs::Permissions::from_mode(0o755)).unwrap();

    let state = result.unwrap();
    assert!(state.access_token.is_none());
    // Privileged users can rename in a read-only directory; the bytes must
    // survive in one place or the other.
    let backup = temp_dir.path().join("session.json.corrupt");
    let preserved = std::fs::read_to_string(&path)
        .or_else(|_| std::fs::read_to_string(&backup))
        .unwrap();
    assert_eq!(preserved, "not json at all");
}

#[test]
fn test_save_after_corruption_starts_fresh() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("session.json");
    write_corrupt(&path, b"[1, 2,");

    let file = SessionFile::new(&path);
    let _ = file.load().unwrap();

    let state = SessionState {
        access_token: Some(SecretString::new("tok".to_string().into())),
        active_business_unit: Some(BusinessUnitRef {
            id: Uuid::nil(),
            name: "Payments".to_string(),
        }),
    };
    file.save(&state).unwrap();

    let reloaded = file.load().unwrap();
    assert_eq!(
        reloaded.access_token.as_ref().map(|t| t.expose_secret().to_string()),
        Some("tok".to_string())
    );
    assert_eq!(
        reloaded.active_business_unit.map(|bu| bu.name),
        Some("Payments".to_string())
    );
}

#[test]
fn test_wrong_shape_is_treated_as_corrupt() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("session.json");
    write_corrupt(&path, br#"{"access_token": 42}"#);

    let state = SessionFile::new(&path).load().unwrap();
    assert!(state.access_token.is_none());
    assert!(temp_dir.path().join("session.json.corrupt").exists());
}
