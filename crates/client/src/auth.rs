//! Session storage for access tokens and the active business unit.
//!
//! The browser keeps these in local storage; here they live behind the
//! [`SessionStore`] trait so the client can run against memory (tests,
//! embedding) or a session file on disk (the CLI).

use std::sync::RwLock;

use provisio_config::{BusinessUnitRef, SessionFile, SessionState};
use secrecy::SecretString;
use tracing::warn;
use uuid::Uuid;

/// Storage for the client-side session.
///
/// Implementations must be cheap to read; the client consults the store on
/// every request.
pub trait SessionStore: Send + Sync + std::fmt::Debug {
    /// Current access token, if any.
    fn access_token(&self) -> Option<SecretString>;

    /// Replace the stored access token.
    fn set_access_token(&self, token: SecretString);

    /// Forget the stored access token.
    fn clear_access_token(&self);

    /// Business unit currently selected as tenant scope.
    fn active_business_unit(&self) -> Option<BusinessUnitRef>;

    /// Select or clear the active business unit.
    fn set_active_business_unit(&self, business_unit: Option<BusinessUnitRef>);

    /// Id sent in the tenant-scope header.
    fn business_unit_id(&self) -> Option<Uuid> {
        self.active_business_unit().map(|bu| bu.id)
    }
}

fn read_state(lock: &RwLock<SessionState>) -> std::sync::RwLockReadGuard<'_, SessionState> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write_state(lock: &RwLock<SessionState>) -> std::sync::RwLockWriteGuard<'_, SessionState> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// In-memory session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    state: RwLock<SessionState>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with an access token.
    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store.set_access_token(SecretString::new(token.into().into()));
        store
    }
}

impl SessionStore for MemorySessionStore {
    fn access_token(&self) -> Option<SecretString> {
        read_state(&self.state).access_token.clone()
    }

    fn set_access_token(&self, token: SecretString) {
        write_state(&self.state).access_token = Some(token);
    }

    fn clear_access_token(&self) {
        write_state(&self.state).access_token = None;
    }

    fn active_business_unit(&self) -> Option<BusinessUnitRef> {
        read_state(&self.state).active_business_unit.clone()
    }

    fn set_active_business_unit(&self, business_unit: Option<BusinessUnitRef>) {
        write_state(&self.state).active_business_unit = business_unit;
    }
}

/// Session store backed by a JSON file, cached in memory.
///
/// Every mutation is written through. A failed write is logged and the
/// in-memory value still changes, so the current process keeps working.
#[derive(Debug)]
pub struct FileSessionStore {
    file: SessionFile,
    state: RwLock<SessionState>,
}

impl FileSessionStore {
    /// Open the session file, loading whatever it currently holds.
    pub fn open(file: SessionFile) -> Result<Self, provisio_config::SessionStoreError> {
        let state = file.load()?;
        Ok(Self {
            file,
            state: RwLock::new(state),
        })
    }

    fn persist(&self, state: &SessionState) {
        if let Err(e) = self.file.save(state) {
            warn!(error = %e, "Failed to persist session state");
        }
    }

    fn update(&self, f: impl FnOnce(&mut SessionState)) {
        let mut guard = write_state(&self.state);
        f(&mut guard);
        self.persist(&guard);
    }
}

impl SessionStore for FileSessionStore {
    fn access_token(&self) -> Option<SecretString> {
        read_state(&self.state).access_token.clone()
    }

    fn set_access_token(&self, token: SecretString) {
        self.update(|s| s.access_token = Some(token));
    }

    fn clear_access_token(&self) {
        self.update(|s| s.access_token = None);
    }

    fn active_business_unit(&self) -> Option<BusinessUnitRef> {
        read_state(&self.state).active_business_unit.clone()
    }

    fn set_active_business_unit(&self, business_unit: Option<BusinessUnitRef>) {
        self.update(|s| s.active_business_unit = business_unit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn token_of(store: &dyn SessionStore) -> Option<String> {
        store.access_token().map(|t| t.expose_secret().to_string())
    }

    #[test]
    fn test_memory_store_token_lifecycle() {
        let store = MemorySessionStore::new();
        assert!(store.access_token().is_none());

        store.set_access_token(SecretString::new("abc".to_string().into()));
        assert_eq!(token_of(&store), Some("abc".to_string()));

        store.clear_access_token();
        assert!(store.access_token().is_none());
    }

    #[test]
    fn test_business_unit_id_follows_active_unit() {
        let store = MemorySessionStore::new();
        assert!(store.business_unit_id().is_none());

        let id = Uuid::new_v4();
        store.set_active_business_unit(Some(BusinessUnitRef {
            id,
            name: "Retail".to_string(),
        }));
        assert_eq!(store.business_unit_id(), Some(id));

        store.set_active_business_unit(None);
        assert!(store.business_unit_id().is_none());
    }

    #[test]
    fn test_file_store_writes_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = FileSessionStore::open(SessionFile::new(&path)).unwrap();
        store.set_access_token(SecretString::new("persisted".to_string().into()));

        let reopened = FileSessionStore::open(SessionFile::new(&path)).unwrap();
        assert_eq!(token_of(&reopened), Some("persisted".to_string()));

        reopened.clear_access_token();
        let again = FileSessionStore::open(SessionFile::new(&path)).unwrap();
        assert!(again.access_token().is_none());
    }

    #[test]
    fn test_store_debug_hides_token() {
        let store = MemorySessionStore::with_token("very-secret");
        assert!(!format!("{:?}", store).contains("very-secret"));
    }
}
