use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// The identity persisted alongside the token at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    pub username: String,
    pub remember_me: bool,
}

/// A live session: bearer token plus the identity it was issued for.
///
/// A stored user without a token is an invalid session; protected pages
/// treat it the same as no session at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: Option<UserIdentity>,
}

/// Read/write/clear interface over the client-persisted session state.
///
/// Injected into the API clients rather than read from ambient globals so
/// tests can substitute a fake store.
pub trait SessionStore: Send + Sync {
    fn token(&self) -> Option<String>;
    fn user(&self) -> Option<UserIdentity>;
    /// Replaces the whole session. Called only at login.
    fn store(&self, token: String, user: Option<UserIdentity>);
    /// Removes both token and user. There is no partial clear.
    fn clear(&self);

    fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

/// In-memory store used by tests and embedding shells that manage their
/// own persistence.
#[derive(Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience for tests: a store already holding a token.
    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store.store(token.into(), None);
        store
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> Option<String> {
        let guard = self.session.lock().expect("session lock poisoned");
        guard.as_ref().map(|s| s.token.clone())
    }

    fn user(&self) -> Option<UserIdentity> {
        let guard = self.session.lock().expect("session lock poisoned");
        guard.as_ref().and_then(|s| s.user.clone())
    }

    fn store(&self, token: String, user: Option<UserIdentity>) {
        let mut guard = self.session.lock().expect("session lock poisoned");
        *guard = Some(Session { token, user });
    }

    fn clear(&self) {
        let mut guard = self.session.lock().expect("session lock poisoned");
        *guard = None;
    }
}

/// On-disk session document, mirroring the `authToken` and `user` keys
/// the browser client kept in local storage.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedSession {
    #[serde(rename = "authToken", skip_serializing_if = "Option::is_none")]
    auth_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<UserIdentity>,
}

/// Session store persisted as a small JSON document.
pub struct FileSessionStore {
    path: PathBuf,
    cached: Mutex<PersistedSession>,
}

impl FileSessionStore {
    /// Opens the store, loading any previously persisted session. A
    /// missing or unreadable document starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cached = Self::load(&path);
        Self {
            path,
            cached: Mutex::new(cached),
        }
    }

    fn load(path: &Path) -> PersistedSession {
        match std::fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), error = %err, "discarding unreadable session document");
                PersistedSession::default()
            }),
            Err(_) => PersistedSession::default(),
        }
    }

    fn persist(&self, session: &PersistedSession) {
        let raw = match serde_json::to_string(session) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::error!(error = %err, "unable to serialize session document");
                return;
            }
        };
        if let Err(err) = std::fs::write(&self.path, raw) {
            tracing::error!(path = %self.path.display(), error = %err, "unable to persist session document");
        }
    }
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> Option<String> {
        let guard = self.cached.lock().expect("session lock poisoned");
        guard.auth_token.clone()
    }

    fn user(&self) -> Option<UserIdentity> {
        let guard = self.cached.lock().expect("session lock poisoned");
        guard.user.clone()
    }

    fn store(&self, token: String, user: Option<UserIdentity>) {
        let mut guard = self.cached.lock().expect("session lock poisoned");
        *guard = PersistedSession {
            auth_token: Some(token),
            user,
        };
        self.persist(&guard);
    }

    fn clear(&self) {
        let mut guard = self.cached.lock().expect("session lock poisoned");
        *guard = PersistedSession::default();
        self.persist(&guard);
    }
}
