//! Auth Session
//!
//! Holds the access token and mirrors it into a [`TokenStore`]. A `Session` is
//! created once at startup and handed to whatever issues requests; nothing
//! reads the token from a global.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, RwLock};

/// Client-local persistence for the access token
pub trait TokenStore: Send + Sync {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, token: &str);
    fn remove(&self, key: &str);
}

/// Token store that lives only as long as the process (tests, native tools)
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a token, as if a previous page load had logged in
    pub fn with_token(key: &str, token: &str) -> Self {
        let store = Self::new();
        store.save(key, token);
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn save(&self, key: &str, token: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), token.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

/// The signed-in state of this client
///
/// Cheap to clone; clones share the same token.
#[derive(Clone)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
    store: Arc<dyn TokenStore>,
    key: Arc<str>,
}

impl Session {
    /// Load whatever token a previous page load left behind
    pub fn init(store: Arc<dyn TokenStore>, key: &str) -> Self {
        let token = store.load(key).filter(|t| !t.is_empty());
        tracing::debug!(authenticated = token.is_some(), "session initialized");
        Self {
            token: Arc::new(RwLock::new(token)),
            store,
            key: Arc::from(key),
        }
    }

    /// Session backed by a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::init(Arc::new(MemoryTokenStore::new()), crate::config::DEFAULT_TOKEN_KEY)
    }

    /// Presence check only; the token is not validated against the server
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    /// Activate the session with a freshly issued token
    pub fn set_token(&self, token: &str) {
        self.store.save(&self.key, token);
        if let Ok(mut current) = self.token.write() {
            *current = Some(token.to_string());
        }
    }

    pub fn clear(&self) {
        self.store.remove(&self.key);
        if let Ok(mut current) = self.token.write() {
            *current = None;
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .field("key", &self.key)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_without_token() {
        let session = Session::in_memory();
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_init_loads_stored_token() {
        let store = Arc::new(MemoryTokenStore::with_token("access_token", "abc"));
        let session = Session::init(store, "access_token");
        assert!(session.is_authenticated());
        assert_eq!(session.token().as_deref(), Some("abc"));
    }

    #[test]
    fn test_empty_stored_token_is_not_a_session() {
        let store = Arc::new(MemoryTokenStore::with_token("access_token", ""));
        assert!(!Session::init(store, "access_token").is_authenticated());
    }

    #[test]
    fn test_set_and_clear_persist() {
        let store = Arc::new(MemoryTokenStore::new());
        let session = Session::init(store.clone(), "access_token");

        session.set_token("tok");
        assert_eq!(store.load("access_token").as_deref(), Some("tok"));

        // A new page load sees the persisted token
        assert!(Session::init(store.clone(), "access_token").is_authenticated());

        session.clear();
        assert!(!session.is_authenticated());
        assert_eq!(store.load("access_token"), None);
    }

    #[test]
    fn test_clones_share_token() {
        let session = Session::in_memory();
        let other = session.clone();
        session.set_token("shared");
        assert_eq!(other.token().as_deref(), Some("shared"));
    }

    #[test]
    fn test_debug_hides_token() {
        let session = Session::in_memory();
        session.set_token("secret-token");
        assert!(!format!("{:?}", session).contains("secret-token"));
    }
}
