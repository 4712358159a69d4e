use std::sync::{Arc, Mutex};

use crate::store::SessionStore;

type ExpiryCallback = Box<dyn Fn() + Send + Sync>;

/// Process-wide reaction point for an expired or invalid session.
///
/// Constructed once at application start and shared via [`Arc`], so every
/// consumer of the API clients behaves identically on a 401: the session
/// store is cleared, then each subscriber (typically a navigate-to-login
/// callback) runs. Calling it repeatedly is safe; the clear is idempotent
/// and a repeated redirect is harmless.
pub struct SessionExpiryNotifier {
    store: Arc<dyn SessionStore>,
    subscribers: Mutex<Vec<ExpiryCallback>>,
}

impl SessionExpiryNotifier {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Registers a callback run on every expiry. Subscribers are expected
    /// to register once at startup; callbacks must not subscribe
    /// re-entrantly.
    pub fn subscribe(&self, callback: impl Fn() + Send + Sync + 'static) {
        let mut guard = self.subscribers.lock().expect("subscriber lock poisoned");
        guard.push(Box::new(callback));
    }

    /// Clears the session store, then notifies every subscriber.
    pub fn handle_session_expiry(&self) {
        tracing::info!("session expired, clearing stored credentials");
        self.store.clear();
        let guard = self.subscribers.lock().expect("subscriber lock poisoned");
        for callback in guard.iter() {
            callback();
        }
    }
}
