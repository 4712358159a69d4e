//! Session state for the policy dashboard clients.
//!
//! Holds the bearer token and user identity the API clients read on every
//! request, plus the process-wide expiry coordinator that reacts to a 401
//! uniformly across the application.

pub mod expiry;
pub mod store;

pub use expiry::SessionExpiryNotifier;
pub use store::{FileSessionStore, MemorySessionStore, Session, SessionStore, UserIdentity};

/// Key the persisted store uses for the bearer token.
pub static AUTH_TOKEN_KEY: &str = "authToken";
/// Key the persisted store uses for the serialized user identity.
pub static USER_KEY: &str = "user";
