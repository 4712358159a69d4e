//! Wire types exchanged with the policy backend.

pub mod artifact;
pub mod auth;
pub mod page;
pub mod policy;

pub use artifact::ArtifactInfo;
pub use auth::LoginResponse;
pub use page::{ListResponse, PageResponse};
pub use policy::{PolicyRequest, PolicyStats};

/// A policy record as the backend returns it: field names and value types
/// vary between endpoints, so records stay as raw JSON maps until the
/// mapper normalizes them for display.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;
