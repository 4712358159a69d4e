use serde::Deserialize;

/// Body of a successful login: the bearer token for subsequent calls.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}
