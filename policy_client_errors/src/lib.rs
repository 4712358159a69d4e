//! Error taxonomy shared by every policy backend client.
//!
//! Each failed call resolves to exactly one variant so callers can
//! special-case session expiry instead of showing a generic alert.

pub type Result<T, E = PolicyClientError> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug, serde::Serialize)]
#[serde(tag = "type")]
pub enum PolicyClientError {
    /// Transport-level failure. Never retried automatically.
    #[error("unable to connect to the policy backend: {details}")]
    Network { details: String },
    /// HTTP 401. The session store has already been cleared.
    #[error("session expired, please login again")]
    AuthExpired,
    /// HTTP 403. The session is still valid; the resource is not permitted.
    #[error("forbidden: {message}")]
    Forbidden { message: String },
    /// Any other non-2xx status, with a body-derived message.
    #[error("{message}")]
    Http { status: u16, message: String },
    /// A 2xx response whose body did not parse as the expected shape.
    #[error("unable to parse response from the policy backend: {details}")]
    Decode { details: String },
    /// Client-side rejection issued before any network call.
    #[error("{message}")]
    Validation { message: String },
    /// Local filesystem failure while saving a downloaded payload.
    #[error("unable to save downloaded file: {details}")]
    Io { details: String },
}

impl PolicyClientError {
    pub fn network(details: impl std::fmt::Display) -> Self {
        Self::Network {
            details: details.to_string(),
        }
    }

    pub fn decode(details: impl std::fmt::Display) -> Self {
        Self::Decode {
            details: details.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn io(details: impl std::fmt::Display) -> Self {
        Self::Io {
            details: details.to_string(),
        }
    }

    /// True for the 401 outcome pages delegate to the session expiry
    /// coordinator.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthExpired)
    }
}
