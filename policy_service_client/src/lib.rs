//! Authenticated JSON client for the policy backend.
//!
//! Wraps every outbound request with the session's bearer token and
//! resolves every response to exactly one [`PolicyClientError`] variant on
//! failure. A 401 clears the session store (and notifies the expiry
//! coordinator when one is attached) before surfacing as
//! [`PolicyClientError::AuthExpired`]; no other call mutates the store.

use std::sync::Arc;

use policy_client_errors::{PolicyClientError, Result};
use policy_session::{SessionExpiryNotifier, SessionStore};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;

pub mod auth;
pub mod mutate;
pub mod policies;
pub mod stats;

pub use policies::{MaturityQuery, SearchQuery};

/// Deployment default from the original stack; override with
/// [`BASE_URL_ENV_VAR`].
pub static DEFAULT_BASE_URL: &str = "http://localhost:8081";
pub static BASE_URL_ENV_VAR: &str = "POLICY_API_BASE_URL";

#[derive(Clone)]
pub struct PolicyServiceClient {
    base_url: String,
    client: reqwest::Client,
    session: Arc<dyn SessionStore>,
    expiry: Option<Arc<SessionExpiryNotifier>>,
}

impl PolicyServiceClient {
    /// Creates a client against `base_url`, reading the bearer token from
    /// `session` on every request. A trailing slash on the base URL is
    /// stripped to avoid double slashes when joining paths.
    pub fn new(base_url: impl AsRef<str>, session: Arc<dyn SessionStore>) -> Self {
        Self {
            base_url: base_url.as_ref().trim().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            session,
            expiry: None,
        }
    }

    /// Base URL from `POLICY_API_BASE_URL`, falling back to the local
    /// deployment default.
    pub fn from_env(session: Arc<dyn SessionStore>) -> Self {
        let base_url =
            std::env::var(BASE_URL_ENV_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url, session)
    }

    /// Attaches the application-wide expiry coordinator; on a 401 it is
    /// notified instead of the store being cleared directly.
    pub fn with_expiry_notifier(mut self, notifier: Arc<SessionExpiryNotifier>) -> Self {
        self.expiry = Some(notifier);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    /// Builds a request with the bearer token attached when one is
    /// stored. With no token the request still goes out unauthenticated;
    /// the backend rejects it if auth was required.
    pub fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Resolves a response carrying a JSON body: success passes through,
    /// 401 clears the session, 403 keeps it, anything else becomes
    /// [`PolicyClientError::Http`] with a `message`/`error`-derived text.
    pub async fn ensure_success(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED {
            self.expire_session();
            return Err(PolicyClientError::AuthExpired);
        }

        let body = response.text().await.unwrap_or_default();
        let message = json_error_message(&body).unwrap_or_else(|| status_line(status));
        if status == StatusCode::FORBIDDEN {
            return Err(PolicyClientError::Forbidden { message });
        }

        tracing::error!(
            status = %status,
            body = %body,
            "unexpected response from policy backend"
        );
        Err(PolicyClientError::Http {
            status: status.as_u16(),
            message,
        })
    }

    /// Like [`ensure_success`](Self::ensure_success) but for binary
    /// endpoints, whose error bodies are plain text rather than JSON.
    pub async fn ensure_success_text(
        &self,
        response: reqwest::Response,
    ) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED {
            self.expire_session();
            return Err(PolicyClientError::AuthExpired);
        }

        let body = response.text().await.unwrap_or_default();
        let trimmed = body.trim();
        let message = if trimmed.is_empty() {
            status_line(status)
        } else {
            trimmed.to_string()
        };
        if status == StatusCode::FORBIDDEN {
            return Err(PolicyClientError::Forbidden { message });
        }

        tracing::error!(
            status = %status,
            body = %body,
            "unexpected response from policy backend"
        );
        Err(PolicyClientError::Http {
            status: status.as_u16(),
            message,
        })
    }

    pub(crate) async fn get_json<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let response = self
            .request(Method::GET, path)
            .query(query)
            .send()
            .await
            .map_err(PolicyClientError::network)?;
        let response = self.ensure_success(response).await?;
        response.json().await.map_err(PolicyClientError::decode)
    }

    fn expire_session(&self) {
        match &self.expiry {
            Some(notifier) => notifier.handle_session_expiry(),
            None => self.session.clear(),
        }
    }
}

fn json_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .or_else(|| value.get("error"))
        .and_then(|field| field.as_str())
        .map(str::to_string)
}

fn status_line(status: StatusCode) -> String {
    format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown Status")
    )
}
