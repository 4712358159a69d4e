use models_policy::LoginResponse;
use policy_client_errors::{PolicyClientError, Result};
use policy_session::UserIdentity;
use reqwest::Method;

use super::PolicyServiceClient;

impl PolicyServiceClient {
    /// Exchanges credentials for a bearer token and stores the resulting
    /// session. On any failure the store is left untouched.
    #[tracing::instrument(skip(self, password))]
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        remember_me: bool,
    ) -> Result<UserIdentity> {
        let response = self
            .request(Method::POST, "/auth/login")
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .map_err(PolicyClientError::network)?;
        let response = self.ensure_success(response).await?;
        let LoginResponse { token } = response.json().await.map_err(PolicyClientError::decode)?;

        let user = UserIdentity {
            username: username.to_string(),
            remember_me,
        };
        self.session().store(token, Some(user.clone()));
        Ok(user)
    }

    /// Drops the stored session. Local only; the backend keeps no
    /// server-side session to invalidate.
    pub fn logout(&self) {
        self.session().clear();
    }
}
