use models_policy::{PolicyRequest, RawRecord};
use policy_client_errors::{PolicyClientError, Result};
use reqwest::Method;

use super::PolicyServiceClient;

impl PolicyServiceClient {
    #[tracing::instrument(skip(self, request))]
    pub async fn create_policy(&self, request: &PolicyRequest) -> Result<RawRecord> {
        let response = self
            .request(Method::POST, "/api/v1/policy/createPolicy")
            .json(request)
            .send()
            .await
            .map_err(PolicyClientError::network)?;
        let response = self.ensure_success(response).await?;
        response.json().await.map_err(PolicyClientError::decode)
    }

    /// Updates an existing policy. `changes` should hold only the fields
    /// that changed; unset fields are not serialized.
    #[tracing::instrument(skip(self, changes))]
    pub async fn update_policy(
        &self,
        policy_number: &str,
        changes: &PolicyRequest,
    ) -> Result<RawRecord> {
        let path = format!("/api/v1/policy/update/{policy_number}");
        let response = self
            .request(Method::PUT, &path)
            .json(changes)
            .send()
            .await
            .map_err(PolicyClientError::network)?;
        let response = self.ensure_success(response).await?;
        response.json().await.map_err(PolicyClientError::decode)
    }
}
