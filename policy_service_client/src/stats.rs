use models_policy::PolicyStats;
use policy_client_errors::{PolicyClientError, Result};
use reqwest::Method;

use super::PolicyServiceClient;

impl PolicyServiceClient {
    /// Dashboard summary counts.
    #[tracing::instrument(skip(self))]
    pub async fn policy_stats(&self) -> Result<PolicyStats> {
        let response = self
            .request(Method::GET, "/api/v1/policy/stats")
            .send()
            .await
            .map_err(PolicyClientError::network)?;
        let response = self.ensure_success(response).await?;
        response.json().await.map_err(PolicyClientError::decode)
    }
}
