use models_policy::{ArtifactInfo, ListResponse};
use policy_client_errors::{PolicyClientError, Result};
use reqwest::Method;

use crate::ArtifactClient;

impl ArtifactClient {
    /// Artifact metadata for one policy. Tolerates both the paged
    /// envelope and a bare array, since the backend has shipped both.
    #[tracing::instrument(skip(self))]
    pub async fn list_artifacts(
        &self,
        policy_number: &str,
        page: u32,
        size: u32,
    ) -> Result<Vec<ArtifactInfo>> {
        let path = format!("/api/v1/policy/{policy_number}/list-artifacts");
        let response = self
            .api()
            .request(Method::GET, &path)
            .query(&[("page", page), ("size", size)])
            .send()
            .await
            .map_err(PolicyClientError::network)?;
        let response = self.api().ensure_success(response).await?;
        let list: ListResponse<ArtifactInfo> =
            response.json().await.map_err(PolicyClientError::decode)?;
        Ok(list.into_content())
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_artifact(&self, policy_number: &str, artifact_id: i64) -> Result<()> {
        let path = format!("/api/v1/policy/{policy_number}/delete-artifact");
        let response = self
            .api()
            .request(Method::DELETE, &path)
            .query(&[("artifactId", artifact_id)])
            .send()
            .await
            .map_err(PolicyClientError::network)?;
        self.api().ensure_success(response).await?;
        Ok(())
    }
}
