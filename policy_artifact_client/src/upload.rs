use std::path::Path;

use bytes::Bytes;
use models_policy::ArtifactInfo;
use policy_client_errors::{PolicyClientError, Result};
use reqwest::multipart::{Form, Part};
use reqwest::Method;

use crate::{ArtifactClient, FILE_FIELD, MAX_ARTIFACT_SIZE_BYTES};

/// One file queued for upload.
#[derive(Debug, Clone)]
pub struct ArtifactUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl ArtifactUpload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Reads a file from disk, taking the upload name from its final
    /// path component.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(PolicyClientError::io)?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload.bin")
            .to_string();
        Ok(Self::new(file_name, bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

impl ArtifactClient {
    /// Uploads files one at a time, stopping at the first failure.
    /// Every file is checked against [`MAX_ARTIFACT_SIZE_BYTES`] before
    /// any request goes out, so an oversized batch never reaches the
    /// backend.
    #[tracing::instrument(skip(self, files), fields(count = files.len()))]
    pub async fn upload_artifacts(
        &self,
        policy_number: &str,
        files: &[ArtifactUpload],
    ) -> Result<Vec<ArtifactInfo>> {
        if files.is_empty() {
            return Err(PolicyClientError::validation("no files selected for upload"));
        }
        for file in files {
            if file.size() > MAX_ARTIFACT_SIZE_BYTES {
                return Err(PolicyClientError::validation(format!(
                    "{} is {} bytes, above the {} byte limit",
                    file.file_name,
                    file.size(),
                    MAX_ARTIFACT_SIZE_BYTES
                )));
            }
        }

        let path = format!("/api/v1/policy/{policy_number}/upload-artifacts");
        let mut uploaded = Vec::with_capacity(files.len());
        for file in files {
            let mut part = Part::bytes(file.bytes.to_vec()).file_name(file.file_name.clone());
            if let Some(content_type) = &file.content_type {
                part = part
                    .mime_str(content_type)
                    .map_err(|err| PolicyClientError::validation(err.to_string()))?;
            }
            let response = self
                .api()
                .request(Method::POST, &path)
                .multipart(Form::new().part(FILE_FIELD, part))
                .send()
                .await
                .map_err(PolicyClientError::network)?;
            let response = self.api().ensure_success(response).await?;
            let info: ArtifactInfo = response.json().await.map_err(PolicyClientError::decode)?;
            tracing::info!(file_name = %info.file_name, size = info.size, "uploaded artifact");
            uploaded.push(info);
        }
        Ok(uploaded)
    }
}
