use std::path::{Path, PathBuf};

use models_policy::RawRecord;
use policy_client_errors::{PolicyClientError, Result};
use reqwest::Method;

use crate::ArtifactClient;

impl ArtifactClient {
    /// Downloads one artifact and writes it under `dest_dir`, named by
    /// the response's Content-Disposition header when present, else
    /// `default_filename` verbatim. Returns the path written.
    #[tracing::instrument(skip(self, dest_dir))]
    pub async fn download_artifact(
        &self,
        policy_number: &str,
        artifact_id: i64,
        default_filename: &str,
        dest_dir: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        let path = format!("/api/v1/policy/{policy_number}/download-artifacts/{artifact_id}");
        let response = self
            .api()
            .request(Method::GET, &path)
            .send()
            .await
            .map_err(PolicyClientError::network)?;
        let response = self.api().ensure_success_text(response).await?;

        let file_name =
            suggested_filename(&response).unwrap_or_else(|| default_filename.to_string());
        let bytes = response.bytes().await.map_err(PolicyClientError::network)?;
        save(dest_dir.as_ref(), &file_name, &bytes).await
    }

    /// Exports the given records as the backend's Excel workbook and
    /// writes it under `dest_dir`.
    #[tracing::instrument(skip(self, records, dest_dir), fields(count = records.len()))]
    pub async fn download_all_policies_excel(
        &self,
        records: &[RawRecord],
        dest_dir: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        let response = self
            .api()
            .request(Method::POST, "/api/v1/policy/download-all-policies-excel")
            .json(records)
            .send()
            .await
            .map_err(PolicyClientError::network)?;
        let response = self.api().ensure_success_text(response).await?;

        let file_name = suggested_filename(&response).unwrap_or_else(|| "policies.xlsx".to_string());
        let bytes = response.bytes().await.map_err(PolicyClientError::network)?;
        save(dest_dir.as_ref(), &file_name, &bytes).await
    }
}

async fn save(dest_dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    let target = dest_dir.join(file_name);
    tokio::fs::write(&target, bytes)
        .await
        .map_err(PolicyClientError::io)?;
    tracing::info!(path = %target.display(), size = bytes.len(), "saved download");
    Ok(target)
}

fn suggested_filename(response: &reqwest::Response) -> Option<String> {
    let header = response
        .headers()
        .get(reqwest::header::CONTENT_DISPOSITION)?
        .to_str()
        .ok()?;
    filename_from_content_disposition(header)
}

/// Pulls a usable filename out of a Content-Disposition header. The
/// extended `filename*` parameter wins over plain `filename`; quotes,
/// the RFC 5987 charset prefix, and any path components are stripped.
fn filename_from_content_disposition(header: &str) -> Option<String> {
    let mut plain = None;
    let mut extended = None;
    for param in header.split(';') {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let value = value.trim().trim_matches('"');
        match key.as_str() {
            "filename*" => {
                let value = value.rsplit_once("''").map_or(value, |(_, name)| name);
                extended = Some(value.to_string());
            }
            "filename" => plain = Some(value.to_string()),
            _ => {}
        }
    }
    let name = extended.or(plain)?;
    let name = name.rsplit(['/', '\\']).next().unwrap_or(&name).to_string();
    (!name.is_empty()).then_some(name)
}
