use chrono::NaiveDateTime;
use serde::Deserialize;

/// Metadata for one uploaded supporting document.
///
/// Fetched fresh on each view; callers refetch after an upload or delete
/// instead of caching across navigations.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactInfo {
    pub id: i64,
    #[serde(default)]
    pub policy_number: Option<i64>,
    pub file_name: String,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub uploaded_at: Option<NaiveDateTime>,
}
