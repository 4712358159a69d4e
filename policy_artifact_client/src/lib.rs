//! File transfer client for policy artifacts.
//!
//! Wraps [`PolicyServiceClient`] for the binary endpoints: multipart
//! uploads with a client-side size check, downloads saved to disk under
//! the server-suggested filename, and the bulk Excel export.

use policy_service_client::PolicyServiceClient;

pub mod download;
pub mod manage;
pub mod upload;

pub use upload::ArtifactUpload;

/// Per-file upload cap, matching the backend's configured limit.
pub const MAX_ARTIFACT_SIZE_BYTES: u64 = 1_048_576;

/// Multipart field name the backend reads the file from.
pub(crate) static FILE_FIELD: &str = "file";

#[derive(Clone)]
pub struct ArtifactClient {
    api: PolicyServiceClient,
}

impl ArtifactClient {
    pub fn new(api: PolicyServiceClient) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &PolicyServiceClient {
        &self.api
    }
}
