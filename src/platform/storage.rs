use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{PlatformClient, PlatformResult};

/// Metadata of an object in a storage bucket.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredFile {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "mimeType")]
    pub mime_type: String,
    #[serde(default, rename = "sizeOriginal")]
    pub size: u64,
}

impl PlatformClient {
    pub async fn get_file(&self, bucket_id: &str, file_id: &str) -> PlatformResult<StoredFile> {
        let req = self.request(Method::GET, &format!("/storage/buckets/{bucket_id}/files/{file_id}"));
        self.execute(req).await
    }

    /// Replace the permission list of an existing object.
    pub async fn update_file_permissions(
        &self,
        bucket_id: &str,
        file_id: &str,
        permissions: &[String],
    ) -> PlatformResult<StoredFile> {
        #[derive(Serialize)]
        struct UpdateRequest<'a> {
            permissions: &'a [String],
        }

        let req = self
            .request(Method::PUT, &format!("/storage/buckets/{bucket_id}/files/{file_id}"))
            .json(&UpdateRequest { permissions });
        self.execute(req).await
    }
}
