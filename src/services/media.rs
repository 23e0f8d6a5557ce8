use chrono::Utc;
use futures_util::{stream, FutureExt, StreamExt};

use crate::{
    config::MediaTargets,
    db::{unique_id, Database, DocumentRef},
    models::media::{AccessType, FileAccessRecord, MediaFileRecord, BROADCAST_FOLDER},
    platform::{permission::recipient_permissions, PlatformClient, PlatformResult},
    services::metrics::FILE_ACCESS_COUNTER,
};

/// What the video attachment managed to do.
#[derive(Debug, Clone, PartialEq)]
pub struct AttachmentSummary {
    pub media_file_id: String,
    pub permissions_updated: bool,
    pub access_records: usize,
}

/// Shares an uploaded video with a broadcast's recipients.
pub struct VideoAttachmentService<'a> {
    pub platform: &'a PlatformClient,
    pub db: Database<'a>,
    pub targets: MediaTargets<'a>,
    pub admin_team_id: &'a str,
    pub admin_user_id: Option<&'a str>,
    /// Max in-flight access record creations; 1 means strictly sequential.
    pub concurrency: usize,
}

impl VideoAttachmentService<'_> {
    /// Grant recipients read on the object, describe it in the media files
    /// collection and give each recipient a `read` access record.
    ///
    /// Only the file lookup and the metadata record are fatal; the storage
    /// permission update and each access record fail independently.
    pub async fn attach(
        &self,
        file_id: &str,
        broadcast_id: &str,
        recipients: &[String],
    ) -> PlatformResult<AttachmentSummary> {
        let file = self.platform.get_file(self.targets.bucket_id, file_id).await?;
        let permissions = recipient_permissions(recipients, self.admin_team_id);

        let permissions_updated = match self
            .platform
            .update_file_permissions(self.targets.bucket_id, file_id, &permissions)
            .await
        {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(
                    "Failed to update permissions on file {} (status {:?}): {}",
                    file_id,
                    e.status(),
                    e
                );
                false
            }
        };

        let mime_type = if file.mime_type.is_empty() {
            mime_guess::from_path(&file.name)
                .first_or_octet_stream()
                .to_string()
        } else {
            file.mime_type.clone()
        };

        let record = MediaFileRecord {
            file_id,
            name: &file.name,
            mime_type: &mime_type,
            size: file.size,
            uploaded_by: self.admin_user_id,
            broadcast_id,
            folder: BROADCAST_FOLDER,
            created_at: Utc::now().timestamp_millis(),
        };
        let media_doc: DocumentRef = self
            .db
            .create_document(
                self.targets.media_files_collection_id,
                &unique_id(),
                &record,
                &permissions,
            )
            .await?;

        let access_records = self.grant_access(&media_doc.id, recipients).await;

        tracing::info!(
            "Attached file {} to broadcast {}: {}/{} access record(s)",
            file_id,
            broadcast_id,
            access_records,
            recipients.len()
        );

        Ok(AttachmentSummary {
            media_file_id: media_doc.id,
            permissions_updated,
            access_records,
        })
    }

    /// Create one access record per recipient, returning how many succeeded.
    async fn grant_access(&self, media_file_id: &str, recipients: &[String]) -> usize {
        let granted_at = Utc::now().timestamp_millis();

        stream::iter(recipients)
            .map(|user_id| async move {
                let record = FileAccessRecord {
                    file_id: media_file_id,
                    user_id,
                    access_type: AccessType::Read,
                    granted_by: self.admin_user_id,
                    granted_at,
                };
                let permissions = recipient_permissions(&[user_id], self.admin_team_id);
                let result: PlatformResult<DocumentRef> = self
                    .db
                    .create_document(
                        self.targets.file_access_collection_id,
                        &unique_id(),
                        &record,
                        &permissions,
                    )
                    .await;
                match result {
                    Ok(_) => {
                        FILE_ACCESS_COUNTER.with_label_values(&["ok"]).inc();
                        true
                    }
                    Err(e) => {
                        FILE_ACCESS_COUNTER.with_label_values(&["error"]).inc();
                        tracing::warn!("Failed to grant file access to user {}: {}", user_id, e);
                        false
                    }
                }
            })
            .buffer_unordered(self.concurrency.max(1))
            .fold(0usize, |count, granted| async move { count + usize::from(granted) })
            .boxed()
            .await
    }
}
