use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

use crate::{
    db::{unique_id, Database},
    error::{ApiError, ApiResult},
    models::{
        broadcast::{
            Broadcast, BroadcastPatch, CreateBroadcastRequest, DeleteBroadcastRequest,
            NewBroadcast, Priority, UpdateBroadcastRequest, VideoSource,
        },
        field::Field,
    },
    platform::permission::recipient_permissions,
    services::{
        media::{AttachmentSummary, VideoAttachmentService},
        metrics::PUSH_COUNTER,
        notifications::NotificationService,
        outcome::Outcome,
        targets::{TargetDirective, TargetResolver},
    },
    AppState,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBroadcastResponse {
    pub ok: bool,
    pub result: &'static str,
    pub broadcast: Value,
    pub target_count: usize,
    pub push_sent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push_message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push_skipped: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push_error: Option<String>,
    pub file_attached: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_file_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_access_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_attach_error: Option<String>,
}

impl CreateBroadcastResponse {
    fn new(
        broadcast: &Broadcast,
        target_count: usize,
        push: Outcome<String>,
        attachment: Outcome<AttachmentSummary>,
    ) -> Self {
        let summary = attachment.done();
        Self {
            ok: true,
            result: "created",
            broadcast: broadcast.to_response(),
            target_count,
            push_sent: push.done().is_some(),
            push_message_id: push.done().cloned(),
            push_skipped: push.skipped(),
            push_error: push.error().map(String::from),
            file_attached: summary.is_some(),
            media_file_id: summary.map(|s| s.media_file_id.clone()),
            file_access_count: summary.map(|s| s.access_records),
            file_attach_error: attachment.error().map(String::from),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateBroadcastResponse {
    pub ok: bool,
    pub result: &'static str,
    pub broadcast: Value,
}

#[derive(Debug, Serialize)]
pub struct DeleteBroadcastResponse {
    pub ok: bool,
    pub result: &'static str,
    pub message: String,
}

pub struct BroadcastService;

impl BroadcastService {
    pub async fn create(
        state: &AppState,
        req: CreateBroadcastRequest,
    ) -> ApiResult<CreateBroadcastResponse> {
        let config = &state.config;

        let text = req.text.as_deref().unwrap_or_default();
        if text.trim().is_empty() {
            return Err(ApiError::validation("text is required"));
        }
        let priority = parse_priority(req.priority.as_deref())?;
        let directive = TargetDirective::from_request(&req)?;

        let db = Database::new(&state.platform, &config.database_id);
        let targets = TargetResolver::resolve(&db, &config.users_collection_id, &directive).await?;
        if targets.is_empty() {
            return Err(ApiError::validation("No target users found"));
        }

        let permissions = recipient_permissions(&targets, &config.admin_team_id);
        let video = VideoSource::from_request(req.video_url.as_deref(), req.storage_file_id.as_deref());
        let is_active = req.is_active.unwrap_or(true);

        let new_broadcast = NewBroadcast {
            text: text.to_string(),
            priority,
            video_url: video.clone(),
            created_at: Utc::now().timestamp_millis(),
            is_active,
        };
        let broadcast: Broadcast = db
            .create_document(
                &config.broadcasts_collection_id,
                &unique_id(),
                &new_broadcast,
                &permissions,
            )
            .await?;
        tracing::info!(
            "Created broadcast {} ({}) for {} target(s)",
            broadcast.id,
            broadcast.priority,
            targets.len()
        );

        let push = if is_active {
            let outcome = Outcome::from_result(
                NotificationService::notify_broadcast(&state.platform, &broadcast, &targets)
                    .await
                    .map(|sent| sent.id),
            );
            if let Some(e) = outcome.error() {
                tracing::warn!("Push for broadcast {} failed: {}", broadcast.id, e);
            }
            outcome
        } else {
            tracing::debug!("Broadcast {} inactive, no push sent", broadcast.id);
            Outcome::Skipped("inactive")
        };
        let push_status = match &push {
            Outcome::Done(_) => "ok",
            Outcome::Skipped(_) => "skipped",
            Outcome::Failed(_) => "error",
        };
        PUSH_COUNTER.with_label_values(&[push_status]).inc();

        let file_id = video.as_ref().and_then(VideoSource::storage_file_id);
        let attachment = match (file_id, config.media_targets()) {
            (Some(file_id), Some(media_targets)) => {
                let service = VideoAttachmentService {
                    platform: &state.platform,
                    db,
                    targets: media_targets,
                    admin_team_id: &config.admin_team_id,
                    admin_user_id: config.admin_user_id.as_deref(),
                    concurrency: config.file_access_concurrency,
                };
                let outcome =
                    Outcome::from_result(service.attach(file_id, &broadcast.id, &targets).await);
                if let Some(e) = outcome.error() {
                    tracing::warn!(
                        "Attaching file {} to broadcast {} failed: {}",
                        file_id,
                        broadcast.id,
                        e
                    );
                }
                outcome
            }
            (Some(file_id), None) => {
                tracing::debug!(
                    "Media collections not configured, file {} not shared",
                    file_id
                );
                Outcome::Skipped("media not configured")
            }
            (None, _) => Outcome::Skipped("no storage file"),
        };

        Ok(CreateBroadcastResponse::new(
            &broadcast,
            targets.len(),
            push,
            attachment,
        ))
    }

    pub async fn update(
        state: &AppState,
        req: UpdateBroadcastRequest,
    ) -> ApiResult<UpdateBroadcastResponse> {
        let document_id = required_document_id(req.document_id.as_deref())?;
        let patch = build_patch(&req)?;

        let db = Database::new(&state.platform, &state.config.database_id);
        let broadcast: Broadcast = db
            .update_document(&state.config.broadcasts_collection_id, document_id, &patch)
            .await?;
        tracing::info!("Updated broadcast {}", broadcast.id);

        Ok(UpdateBroadcastResponse {
            ok: true,
            result: "updated",
            broadcast: broadcast.to_response(),
        })
    }

    pub async fn delete(
        state: &AppState,
        req: DeleteBroadcastRequest,
    ) -> ApiResult<DeleteBroadcastResponse> {
        let document_id = required_document_id(req.document_id.as_deref())?;

        let db = Database::new(&state.platform, &state.config.database_id);
        db.delete_document(&state.config.broadcasts_collection_id, document_id)
            .await?;
        tracing::info!("Deleted broadcast {}", document_id);

        Ok(DeleteBroadcastResponse {
            ok: true,
            result: "deleted",
            message: format!("Broadcast {document_id} deleted"),
        })
    }
}

fn parse_priority(raw: Option<&str>) -> ApiResult<Priority> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s.parse().map_err(|e: anyhow::Error| ApiError::validation(e.to_string())),
        None => Ok(Priority::default()),
    }
}

fn required_document_id(raw: Option<&str>) -> ApiResult<&str> {
    raw.map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::validation("documentId is required"))
}

/// Turn the fields present in an update request into a patch.
///
/// A storage file id wins over a plain URL; a present `null` or blank value
/// for either clears the stored video URL.
pub fn build_patch(req: &UpdateBroadcastRequest) -> ApiResult<BroadcastPatch> {
    let mut patch = BroadcastPatch::default();

    match &req.text {
        Field::Absent => {}
        Field::Null => return Err(ApiError::validation("text cannot be null")),
        Field::Present(text) if text.trim().is_empty() => {
            return Err(ApiError::validation("text cannot be empty"))
        }
        Field::Present(text) => patch.text = Some(text.clone()),
    }

    match &req.priority {
        Field::Absent => {}
        Field::Null => return Err(ApiError::validation("priority cannot be null")),
        Field::Present(raw) if raw.trim().is_empty() => {
            return Err(ApiError::validation("priority cannot be empty"))
        }
        Field::Present(raw) => patch.priority = Some(parse_priority(Some(raw.as_str()))?),
    }

    match req.is_active {
        Field::Absent => {}
        Field::Null => return Err(ApiError::validation("isActive cannot be null")),
        Field::Present(active) => patch.is_active = Some(active),
    }

    if !req.video_url.is_absent() || !req.storage_file_id.is_absent() {
        let present = |field: &Field<String>| match field {
            Field::Present(v) => Some(v.clone()),
            _ => None,
        };
        patch.video_url = Some(VideoSource::from_request(
            present(&req.video_url).as_deref(),
            present(&req.storage_file_id).as_deref(),
        ));
    }

    if patch.is_empty() {
        return Err(ApiError::validation(
            "No fields to update (expected text, priority, videoUrl, storageFileId or isActive)",
        ));
    }
    Ok(patch)
}
