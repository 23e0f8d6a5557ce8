use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};

use super::field::Field;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

impl Priority {
    /// HIGH and URGENT broadcasts get the warning-style notification title.
    pub fn is_escalated(self) -> bool {
        matches!(self, Priority::High | Priority::Urgent)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Low => "LOW",
            Priority::Normal => "NORMAL",
            Priority::High => "HIGH",
            Priority::Urgent => "URGENT",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for Priority {
    type Err = anyhow::Error;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(Priority::Low),
            "NORMAL" => Ok(Priority::Normal),
            "HIGH" => Ok(Priority::High),
            "URGENT" => Ok(Priority::Urgent),
            _ => Err(anyhow::anyhow!(
                "Invalid priority '{s}' (expected low, normal, high or urgent)"
            )),
        }
    }
}

impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

const STORAGE_SCHEME: &str = "storage://";

/// Where a broadcast's video lives.
///
/// Persisted as a single string: plain URLs as-is, storage objects as
/// `storage://<fileId>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    Plain(String),
    Storage { file_id: String },
}

impl VideoSource {
    /// A `storage://` prefix with no id after it is kept as a plain URL.
    pub fn parse(s: &str) -> Self {
        match s.strip_prefix(STORAGE_SCHEME).map(str::trim) {
            Some(file_id) if !file_id.is_empty() => VideoSource::Storage {
                file_id: file_id.to_string(),
            },
            _ => VideoSource::Plain(s.to_string()),
        }
    }

    /// Picks the video from a request: a non-empty storage file id wins over
    /// a plain URL; empty strings count as nothing.
    pub fn from_request(video_url: Option<&str>, storage_file_id: Option<&str>) -> Option<Self> {
        let storage_file_id = storage_file_id.map(str::trim).filter(|s| !s.is_empty());
        let video_url = video_url.map(str::trim).filter(|s| !s.is_empty());

        match (storage_file_id, video_url) {
            (Some(id), _) => Some(VideoSource::Storage {
                file_id: id.to_string(),
            }),
            (None, Some(url)) => Some(VideoSource::parse(url)),
            (None, None) => None,
        }
    }

    pub fn storage_file_id(&self) -> Option<&str> {
        match self {
            VideoSource::Storage { file_id } => Some(file_id),
            VideoSource::Plain(_) => None,
        }
    }
}

impl fmt::Display for VideoSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoSource::Plain(url) => write!(f, "{url}"),
            VideoSource::Storage { file_id } => write!(f, "{STORAGE_SCHEME}{file_id}"),
        }
    }
}

impl Serialize for VideoSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VideoSource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(VideoSource::parse(&s))
    }
}

/// Broadcast document as stored in the broadcasts collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Broadcast {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub video_url: Option<VideoSource>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Broadcast {
    /// Snapshot returned to callers.
    pub fn to_response(&self) -> Value {
        json!({
            "id": self.id,
            "text": self.text,
            "priority": self.priority,
            "videoUrl": self.video_url,
            "createdAt": self.created_at,
            "isActive": self.is_active,
        })
    }
}

/// Payload for a new broadcast document.
#[derive(Debug, Clone, Serialize)]
pub struct NewBroadcast {
    pub text: String,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<VideoSource>,
    pub created_at: i64,
    pub is_active: bool,
}

/// Partial update payload; only `Some` fields are sent.
/// `video_url: Some(None)` clears the stored URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BroadcastPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<Option<VideoSource>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl BroadcastPatch {
    pub fn is_empty(&self) -> bool {
        *self == BroadcastPatch::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    #[default]
    All,
    Labels,
    Users,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBroadcastRequest {
    #[serde(default)]
    pub text: Option<String>,
    /// "low" | "normal" | "high" | "urgent", any case
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    /// Id of an already uploaded object in the media bucket
    #[serde(default)]
    pub storage_file_id: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub target_type: Option<TargetType>,
    #[serde(default)]
    pub target_labels: Option<Vec<String>>,
    #[serde(default)]
    pub target_user_ids: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBroadcastRequest {
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default)]
    pub text: Field<String>,
    #[serde(default)]
    pub priority: Field<String>,
    #[serde(default)]
    pub video_url: Field<String>,
    #[serde(default)]
    pub storage_file_id: Field<String>,
    #[serde(default)]
    pub is_active: Field<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteBroadcastRequest {
    #[serde(default)]
    pub document_id: Option<String>,
}
