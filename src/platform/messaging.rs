use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{PlatformClient, PlatformResult};

/// Push message addressed to a list of account ids.
#[derive(Debug, Clone, Serialize)]
pub struct PushMessage<'a> {
    #[serde(rename = "messageId")]
    pub message_id: String,
    pub title: &'a str,
    pub body: &'a str,
    pub users: &'a [String],
    pub data: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SentMessage {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(default)]
    pub status: String,
}

impl PlatformClient {
    pub async fn send_push(&self, message: &PushMessage<'_>) -> PlatformResult<SentMessage> {
        let req = self
            .request(Method::POST, "/messaging/messages/push")
            .json(message);
        self.execute(req).await
    }
}
