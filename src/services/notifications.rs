use serde_json::json;

use crate::{
    db::unique_id,
    models::broadcast::{Broadcast, Priority},
    platform::{
        messaging::{PushMessage, SentMessage},
        PlatformClient, PlatformResult,
    },
};

/// Longest push body, in characters, before truncation.
const MAX_BODY_CHARS: usize = 200;
const ELLIPSIS: &str = "...";

pub struct NotificationService;

impl NotificationService {
    pub fn title_for(priority: Priority) -> &'static str {
        match priority {
            Priority::Urgent => "⚠️ Urgent Broadcast",
            Priority::High => "⚠️ Important Broadcast",
            Priority::Normal | Priority::Low => "📢 New Broadcast",
        }
    }

    /// The broadcast text, cut to `MAX_BODY_CHARS` including the ellipsis.
    pub fn body_for(text: &str) -> String {
        if text.chars().count() <= MAX_BODY_CHARS {
            return text.to_string();
        }
        let keep = MAX_BODY_CHARS - ELLIPSIS.len();
        let mut body: String = text.chars().take(keep).collect();
        body.push_str(ELLIPSIS);
        body
    }

    /// Send one push addressed to every recipient of the broadcast.
    pub async fn notify_broadcast(
        platform: &PlatformClient,
        broadcast: &Broadcast,
        recipients: &[String],
    ) -> PlatformResult<SentMessage> {
        let body = Self::body_for(&broadcast.text);
        let message = PushMessage {
            message_id: unique_id(),
            title: Self::title_for(broadcast.priority),
            body: &body,
            users: recipients,
            data: json!({
                "type": "broadcast",
                "broadcastId": broadcast.id,
                "priority": broadcast.priority,
            }),
        };

        let sent = platform.send_push(&message).await?;
        tracing::info!(
            "Push {} queued for broadcast {} ({} recipient(s), status {})",
            sent.id,
            broadcast.id,
            recipients.len(),
            sent.status
        );
        Ok(sent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_escalates_for_high_and_urgent() {
        assert!(NotificationService::title_for(Priority::Urgent).starts_with("⚠️"));
        assert!(NotificationService::title_for(Priority::High).starts_with("⚠️"));
        assert!(!NotificationService::title_for(Priority::Normal).starts_with("⚠️"));
        assert!(!NotificationService::title_for(Priority::Low).starts_with("⚠️"));
    }

    #[test]
    fn test_short_body_unchanged() {
        let text = "a".repeat(200);
        assert_eq!(NotificationService::body_for(&text), text);
    }

    #[test]
    fn test_long_body_truncated_with_ellipsis() {
        let text = "é".repeat(250);
        let body = NotificationService::body_for(&text);
        assert_eq!(body.chars().count(), 200);
        assert!(body.ends_with("..."));
        assert!(body.starts_with("éé"));
    }
}
