//! Inbound LINE webhook payload.
//!
//! Only the shapes recipena acts on are modelled; every other event or
//! message type is kept as `Other` with its `type` tag so it can be logged
//! and skipped.

use serde::{Deserialize, Deserializer, de::Error as _};
use serde_json::Value;

/// One webhook delivery: a batch of events for a bot.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    /// User ID of the bot that should receive the events.
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

/// A single delivered event.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookEvent {
    Message(MessageEvent),
    Other { kind: String },
}

/// A `message` event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEvent {
    /// Absent for events that cannot be replied to (e.g. redeliveries).
    #[serde(default)]
    pub reply_token: Option<String>,
    pub message: MessageContent,
}

/// The content of a `message` event.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent {
    Text { text: String },
    Sticker { sticker_id: String, sticker_resource_type: String },
    Other { kind: String },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextContent {
    text: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StickerContent {
    sticker_id: String,
    #[serde(default)]
    sticker_resource_type: String,
}

fn type_tag(value: &Value) -> String {
    value.get("type").and_then(Value::as_str).unwrap_or_default().to_string()
}

impl<'de> Deserialize<'de> for WebhookEvent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let kind = type_tag(&value);

        match kind.as_str() {
            "message" => serde_json::from_value(value).map(Self::Message).map_err(D::Error::custom),
            _ => Ok(Self::Other { kind }),
        }
    }
}

impl<'de> Deserialize<'de> for MessageContent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let kind = type_tag(&value);

        match kind.as_str() {
            "text" => {
                let TextContent { text } = serde_json::from_value(value).map_err(D::Error::custom)?;
                Ok(Self::Text { text })
            }
            "sticker" => {
                let StickerContent { sticker_id, sticker_resource_type } = serde_json::from_value(value).map_err(D::Error::custom)?;
                Ok(Self::Sticker { sticker_id, sticker_resource_type })
            }
            _ => Ok(Self::Other { kind }),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_text_message() {
        let payload: WebhookPayload = serde_json::from_value(json!({
            "destination": "U0001",
            "events": [{
                "type": "message",
                "mode": "active",
                "timestamp": 1462629479859u64,
                "source": { "type": "user", "userId": "U4af4980629" },
                "webhookEventId": "01FZ74A0TDDPYRVKNK77XKC3ZR",
                "deliveryContext": { "isRedelivery": false },
                "replyToken": "nHuyWiB7yP5Zw52FIkcQobQuGDXCTA",
                "message": { "id": "444573844083572737", "type": "text", "quoteToken": "q3Plxr4", "text": "https://example.com/a" }
            }]
        }))
        .unwrap();

        assert_eq!(payload.destination, "U0001");
        assert_eq!(
            payload.events,
            vec![WebhookEvent::Message(MessageEvent {
                reply_token: Some("nHuyWiB7yP5Zw52FIkcQobQuGDXCTA".to_string()),
                message: MessageContent::Text {
                    text: "https://example.com/a".to_string()
                },
            })]
        );
    }

    #[test]
    fn test_parse_sticker_message() {
        let event: WebhookEvent = serde_json::from_value(json!({
            "type": "message",
            "replyToken": "r",
            "message": { "id": "1", "type": "sticker", "packageId": "446", "stickerId": "1988", "stickerResourceType": "ANIMATION" }
        }))
        .unwrap();

        assert_eq!(
            event,
            WebhookEvent::Message(MessageEvent {
                reply_token: Some("r".to_string()),
                message: MessageContent::Sticker {
                    sticker_id: "1988".to_string(),
                    sticker_resource_type: "ANIMATION".to_string(),
                },
            })
        );
    }

    #[test]
    fn test_parse_unsupported_kinds() {
        let payload: WebhookPayload = serde_json::from_value(json!({
            "destination": "U0001",
            "events": [
                { "type": "follow", "replyToken": "r1" },
                { "type": "message", "replyToken": "r2", "message": { "id": "2", "type": "image" } }
            ]
        }))
        .unwrap();

        assert_eq!(payload.events[0], WebhookEvent::Other { kind: "follow".to_string() });
        assert_eq!(
            payload.events[1],
            WebhookEvent::Message(MessageEvent {
                reply_token: Some("r2".to_string()),
                message: MessageContent::Other { kind: "image".to_string() },
            })
        );
    }

    #[test]
    fn test_parse_empty_batch() {
        let payload: WebhookPayload = serde_json::from_str(r#"{"destination":"U0001","events":[]}"#).unwrap();

        assert!(payload.events.is_empty());
    }

    #[test]
    fn test_parse_message_without_content_fails() {
        let result = serde_json::from_value::<WebhookEvent>(json!({ "type": "message", "replyToken": "r" }));

        assert!(result.is_err());
    }
}
