//! LINE Messaging API implementation of the chat client.
//!
//! Only the reply endpoint is used: each delivered event carries a
//! single-use reply token, and the answer is posted against it.

use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::base::{
    config::Config,
    types::{Res, Void},
};

use super::{ChatClient, GenericChatClient};

// Extra methods on `ChatClient` applied by the LINE implementation.

impl ChatClient {
    /// Creates a new LINE chat client.
    pub fn line(config: &Config) -> Res<Self> {
        let client = LineChatClient::new(config)?;
        Ok(Self { inner: Arc::new(client) })
    }
}

// Wire types.

/// Body of `POST /v2/bot/message/reply`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplyMessageRequest<'a> {
    reply_token: &'a str,
    messages: Vec<LineMessage>,
}

/// Outbound message object; only text is sent.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum LineMessage {
    Text { text: String },
}

// Structs.

/// LINE chat client implementation.
#[derive(Clone)]
struct LineChatClient {
    client: reqwest::Client,
    reply_url: String,
    channel_token: String,
}

impl LineChatClient {
    fn new(config: &Config) -> Res<Self> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            reply_url: format!("{}/v2/bot/message/reply", config.line_api_base.trim_end_matches('/')),
            channel_token: config.line_channel_token.clone(),
        })
    }
}

#[async_trait]
impl GenericChatClient for LineChatClient {
    #[instrument(skip(self, texts))]
    async fn reply_messages(&self, reply_token: &str, texts: Vec<String>) -> Void {
        let request = ReplyMessageRequest {
            reply_token,
            messages: texts.into_iter().map(|text| LineMessage::Text { text }).collect(),
        };

        let response = self
            .client
            .post(&self.reply_url)
            .bearer_auth(&self.channel_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to send reply: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("LINE rejected the reply ({}): {}", status, body));
        }

        debug!("Reply sent.");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use axum::{
        Json, Router,
        extract::State,
        http::{HeaderMap, StatusCode},
        routing::post,
    };
    use serde_json::{Value, json};

    use super::*;
    use crate::base::config::ConfigInner;

    type Captured = Arc<Mutex<Vec<(HeaderMap, Value)>>>;

    async fn serve(status: StatusCode) -> (String, Captured) {
        let captured = Captured::default();

        let router = Router::new()
            .route(
                "/v2/bot/message/reply",
                post(move |State(captured): State<Captured>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    captured.lock().unwrap().push((headers, body));
                    (status, Json(json!({})))
                }),
            )
            .with_state(captured.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        (format!("http://{addr}/"), captured)
    }

    fn client(base: &str) -> ChatClient {
        let config = Config::from(ConfigInner {
            line_channel_token: "channel-token".to_string(),
            line_api_base: base.to_string(),
            ..Default::default()
        });

        ChatClient::line(&config).unwrap()
    }

    #[test]
    fn test_reply_request_shape() {
        let request = ReplyMessageRequest {
            reply_token: "token-1",
            messages: vec![LineMessage::Text { text: "hello".to_string() }],
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "replyToken": "token-1", "messages": [{ "type": "text", "text": "hello" }] })
        );
    }

    #[tokio::test]
    async fn test_reply_text() {
        let (base, captured) = serve(StatusCode::OK).await;

        client(&base).reply_text("token-1", "Notionに登録したよ ✨").await.unwrap();

        let captured = captured.lock().unwrap();
        assert_eq!(captured.len(), 1);

        let (headers, body) = &captured[0];
        assert_eq!(headers["authorization"], "Bearer channel-token");
        assert_eq!(body["replyToken"], "token-1");
        assert_eq!(body["messages"][0]["text"], "Notionに登録したよ ✨");
    }

    #[tokio::test]
    async fn test_reply_surfaces_rejection() {
        let (base, _captured) = serve(StatusCode::BAD_REQUEST).await;

        let err = client(&base).reply_text("expired", "hi").await.unwrap_err();

        assert!(err.to_string().contains("400"));
    }
}
