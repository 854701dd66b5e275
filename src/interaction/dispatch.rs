//! Per-event handling for delivered LINE events.
//!
//! Each event is an independent unit of work: its failures are logged and
//! answered (where possible) without affecting the rest of the batch.

use anyhow::Context;
use tracing::{error, info, instrument, warn};
use url::Url;

use crate::{
    base::{messages, types::Void},
    interaction::event::{MessageContent, MessageEvent, WebhookEvent},
    service::{chat::ChatClient, store::StoreClient, title::TitleClient},
};

/// Handles one delivered event, replying to it when it calls for a reply.
#[instrument(skip_all)]
pub async fn handle_event(event: WebhookEvent, title: &TitleClient, store: &StoreClient, chat: &ChatClient) {
    match event {
        WebhookEvent::Message(message_event) => handle_message_event(message_event, title, store, chat).await,
        WebhookEvent::Other { kind } => warn!("Unsupported event type `{}`, skipping.", kind),
    }
}

#[instrument(skip_all)]
async fn handle_message_event(event: MessageEvent, title: &TitleClient, store: &StoreClient, chat: &ChatClient) {
    let Some(reply_token) = event.reply_token else {
        warn!("Message event has no reply token, skipping.");
        return;
    };

    let reply = match event.message {
        MessageContent::Text { text } => handle_text(&text, title, store).await,
        MessageContent::Sticker { sticker_id, sticker_resource_type } => messages::sticker_description(&sticker_id, &sticker_resource_type),
        MessageContent::Other { kind } => {
            warn!("Unsupported message content `{}`, skipping.", kind);
            return;
        }
    };

    // Reply failures are only logged; the rest of the batch still runs.
    if let Err(err) = chat.reply_text(&reply_token, &reply).await {
        error!("Failed to send reply: {:#}", err);
    }
}

/// Returns the reply text for a text message.
async fn handle_text(text: &str, title: &TitleClient, store: &StoreClient) -> String {
    if !is_link(text) {
        info!("Message is not a URL, prompting for one.");
        return messages::PROMPT_FOR_URL.to_string();
    }

    match register_link(text, title, store).await {
        Ok(()) => messages::REGISTRATION_SUCCEEDED.to_string(),
        Err(err) => {
            error!("Failed to register `{}`: {:#}", text, err);
            messages::REGISTRATION_FAILED.to_string()
        }
    }
}

/// Fetches the page title and records it with the link exactly as sent.
async fn register_link(url: &str, title: &TitleClient, store: &StoreClient) -> Void {
    let page_title = title.fetch_title(url).await.context("title extraction failed")?;

    store.create_link_record(&page_title, url).await.context("record creation failed")?;

    info!("Registered `{}` as `{}`.", url, page_title);

    Ok(())
}

/// Whether `text` is an absolute `http` or `https` URL.
///
/// `Url::parse` strips surrounding whitespace, so padded text is rejected up
/// front; the link is stored exactly as sent.
pub fn is_link(text: &str) -> bool {
    if text.trim() != text {
        return false;
    }

    Url::parse(text).map(|url| matches!(url.scheme(), "http" | "https")).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_link() {
        assert!(is_link("https://example.com/a"));
        assert!(is_link("http://example.com"));
        assert!(is_link("https://example.com/search?q=rust#top"));
    }

    #[test]
    fn test_is_not_link() {
        assert!(!is_link("hello"));
        assert!(!is_link("example.com"));
        assert!(!is_link("/relative/path"));
        assert!(!is_link("https://"));
        assert!(!is_link("mailto:someone@example.com"));
        assert!(!is_link(""));
    }

    #[test]
    fn test_padded_link_is_not_link() {
        assert!(!is_link(" https://example.com "));
        assert!(!is_link("https://example.com\n"));
        assert!(!is_link("\thttps://example.com"));
    }
}
