pub mod line;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::Void;

// Traits.

/// Generic "chat" trait that clients must implement.
///
/// This trait defines the outbound half of the messaging platform: answering
/// a delivered event. Implementing this trait allows a different messaging
/// platform (or a test double) to be used with recipena.
#[async_trait]
pub trait GenericChatClient: Send + Sync + 'static {
    /// Reply to an event with one or more text messages.
    ///
    /// The reply token identifies the event being answered and can be used
    /// once. Failures are returned to the caller, which only logs them.
    async fn reply_messages(&self, reply_token: &str, texts: Vec<String>) -> Void;
}

// Structs.

/// Chat client for the application.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct ChatClient {
    inner: Arc<dyn GenericChatClient>,
}

impl Deref for ChatClient {
    type Target = dyn GenericChatClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl ChatClient {
    pub fn new(inner: Arc<dyn GenericChatClient>) -> Self {
        Self { inner }
    }

    /// Reply to an event with a single text message.
    pub async fn reply_text(&self, reply_token: &str, text: &str) -> Void {
        self.reply_messages(reply_token, vec![text.to_string()]).await
    }
}
