//! Page title extraction over plain HTTP.
//!
//! Fetches the shared page with `reqwest` (bounded by a deadline and a body
//! ceiling) and walks the `scraper` document tree for the first `<title>`.

use std::sync::Arc;

use async_trait::async_trait;
use scraper::{Html, Node};
use tracing::{debug, instrument};

use crate::base::{config::Config, error::FetchError, types::Res};

use super::{GenericTitleClient, TitleClient};

// Extra methods on `TitleClient` applied by the scrape implementation.

impl TitleClient {
    /// Creates a new scraping title client.
    pub fn scrape(config: &Config) -> Res<Self> {
        let client = ScrapeTitleClient::new(config)?;
        Ok(Self { inner: Arc::new(client) })
    }
}

// Structs.

/// Scraping title client implementation.
#[derive(Clone)]
struct ScrapeTitleClient {
    client: reqwest::Client,
    max_body_bytes: usize,
}

impl ScrapeTitleClient {
    fn new(config: &Config) -> Res<Self> {
        let client = reqwest::Client::builder().timeout(config.fetch_timeout).build()?;

        Ok(Self {
            client,
            max_body_bytes: config.fetch_max_body_bytes,
        })
    }

    /// Reads the whole body, refusing anything over the configured ceiling.
    async fn fetch_body(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let mut response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        if let Some(length) = response.content_length()
            && length > self.max_body_bytes as u64
        {
            return Err(FetchError::TooLarge { limit: self.max_body_bytes });
        }

        let mut body = Vec::new();

        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > self.max_body_bytes {
                return Err(FetchError::TooLarge { limit: self.max_body_bytes });
            }

            body.extend_from_slice(&chunk);
        }

        Ok(body)
    }
}

#[async_trait]
impl GenericTitleClient for ScrapeTitleClient {
    #[instrument(skip(self))]
    async fn fetch_title(&self, url: &str) -> Res<String> {
        let body = self.fetch_body(url).await?;

        debug!("Fetched {} bytes.", body.len());

        let document = String::from_utf8_lossy(&body);
        let title = extract_title(&document).ok_or(FetchError::TitleNotFound)?;

        Ok(title)
    }
}

/// Returns the text of the first `<title>` element in document order.
///
/// The tree is walked depth-first in pre-order and the walk stops at the
/// first `title` element. Its first text child is returned as is. If that
/// element has no text child, or the text is empty, there is no title: later
/// `title` elements are not consulted.
pub fn extract_title(document: &str) -> Option<String> {
    let html = Html::parse_document(document);

    let title = html.tree.root().descendants().find(|node| matches!(node.value(), Node::Element(element) if element.name() == "title"))?;

    let Node::Text(text) = title.first_child()?.value() else {
        return None;
    };

    (!text.is_empty()).then(|| text.to_string())
}
