//! Notion implementation for recipena link storage.
//!
//! Records are pages created in a single Notion database, with the page
//! title in the title column and the shared link in a URL column.

use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use serde_json::{Map, Value, json};
use tracing::{info, instrument};

use crate::base::{
    config::Config,
    types::{Res, Void},
};

use super::{GenericStoreClient, StoreClient};

// Extra methods on `StoreClient` applied by the notion implementation.

impl StoreClient {
    /// Creates a new Notion store client.
    pub fn notion(config: &Config) -> Res<Self> {
        let client = NotionStoreClient::new(config)?;
        Ok(Self { inner: Arc::new(client) })
    }
}

// Structs.

/// Notion store client implementation.
#[derive(Clone)]
struct NotionStoreClient {
    client: reqwest::Client,
    pages_url: String,
    integration_token: String,
    notion_version: String,
    database_id: String,
    title_property: String,
    url_property: String,
}

impl NotionStoreClient {
    fn new(config: &Config) -> Res<Self> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            pages_url: format!("{}/v1/pages", config.notion_api_base.trim_end_matches('/')),
            integration_token: config.notion_integration_token.clone(),
            notion_version: config.notion_version.clone(),
            database_id: config.notion_database_id.clone(),
            title_property: config.notion_title_property.clone(),
            url_property: config.notion_url_property.clone(),
        })
    }

    /// Builds the create-page request body.
    fn page_request(&self, title: &str, url: &str) -> Value {
        let mut properties = Map::new();

        properties.insert(self.title_property.clone(), json!({ "title": [{ "text": { "content": title } }] }));
        properties.insert(self.url_property.clone(), json!({ "url": url }));

        json!({
            "parent": { "database_id": self.database_id },
            "properties": properties,
        })
    }
}

#[async_trait]
impl GenericStoreClient for NotionStoreClient {
    #[instrument(skip(self))]
    async fn create_link_record(&self, title: &str, url: &str) -> Void {
        let request = self.page_request(title, url);

        let response = self
            .client
            .post(&self.pages_url)
            .bearer_auth(&self.integration_token)
            .header("Notion-Version", &self.notion_version)
            .json(&request)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to create Notion page: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Notion rejected the page ({}): {}", status, body));
        }

        info!("Created Notion page for `{}`.", url);

        Ok(())
    }
}
