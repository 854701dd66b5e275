//! Load configuration via `config` crate with env-override support.

use std::{ops::Deref, sync::Arc, time::Duration};

use serde::Deserialize;
use serde_with::{DurationSeconds, serde_as};

use crate::runtime::HEALTH_PATH;

use super::types::{Res, Void};

/// Default address the webhook server binds to.
fn default_bind_address() -> String {
    "0.0.0.0:8080".to_string()
}

/// Default path of the webhook endpoint.
fn default_webhook_path() -> String {
    "/".to_string()
}

/// Default deadline for fetching a shared page.
fn default_fetch_timeout() -> Duration {
    Duration::from_secs(10)
}

/// Default ceiling on the number of bytes read from a shared page (2 MiB).
fn default_fetch_max_body_bytes() -> usize {
    2 * 1024 * 1024
}

/// Default ceiling on the inbound webhook body (1 MiB).
fn default_webhook_max_body_bytes() -> usize {
    1024 * 1024
}

/// Default LINE API base URL.
fn default_line_api_base() -> String {
    "https://api.line.me".to_string()
}

/// Default Notion API base URL.
fn default_notion_api_base() -> String {
    "https://api.notion.com".to_string()
}

/// Default `Notion-Version` header value.
fn default_notion_version() -> String {
    "2022-06-28".to_string()
}

/// Default name of the title column in the destination database.
fn default_notion_title_property() -> String {
    "Name".to_string()
}

/// Default name of the link column in the destination database.
fn default_notion_url_property() -> String {
    "リンク".to_string()
}

/// Configuration for the recipena application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The shared configuration values.
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl From<ConfigInner> for Config {
    fn from(inner: ConfigInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

/// Configuration values, as read from the config file and environment variables.
///
/// Each field can be set through its upper-case environment variable, either bare
/// (`LINE_CHANNEL_SECRET`) or prefixed (`RECIPENA_LINE_CHANNEL_SECRET`).
#[serde_as]
#[derive(Debug, Deserialize, Clone)]
pub struct ConfigInner {
    /// LINE channel secret used to verify webhook signatures (`LINE_CHANNEL_SECRET`).
    pub line_channel_secret: String,
    /// LINE channel access token used to send replies (`LINE_CHANNEL_TOKEN`).
    pub line_channel_token: String,
    /// Notion integration token (`NOTION_INTEGRATION_TOKEN`).
    pub notion_integration_token: String,
    /// Destination Notion database ID (`NOTION_DATABASE_ID`).
    pub notion_database_id: String,
    /// Address the webhook server listens on (`BIND_ADDRESS`).
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Path of the POST webhook endpoint (`WEBHOOK_PATH`).
    #[serde(default = "default_webhook_path")]
    pub webhook_path: String,
    /// Request deadline for fetching a shared page, in seconds (`FETCH_TIMEOUT_SECS`).
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(rename = "fetch_timeout_secs", default = "default_fetch_timeout")]
    pub fetch_timeout: Duration,
    /// Maximum number of bytes read from a shared page (`FETCH_MAX_BODY_BYTES`).
    #[serde(default = "default_fetch_max_body_bytes")]
    pub fetch_max_body_bytes: usize,
    /// Maximum size of an inbound webhook body (`WEBHOOK_MAX_BODY_BYTES`).
    #[serde(default = "default_webhook_max_body_bytes")]
    pub webhook_max_body_bytes: usize,
    /// LINE API base URL (`LINE_API_BASE`).
    #[serde(default = "default_line_api_base")]
    pub line_api_base: String,
    /// Notion API base URL (`NOTION_API_BASE`).
    #[serde(default = "default_notion_api_base")]
    pub notion_api_base: String,
    /// Notion API version header (`NOTION_VERSION`).
    #[serde(default = "default_notion_version")]
    pub notion_version: String,
    /// Title column of the destination database (`NOTION_TITLE_PROPERTY`).
    #[serde(default = "default_notion_title_property")]
    pub notion_title_property: String,
    /// URL column of the destination database (`NOTION_URL_PROPERTY`).
    #[serde(default = "default_notion_url_property")]
    pub notion_url_property: String,
}

impl Default for ConfigInner {
    fn default() -> Self {
        Self {
            line_channel_secret: String::new(),
            line_channel_token: String::new(),
            notion_integration_token: String::new(),
            notion_database_id: String::new(),
            bind_address: default_bind_address(),
            webhook_path: default_webhook_path(),
            fetch_timeout: default_fetch_timeout(),
            fetch_max_body_bytes: default_fetch_max_body_bytes(),
            webhook_max_body_bytes: default_webhook_max_body_bytes(),
            line_api_base: default_line_api_base(),
            notion_api_base: default_notion_api_base(),
            notion_version: default_notion_version(),
            notion_title_property: default_notion_title_property(),
            notion_url_property: default_notion_url_property(),
        }
    }
}

impl Config {
    /// Loads and validates the configuration.
    ///
    /// Bare environment variables are read first, then `RECIPENA_*` ones; an
    /// explicit file path (or `.hidden/config.toml` when present) is layered on top.
    pub fn load(explicit_path: Option<&std::path::Path>) -> Res<Self> {
        Self::load_with_env(explicit_path, None)
    }

    /// Like [`Config::load`], reading variables from `env` instead of the process
    /// environment when given.
    fn load_with_env(explicit_path: Option<&std::path::Path>, env: Option<config::Map<String, String>>) -> Res<Self> {
        let mut cfg = config::Config::builder()
            .add_source(config::Environment::default().source(env.clone()))
            .add_source(config::Environment::with_prefix("RECIPENA").source(env));

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        let result = Config::from(cfg.build()?.try_deserialize::<ConfigInner>()?);

        result.validate()?;

        Ok(result)
    }

    /// Checks the loaded values; any failure here is fatal at startup.
    pub fn validate(&self) -> Void {
        let required = [
            ("line_channel_secret", &self.line_channel_secret),
            ("line_channel_token", &self.line_channel_token),
            ("notion_integration_token", &self.notion_integration_token),
            ("notion_database_id", &self.notion_database_id),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(anyhow::anyhow!("Configuration value `{name}` must be set."));
            }
        }

        if !self.webhook_path.starts_with('/') {
            return Err(anyhow::anyhow!("Webhook path must start with `/`."));
        }

        if self.webhook_path == HEALTH_PATH {
            return Err(anyhow::anyhow!("Webhook path cannot be `{HEALTH_PATH}`."));
        }

        if self.fetch_timeout.is_zero() {
            return Err(anyhow::anyhow!("Fetch timeout must be greater than zero."));
        }

        if self.fetch_max_body_bytes == 0 {
            return Err(anyhow::anyhow!("Fetch max body bytes must be greater than zero."));
        }

        if self.webhook_max_body_bytes == 0 {
            return Err(anyhow::anyhow!("Webhook max body bytes must be greater than zero."));
        }

        Ok(())
    }
}
