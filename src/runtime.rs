//! Runtime services and shared state for recipena.

use anyhow::Context;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument};

use crate::{
    base::{
        config::Config,
        types::{Res, Void},
    },
    interaction::webhook::handle_webhook,
    service::{chat::ChatClient, store::StoreClient, title::TitleClient},
};

/// Path of the liveness probe.
pub const HEALTH_PATH: &str = "/healthz";

/// Runtime service context that can be shared across the application.
///
/// This struct holds the configuration and one handle per external service.
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The title client instance.
    pub title: TitleClient,
    /// The store client instance.
    pub store: StoreClient,
    /// The chat client instance.
    pub chat: ChatClient,
}

impl Runtime {
    /// Create a new runtime instance.
    #[instrument(skip_all)]
    pub fn new(config: Config) -> Res<Self> {
        // Initialize the title client.
        let title = TitleClient::scrape(&config)?;

        // Initialize the Notion client.
        let store = StoreClient::notion(&config)?;

        // Initialize the LINE client.
        let chat = ChatClient::line(&config)?;

        Ok(Self { config, title, store, chat })
    }

    /// Builds the HTTP router: the webhook endpoint plus a liveness probe.
    pub fn router(&self) -> Router {
        Router::new()
            .route(&self.config.webhook_path, post(handle_webhook))
            .route(HEALTH_PATH, get(|| async { "ok" }))
            .layer(DefaultBodyLimit::max(self.config.webhook_max_body_bytes))
            .layer(TraceLayer::new_for_http())
            .with_state(self.clone())
    }

    /// Serves the router until Ctrl-C.
    pub async fn start(&self) -> Void {
        let listener = TcpListener::bind(&self.config.bind_address)
            .await
            .with_context(|| format!("Failed to bind to `{}`", self.config.bind_address))?;

        info!("Listening on {} (webhook at `{}`) ...", listener.local_addr()?, self.config.webhook_path);

        axum::serve(listener, self.router()).with_graceful_shutdown(shutdown_signal()).await?;

        info!("Server stopped.");

        Ok(())
    }
}

/// Resolves on Ctrl-C.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl-C, shutting down ..."),
        Err(err) => {
            error!("Failed to listen for Ctrl-C: {}", err);
            std::future::pending::<()>().await;
        }
    }
}
