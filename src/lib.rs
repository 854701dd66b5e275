//! Library root for `recipena`.
//!
//! Recipena is a LINE bot that keeps a Notion database of shared links:
//! - Receives LINE webhook deliveries and verifies their signature
//! - Fetches the page behind a shared URL and extracts its title
//! - Creates a Notion page holding the title and the link
//! - Replies to the user with the outcome
//!
//! The external services sit behind traits so each can be swapped or mocked.

#[deny(missing_docs)]
pub mod base;
pub mod interaction;
pub mod runtime;
pub mod service;

use base::{config::Config, types::Void};
use tracing::info;

/// Public async entry for the binary crate.
///
/// Sets up necessary services and starts the recipena runtime:
/// - Creates the runtime context with title, Notion, and LINE clients
/// - Serves the webhook until Ctrl-C
pub async fn start(config: Config) -> Void {
    info!("Starting recipena ...");

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config)?;

    // Start the runtime.
    runtime.start().await?;

    Ok(())
}
