//! The LINE webhook endpoint.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use tracing::{error, info, instrument, warn};

use crate::{
    interaction::{
        dispatch,
        event::WebhookPayload,
        signature::{self, SIGNATURE_HEADER},
    },
    runtime::Runtime,
};

/// Handles one webhook delivery.
///
/// Responds `400` when the signature is missing or wrong, `500` when the
/// payload cannot be used, and `200` once every event has been handled in
/// delivery order (regardless of per-event failures).
#[instrument(skip_all)]
pub async fn handle_webhook(State(runtime): State<Runtime>, headers: HeaderMap, body: Bytes) -> StatusCode {
    let provided = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok());

    if let Err(err) = signature::verify(&runtime.config.line_channel_secret, provided, &body) {
        warn!("Rejecting webhook request: {}", err);
        return err.status();
    }

    let payload: WebhookPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(err) => {
            error!("Cannot parse webhook payload: {}", err);
            return StatusCode::INTERNAL_SERVER_ERROR;
        }
    };

    info!("Handling {} event(s) for `{}` ...", payload.events.len(), payload.destination);

    for event in payload.events {
        dispatch::handle_event(event, &runtime.title, &runtime.store, &runtime.chat).await;
    }

    StatusCode::OK
}
