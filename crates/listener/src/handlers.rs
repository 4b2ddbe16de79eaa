//! Route handlers.

use axum::{extract::State, http::StatusCode, Json};
use board::{membership_change, WebhookPayload};
use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::{AppState, WebhookRejection};

/// Receives one webhook delivery.
///
/// Checks configuration, validates the payload, routes the action to its
/// handler, and dispatches the resulting membership change on a detached
/// task. Answers `200` as soon as the change is dispatched (or immediately
/// for unhandled actions); the outcome of the outbound call never affects
/// the response.
///
/// # Errors
///
/// - `500` with `{"error":"Oops."}` if credentials are not configured
/// - `400` with `{"error":"Not a valid request."}` if validation fails
#[instrument(name = "receive_webhook", skip_all, fields(content_length = body.len()))]
pub async fn receive_webhook(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<StatusCode, WebhookRejection> {
    let Some(dispatcher) = state.dispatcher() else {
        error!("Rejecting webhook: Trello credentials are not configured");
        return Err(WebhookRejection::Unconfigured);
    };

    let (model, action) =
        WebhookPayload::from_slice(&body).and_then(WebhookPayload::validate).map_err(|e| {
            warn!(error = %e, "Rejecting invalid webhook payload");
            WebhookRejection::InvalidRequest(e)
        })?;

    debug!(payload = %String::from_utf8_lossy(&body), "Processing webhook");
    info!(
        action_id = action.id.as_ref().map(|id| id.as_str()).unwrap_or_default(),
        translation_key = %action.display_key,
        card_id = %action.card.id,
        member_id = %action.triggering_member_id,
        model_id = %model.id,
        model_name = model.name.as_deref().unwrap_or_default(),
        "Accepted webhook"
    );

    if let Some(change) = membership_change(&model, &action) {
        // Detached: the handle is dropped and the task outlives this request.
        let _ = dispatcher.dispatch(change);
    }

    Ok(StatusCode::OK)
}

/// Answers the `HEAD` probe Trello sends when a webhook is registered.
///
/// Registration fails unless the callback URL returns `200`.
#[instrument(name = "verify_callback")]
pub async fn verify_callback() -> StatusCode {
    debug!("Answering webhook registration probe");
    StatusCode::OK
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the process serves requests.
    pub status: &'static str,
    /// Whether Trello credentials are configured.
    pub configured: bool,
    /// Crate version.
    pub version: &'static str,
}

/// Liveness endpoint. Reports configuration so a missing credential is
/// visible without sending a webhook.
#[instrument(name = "health_check", skip_all)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        configured: state.is_configured(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
