//! HTTP rejections returned to the webhook caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use board::PayloadError;
use serde::Serialize;
use thiserror::Error;

/// The only failures a webhook caller ever sees.
///
/// The `Display` text of each variant is the exact `error` string sent in the
/// response body.
#[derive(Debug, Error)]
pub enum WebhookRejection {
    /// The payload failed validation. Responds `400`.
    #[error("Not a valid request.")]
    InvalidRequest(#[source] PayloadError),

    /// Board API credentials are not configured. Responds `500`.
    #[error("Oops.")]
    Unconfigured,
}

impl WebhookRejection {
    /// Status code for this rejection.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unconfigured => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// `{ "error": "..." }`
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for WebhookRejection {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
