//! Webhook intake endpoint.

use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap},
    Json,
};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use hookfeed_core::{normalize_delivery, HookError, WebhookOutcome, GITHUB_EVENT_HEADER};

/// Largest delivery GitHub sends. Pushes with many commits routinely exceed
/// axum's default 2 MiB extractor limit.
pub const WEBHOOK_BODY_LIMIT: usize = 25 * 1024 * 1024;

/// Response body for an accepted delivery.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct StatusResponse {
    /// `ok` when stored, `ignored` for event types that are not tracked.
    pub status: &'static str,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }

    pub fn ignored() -> Self {
        Self { status: "ignored" }
    }
}

/// Receive a GitHub webhook delivery.
/// POST /webhook
///
/// Accepts JSON bodies and form bodies carrying the JSON in `payload`. The
/// `X-GitHub-Event` header picks the normalization; a missing header counts
/// as an untracked event.
pub async fn receive_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<StatusResponse>> {
    let event_type = header_str(&headers, GITHUB_EVENT_HEADER).unwrap_or_default();
    let content_type = header_str(&headers, CONTENT_TYPE.as_str());

    let outcome = normalize_delivery(event_type, content_type, &body).map_err(reject)?;

    let event = match outcome {
        WebhookOutcome::Record(event) => event,
        WebhookOutcome::Ignored => {
            debug!(event_type = %event_type, "Ignoring untracked GitHub event");
            return Ok(Json(StatusResponse::ignored()));
        }
    };

    state.store().append(&event).await.map_err(reject)?;

    info!(
        request_id = %event.request_id,
        author = %event.author,
        action = %event.action,
        from_branch = ?event.from_branch,
        to_branch = %event.to_branch,
        timestamp = %event.timestamp,
        "Inserted event"
    );

    Ok(Json(StatusResponse::ok()))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Logs a failed delivery. Bad payloads are the sender's problem and log at
/// `warn`; storage failures log at `error`.
fn reject(err: HookError) -> ApiError {
    if err.is_client_error() {
        warn!(code = err.code().as_str(), error = %err, "Rejected delivery in /webhook");
    } else {
        error!(code = err.code().as_str(), error = ?err, "Error in /webhook");
    }
    ApiError::from(err)
}
