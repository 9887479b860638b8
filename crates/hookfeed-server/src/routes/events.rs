//! Event feed endpoint.

use axum::{extract::State, Json};
use tracing::error;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use hookfeed_core::NormalizedEvent;

/// Most recent events for the UI to poll, newest first.
/// GET /events
pub async fn list_events(State(state): State<AppState>) -> ApiResult<Json<Vec<NormalizedEvent>>> {
    let events = state.store().recent().await.map_err(|err| {
        error!(code = err.code().as_str(), error = ?err, "Error in /events");
        ApiError::from(err)
    })?;

    Ok(Json(events))
}
