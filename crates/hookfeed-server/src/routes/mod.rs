//! Route definitions for the HTTP API.

mod events;
mod health;
mod webhook;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // GitHub deliveries
        .route(
            "/webhook",
            post(webhook::receive_webhook).layer(DefaultBodyLimit::max(webhook::WEBHOOK_BODY_LIMIT)),
        )
        // Feed
        .route("/events", get(events::list_events))
        // Attach state
        .with_state(state)
}

pub use events::*;
pub use health::*;
pub use webhook::*;
