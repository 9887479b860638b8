//! hookfeed-server - HTTP server for hookfeed.
//!
//! Receives GitHub webhook deliveries on `/webhook`, stores them as
//! normalized events, and serves the newest ones on `/events` for the UI in
//! the static directory to poll.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use hookfeed_server::{create_server, AppState};
//! use hookfeed_stores::MemoryEventStore;
//!
//! #[tokio::main]
//! async fn main() {
//!     let state = AppState::new(Arc::new(MemoryEventStore::new()));
//!     let app = create_server(state, "static");
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;

use std::path::Path;

use axum::{middleware as axum_middleware, Router};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Create the server with all routes, the static UI, and middleware.
///
/// `/` serves `index.html` from `static_dir`; other paths that match no API
/// route fall through to files in the same directory.
pub fn create_server(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    let static_dir = static_dir.as_ref();

    routes::create_router(state)
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors_layer())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
}
