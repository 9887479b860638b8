//! Middleware for the HTTP server.

use std::time::Instant;

use axum::{
    extract::Request,
    http::{header::CONTENT_TYPE, HeaderMap, Method},
    middleware::Next,
    response::Response,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use hookfeed_core::GITHUB_EVENT_HEADER;

/// GUID GitHub assigns to each delivery; shown in the hook's "Recent Deliveries".
pub const GITHUB_DELIVERY_HEADER: &str = "x-github-delivery";

/// Create CORS middleware. The feed UI may be hosted on another origin; it
/// only ever reads `/events`, and GitHub posts `/webhook` without a preflight.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
}

/// GitHub identification headers of an inbound request, if it is a delivery.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DeliveryInfo {
    pub event: Option<String>,
    pub id: Option<String>,
}

impl DeliveryInfo {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let get = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned)
        };
        Self {
            event: get(GITHUB_EVENT_HEADER),
            id: get(GITHUB_DELIVERY_HEADER),
        }
    }
}

/// Request logging middleware.
///
/// Deliveries are logged with their event type and delivery GUID so a failed
/// delivery can be matched against GitHub's redelivery page. Server errors
/// log at `warn`.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let delivery = DeliveryInfo::from_headers(request.headers());
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let duration_ms = start.elapsed().as_millis() as u64;

    if response.status().is_server_error() {
        warn!(
            method = %method,
            path = %path,
            status,
            duration_ms,
            github_event = ?delivery.event,
            delivery_id = ?delivery.id,
            "Request failed"
        );
    } else {
        info!(
            method = %method,
            path = %path,
            status,
            duration_ms,
            github_event = ?delivery.event,
            delivery_id = ?delivery.id,
            "Request completed"
        );
    }

    response
}
