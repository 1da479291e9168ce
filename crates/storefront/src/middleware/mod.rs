//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added in `main`, capture errors)
//! 2. CORS (any origin, method and header)
//! 3. `TraceLayer` (request span with an empty `request_id` field)
//! 4. Request ID (fills the span field, echoes `x-request-id`)

pub mod request_id;

use axum::http::Request;
use tower_http::cors::{Any, CorsLayer};
use tracing::Span;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};

/// CORS policy for the browser storefront: any origin may call the API.
#[must_use]
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Span for one request; `request_id` is recorded by [`request_id_middleware`].
pub fn request_span<B>(request: &Request<B>) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = tracing::field::Empty,
    )
}
