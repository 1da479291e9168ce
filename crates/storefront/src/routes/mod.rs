//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /test                   - Store connectivity check
//!
//! # Products
//! GET  /products               - Product listing (?type=&min_price=&max_price=)
//! GET  /products/{id}          - Product detail (store id or sample slug)
//!
//! # Contact
//! POST /contact                - Submit a contact message
//!
//! # Cart
//! POST /cart/add               - Validate and echo a cart item
//! ```

pub mod cart;
pub mod contact;
pub mod health;
pub mod products;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::middleware::{cors_layer, request_id_middleware, request_span};
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new().route("/add", post(cart::add))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/test", get(health::test_connection))
        .nest("/products", product_routes())
        .route("/contact", post(contact::submit))
        .nest("/cart", cart_routes())
}

/// Build the complete application: routes, state and middleware.
///
/// Sentry layers are added by the binary on top of this.
pub fn app(state: AppState) -> Router {
    routes()
        .with_state(state)
        .layer(axum_middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(cors_layer())
}
