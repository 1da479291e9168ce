//! Integration tests for the Urban Wheel storefront.
//!
//! # Running Tests
//!
//! ```bash
//! # In-process API tests (memory store, no services needed)
//! cargo test -p urban-wheel-integration-tests
//!
//! # Live tests against a running server and database
//! cargo test -p urban-wheel-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `storefront_api` - Every endpoint, driven in process with `oneshot`
//! - `live_server` - The same endpoints over HTTP, plus the `PostgreSQL` store

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use secrecy::SecretString;
use serde_json::Value;
use urban_wheel_storefront::config::StorefrontConfig;
use urban_wheel_storefront::db::{DocumentStore, MemoryDocumentStore};
use urban_wheel_storefront::routes;
use urban_wheel_storefront::state::AppState;

/// Configuration for an in-process app backed by the memory store.
#[must_use]
pub fn memory_config() -> StorefrontConfig {
    StorefrontConfig {
        database_url: SecretString::from("memory://"),
        database_name: "appdb".to_string(),
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        seed_on_startup: false,
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// An application under test, with direct access to its store.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryDocumentStore>,
}

impl TestApp {
    /// App over an empty, reachable memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(MemoryDocumentStore::new())
    }

    /// App over a memory store that fails every operation.
    #[must_use]
    pub fn offline() -> Self {
        Self::with_store(MemoryDocumentStore::offline())
    }

    #[must_use]
    pub fn with_store(store: MemoryDocumentStore) -> Self {
        let store = Arc::new(store);
        let shared: Arc<dyn DocumentStore> = store.clone();
        let router = routes::app(AppState::new(memory_config(), shared));
        Self { router, store }
    }

    /// Send one request through the full middleware stack.
    ///
    /// # Panics
    ///
    /// Panics if the router fails, which it never does for a valid request.
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        use tower::ServiceExt;

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    /// GET `uri`.
    ///
    /// # Panics
    ///
    /// Panics if `uri` is not a valid request target.
    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(
            Request::get(uri)
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
    }

    /// POST `body` as JSON to `uri`.
    ///
    /// # Panics
    ///
    /// Panics if `uri` is not a valid request target.
    pub async fn post_json(&self, uri: &str, body: &Value) -> Response<Body> {
        self.send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("valid request"),
        )
        .await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Collect a response body as JSON.
///
/// # Panics
///
/// Panics if the body cannot be read or is not JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    serde_json::from_slice(&bytes).expect("JSON body")
}

/// Names of the products in a listing, in response order.
#[must_use]
pub fn names(listing: &Value) -> Vec<&str> {
    listing
        .as_array()
        .map(|items| items.iter().filter_map(|p| p["name"].as_str()).collect())
        .unwrap_or_default()
}
