//! Liveness and store connectivity endpoints.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Store connectivity report.
#[derive(Debug, Serialize)]
pub struct ConnectionStatus {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Store connectivity check.
///
/// GET /test
///
/// Always 200; the body says whether the store answered.
pub async fn test_connection(State(state): State<AppState>) -> Json<ConnectionStatus> {
    let config = state.config();
    let backend = config.store_backend();
    let database = config.database_name.as_str();

    match state.store().ping().await {
        Ok(()) => {
            tracing::debug!(?backend, database, "store reachable");
            Json(ConnectionStatus {
                status: "ok",
                detail: None,
            })
        }
        Err(e) => {
            tracing::warn!(error = %e, ?backend, database, "store connectivity check failed");
            Json(ConnectionStatus {
                status: "error",
                detail: Some(e.to_string()),
            })
        }
    }
}
