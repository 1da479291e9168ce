//! Contact form route handlers.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Serialize;
use tracing::instrument;
use urban_wheel_core::ContactMessage;

use crate::db::{Collection, PUBLIC_ID_FIELD, to_document};
use crate::error::Result;
use crate::state::AppState;

/// Response for form submission.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Submit a contact message.
///
/// POST /contact
///
/// A valid message is always acknowledged. The `id` is present only when the
/// message was stored; a store failure drops the message silently.
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ContactMessage>, JsonRejection>,
) -> Result<Json<ContactResponse>> {
    let Json(message) = payload?;
    message.validate()?;

    let id = match store_message(&state, &message).await {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!(error = %e, "contact message not stored");
            None
        }
    };

    if let Some(id) = &id {
        tracing::info!(%id, "contact message stored");
    }

    Ok(Json(ContactResponse { success: true, id }))
}

async fn store_message(
    state: &AppState,
    message: &ContactMessage,
) -> std::result::Result<Option<String>, crate::db::StoreError> {
    let saved = state
        .repository()
        .create(Collection::ContactMessage, to_document(message)?)
        .await?;

    Ok(saved
        .as_ref()
        .and_then(|doc| doc.get(PUBLIC_ID_FIELD))
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned))
}
