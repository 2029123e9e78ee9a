use axum::{body::Bytes, extract::State, Json};
use serde_json::Value;

use crate::constants::WARN_STATE_SIZE_BYTES;
use crate::error::{AppError, Result};
use crate::models::{OkResponse, StatePayload, StateResponse};
use crate::session::CurrentUser;
use crate::state_blob::StateStore;
use crate::AppState;

/// Load the caller's autosave
///
/// GET /api/state returns `{"state": null}` until the first save.
pub async fn get_state(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<StateResponse>> {
    let db = state.db.clone();
    let record = tokio::task::spawn_blocking(move || StateStore::new(db).get(user_id)).await??;

    Ok(Json(StateResponse {
        state: record.map(|r| r.content),
    }))
}

/// Save the caller's autosave, replacing any previous one
///
/// POST /api/state accepts any JSON value. A JSON string is stored as-is;
/// anything else is stored as canonical JSON text.
pub async fn save_state(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    body: Bytes,
) -> Result<Json<OkResponse>> {
    let value: Value = serde_json::from_slice(&body).map_err(|_| AppError::MalformedPayload)?;
    if value.is_null() {
        return Err(AppError::MalformedPayload);
    }

    // Log large autosaves (monitoring)
    if body.len() > WARN_STATE_SIZE_BYTES {
        tracing::info!("Large state from user {}: {} bytes", user_id, body.len());
    }

    let payload = StatePayload::from_value(value);
    let db = state.db.clone();
    tokio::task::spawn_blocking(move || StateStore::new(db).put(user_id, payload)).await??;

    tracing::debug!("State saved for user {}", user_id);
    Ok(Json(OkResponse { ok: true }))
}
