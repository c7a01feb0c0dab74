//! `POST /sync` — the upsert-based table sync endpoint.
//!
//! Check order is part of the contract: API key first (401 before the body
//! is touched), then empty-body (400), then JSON parse (400), then the
//! transactional apply (500 rolls back the whole batch).

use axum::{Json, extract::State, http::HeaderMap};
use bytes::Bytes;
use serde::Serialize;
use skywave_core::{
  store::MonitorStore,
  sync::{SyncBatch, SyncReport},
};

use crate::{AppState, auth, error::ApiError};

#[derive(Debug, Serialize)]
pub struct SyncResponse {
  pub ok:     bool,
  pub tables: SyncReport,
}

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  headers: HeaderMap,
  body: Bytes,
) -> Result<Json<SyncResponse>, ApiError>
where
  S: MonitorStore + 'static,
{
  auth::verify_api_key(&headers, &state.config.api_key)?;

  if body.is_empty() {
    return Err(ApiError::BadRequest("empty body".to_string()));
  }
  let value: serde_json::Value = serde_json::from_slice(&body)
    .map_err(|_| ApiError::BadRequest("invalid json".to_string()))?;
  let Some(payload) = value.as_object() else {
    return Err(ApiError::BadRequest("invalid json".to_string()));
  };

  let batch = SyncBatch::from_payload(payload)?;
  let tables = state
    .store
    .apply_sync(batch)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(Json(SyncResponse { ok: true, tables }))
}
