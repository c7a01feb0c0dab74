//! `GET /report` — transcript count plus top mentioned callsigns.

use axum::{
  Json,
  extract::{Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};
use skywave_core::{store::MonitorStore, time};

use crate::{AppState, error::ApiError};

#[derive(Debug, Default, Deserialize)]
pub struct Params {
  pub start: Option<String>,
  pub end:   Option<String>,
}

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<Params>,
) -> Result<Json<Value>, ApiError>
where
  S: MonitorStore + 'static,
{
  let range = time::parse_range(params.start.as_deref(), params.end.as_deref());
  let report = state
    .store
    .mention_report(range)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(Json(json!({
    "ok":         true,
    "count":      report.transcript_count,
    "calls":      report.top.len(),
    "call_signs": report.top,
  })))
}
