//! `GET /transcriptions` — transcript listing with aggregated callsigns.

use axum::{
  Json,
  extract::{Query, State},
};
use serde::Deserialize;
use skywave_core::{
  query::{TRANSCRIPT_LIMITS, TranscriptQuery},
  store::MonitorStore,
  time,
  view::TranscriptRecord,
};

use super::opt_i64;
use crate::{AppState, error::ApiError};

#[derive(Debug, Default, Deserialize)]
pub struct Params {
  pub limit: Option<String>,
  pub since: Option<String>,
  pub until: Option<String>,
}

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<Params>,
) -> Result<Json<Vec<TranscriptRecord>>, ApiError>
where
  S: MonitorStore + 'static,
{
  let query = TranscriptQuery {
    range: time::parse_range(params.since.as_deref(), params.until.as_deref()),
    limit: TRANSCRIPT_LIMITS.clamp(opt_i64(params.limit.as_deref())),
  };

  let rows = state
    .store
    .list_transcripts(query)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(rows))
}
