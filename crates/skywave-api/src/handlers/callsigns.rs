//! `GET /callsigns` — filtered, sorted callsign listing.

use axum::{
  extract::{Query, State},
  response::Response,
};
use serde::Deserialize;
use serde_json::json;
use skywave_core::{
  query::{CALLSIGN_LIMITS, CallsignQuery, MatchMode, SortColumn, SortDir},
  store::MonitorStore,
  time,
};

use super::{cached_json, is_debug, non_empty, opt_i64};
use crate::{AppState, error::ApiError};

#[derive(Debug, Default, Deserialize)]
pub struct Params {
  pub limit:     Option<String>,
  pub q:         Option<String>,
  pub qmode:     Option<String>,
  pub validated: Option<String>,
  pub min_seen:  Option<String>,
  pub since:     Option<String>,
  pub until:     Option<String>,
  pub order:     Option<String>,
  pub dir:       Option<String>,
  pub debug:     Option<String>,
}

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<Params>,
) -> Result<Response, ApiError>
where
  S: MonitorStore + 'static,
{
  let limit = CALLSIGN_LIMITS.clamp(opt_i64(params.limit.as_deref()));
  let order = params
    .order
    .as_deref()
    .map(SortColumn::from_param)
    .unwrap_or_default();
  let dir = params.dir.as_deref().map(SortDir::from_param).unwrap_or_default();

  let query = CallsignQuery {
    text: non_empty(params.q.as_deref()).map(str::to_ascii_uppercase),
    mode: params.qmode.as_deref().map(MatchMode::from_param).unwrap_or_default(),
    validated: match opt_i64(params.validated.as_deref()) {
      Some(0) => Some(false),
      Some(1) => Some(true),
      _ => None,
    },
    min_seen: opt_i64(params.min_seen.as_deref()),
    range: time::parse_range(params.since.as_deref(), params.until.as_deref()),
    order,
    dir,
    limit,
  };

  let rows = state
    .store
    .list_callsigns(query)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let body = if is_debug(params.debug.as_deref()) {
    json!({
      "data": rows,
      "_meta": {
        "count": rows.len(),
        "limit": limit,
        "order": order.as_sql(),
        "dir":   dir.as_sql(),
      },
    })
  } else {
    json!(rows)
  };
  Ok(cached_json(body))
}
