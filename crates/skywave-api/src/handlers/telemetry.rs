//! `GET /stats` and `GET /temperatures` — telemetry listings.

use axum::{
  Json,
  extract::{Query, State},
};
use serde::Deserialize;
use skywave_core::{
  query::{SensorReadingQuery, SystemStatQuery, TELEMETRY_LIMITS},
  store::MonitorStore,
  time,
  view::{SensorReadingRecord, SystemStatRecord},
};

use super::{non_empty, opt_i64};
use crate::{AppState, error::ApiError};

// ─── /stats ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct StatParams {
  pub device_name: Option<String>,
  pub since:       Option<String>,
  pub until:       Option<String>,
  pub limit:       Option<String>,
}

pub async fn system_stats<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<StatParams>,
) -> Result<Json<Vec<SystemStatRecord>>, ApiError>
where
  S: MonitorStore + 'static,
{
  let query = SystemStatQuery {
    device_name: non_empty(params.device_name.as_deref()).map(str::to_string),
    range: time::parse_range(params.since.as_deref(), params.until.as_deref()),
    limit: TELEMETRY_LIMITS.clamp(opt_i64(params.limit.as_deref())),
  };

  let rows = state
    .store
    .list_system_stats(query)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(rows))
}

// ─── /temperatures ───────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct TemperatureParams {
  pub sensor_id: Option<String>,
  pub since:     Option<String>,
  pub until:     Option<String>,
  pub limit:     Option<String>,
}

pub async fn temperatures<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<TemperatureParams>,
) -> Result<Json<Vec<SensorReadingRecord>>, ApiError>
where
  S: MonitorStore + 'static,
{
  let query = SensorReadingQuery {
    sensor_id: non_empty(params.sensor_id.as_deref()).map(str::to_string),
    range: time::parse_range(params.since.as_deref(), params.until.as_deref()),
    limit: TELEMETRY_LIMITS.clamp(opt_i64(params.limit.as_deref())),
  };

  let rows = state
    .store
    .list_sensor_readings(query)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(rows))
}
