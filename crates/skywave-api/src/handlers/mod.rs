//! HTTP handlers, one module per endpoint.
//!
//! All query parameters arrive as optional strings and are parsed leniently:
//! a value that does not parse falls back to the endpoint's default instead
//! of failing the request, so every error response stays JSON-shaped.

pub mod callsigns;
pub mod health;
pub mod mentions;
pub mod report;
pub mod sync;
pub mod telemetry;
pub mod transcriptions;

use axum::{
  Json,
  http::{HeaderValue, header},
  response::{IntoResponse, Response},
};
use serde_json::Value;

/// Lenient integer parse; garbage is treated as absent.
pub(crate) fn opt_i64(raw: Option<&str>) -> Option<i64> {
  raw.and_then(|s| s.trim().parse().ok())
}

/// `Some` only for a non-blank value.
pub(crate) fn non_empty(raw: Option<&str>) -> Option<&str> {
  raw.map(str::trim).filter(|s| !s.is_empty())
}

pub(crate) fn is_debug(raw: Option<&str>) -> bool {
  raw.map(str::trim) == Some("1")
}

/// JSON response with a short public cache window, for the hot listing
/// endpoints.
pub(crate) fn cached_json(value: Value) -> Response {
  let mut res = Json(value).into_response();
  res.headers_mut().insert(
    header::CACHE_CONTROL,
    HeaderValue::from_static("public, max-age=60"),
  );
  res
}
