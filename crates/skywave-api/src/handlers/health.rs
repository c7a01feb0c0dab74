//! `GET /health` — request echo; never touches storage.

use std::collections::BTreeMap;

use axum::{
  Json,
  extract::RawQuery,
  http::{HeaderMap, Method, header},
};
use chrono::Utc;
use serde_json::{Value, json};

pub async fn handler(
  method: Method,
  RawQuery(query): RawQuery,
  headers: HeaderMap,
) -> Json<Value> {
  let user_agent = headers
    .get(header::USER_AGENT)
    .and_then(|v| v.to_str().ok())
    .unwrap_or("");
  let header_map: BTreeMap<String, String> = headers
    .iter()
    .map(|(name, value)| {
      (
        name.as_str().to_string(),
        String::from_utf8_lossy(value.as_bytes()).into_owned(),
      )
    })
    .collect();

  Json(json!({
    "ok":         true,
    "time":       Utc::now().to_rfc3339(),
    "method":     method.as_str(),
    "user_agent": user_agent,
    "query":      query.unwrap_or_default(),
    "headers":    header_map,
  }))
}
