//! `GET /callsign-mentions` and `GET /mentions`.
//!
//! `/callsign-mentions` has three branches: mentions mode (every individual
//! mention), dedup mode (one row per transcript at its latest mention), and
//! a plain recent-transcript fallback when no callsign is given.
//! `/mentions` is the raw mention-log listing.

use axum::{
  extract::{Query, State},
  response::Response,
};
use serde::Deserialize;
use serde_json::{Value, json};
use skywave_core::{
  query::{MENTION_LIMITS, MentionLogQuery, MentionQuery},
  store::MonitorStore,
  time,
};

use super::{cached_json, is_debug, non_empty, opt_i64};
use crate::{AppState, error::ApiError};

// ─── /callsign-mentions ──────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct CallsignMentionParams {
  pub callsign: Option<String>,
  pub mentions: Option<String>,
  pub since:    Option<String>,
  pub until:    Option<String>,
  pub limit:    Option<String>,
  pub debug:    Option<String>,
}

pub async fn callsign_mentions<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<CallsignMentionParams>,
) -> Result<Response, ApiError>
where
  S: MonitorStore + 'static,
{
  let limit = MENTION_LIMITS.clamp(opt_i64(params.limit.as_deref()));
  let range = time::parse_range(params.since.as_deref(), params.until.as_deref());
  let callsign = non_empty(params.callsign.as_deref()).map(str::to_ascii_uppercase);
  let every_mention = params.mentions.as_deref().map(str::trim) == Some("1");

  let (branch, rows) = match callsign {
    Some(callsign) if every_mention => {
      let query = MentionQuery { callsign, range, limit };
      let rows = state
        .store
        .mention_hits(query)
        .await
        .map_err(|e| ApiError::Store(Box::new(e)))?;
      ("callsign_mentions", json!(rows))
    }
    Some(callsign) => {
      let query = MentionQuery { callsign, range, limit };
      let rows = state
        .store
        .latest_mention_per_transcript(query)
        .await
        .map_err(|e| ApiError::Store(Box::new(e)))?;
      ("callsign_dedup", json!(rows))
    }
    None => {
      let rows = state
        .store
        .recent_transcripts(range, limit)
        .await
        .map_err(|e| ApiError::Store(Box::new(e)))?;
      ("fallback_transcriptions", json!(rows))
    }
  };

  Ok(cached_json(envelope(rows, branch, limit, is_debug(params.debug.as_deref()))))
}

// ─── /mentions ───────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct MentionLogParams {
  pub callsign:      Option<String>,
  pub transcript_id: Option<String>,
  pub since:         Option<String>,
  pub until:         Option<String>,
  pub limit:         Option<String>,
  pub debug:         Option<String>,
}

pub async fn mention_log<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<MentionLogParams>,
) -> Result<Response, ApiError>
where
  S: MonitorStore + 'static,
{
  let limit = MENTION_LIMITS.clamp(opt_i64(params.limit.as_deref()));
  let query = MentionLogQuery {
    callsign: non_empty(params.callsign.as_deref()).map(str::to_ascii_uppercase),
    transcript_id: opt_i64(params.transcript_id.as_deref()),
    range: time::parse_range(params.since.as_deref(), params.until.as_deref()),
    limit,
  };

  let rows = state
    .store
    .mention_log(query)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(cached_json(envelope(
    json!(rows),
    "mention_log",
    limit,
    is_debug(params.debug.as_deref()),
  )))
}

fn envelope(rows: Value, branch: &str, limit: i64, debug: bool) -> Value {
  if !debug {
    return rows;
  }
  let count = rows.as_array().map(Vec::len).unwrap_or(0);
  json!({
    "data": rows,
    "_meta": { "branch": branch, "count": count, "limit": limit },
  })
}
