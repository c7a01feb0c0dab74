//! Read models returned by the query endpoints.
//!
//! Field names match the wire contract of each endpoint, including the
//! `transcript_id` / `transcript_timestamp` aliases used by the
//! per-callsign queries.

use serde::Serialize;

/// One row of `GET /callsigns`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallsignRecord {
  pub id:         i64,
  pub callsign:   String,
  pub validated:  i64,
  pub first_seen: Option<String>,
  pub last_seen:  Option<String>,
  pub seen_count: i64,
}

/// One row of `GET /transcriptions` — a transcript with its distinct
/// mentioned callsigns aggregated into a comma-joined string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptRecord {
  pub id:            i64,
  pub filename:      Option<String>,
  pub transcription: Option<String>,
  pub timestamp:     Option<String>,
  pub created_at:    Option<String>,
  pub callsigns:     Option<String>,
}

/// One row of `GET /mentions` — a raw mention-log entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MentionRecord {
  pub id:            i64,
  pub callsign:      String,
  pub transcript_id: Option<i64>,
  pub timestamp:     Option<String>,
}

/// One transcript row in the fallback listing of `GET /callsign-mentions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptHit {
  pub transcript_id:        i64,
  pub filename:             Option<String>,
  pub transcription:        Option<String>,
  pub transcript_timestamp: Option<String>,
}

/// Dedup mode: one row per transcript, carrying the most recent time the
/// callsign was mentioned in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DedupHit {
  pub transcript_id:        i64,
  pub filename:             Option<String>,
  pub transcription:        Option<String>,
  pub transcript_timestamp: Option<String>,
  pub last_mentioned_at:    Option<String>,
}

/// Mentions mode: one row per individual mention.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MentionHit {
  pub transcript_id:        i64,
  pub filename:             Option<String>,
  pub transcription:        Option<String>,
  pub transcript_timestamp: Option<String>,
  pub mentioned_at:         Option<String>,
}

/// One row of `GET /stats` — a system-telemetry snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemStatRecord {
  pub id:           i64,
  pub device_name:  Option<String>,
  pub timestamp:    Option<String>,
  pub cpu_usage:    Option<f64>,
  pub memory_usage: Option<f64>,
  pub cpu_temp:     Option<f64>,
}

/// One row of `GET /temperatures` — a sensor reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorReadingRecord {
  pub id:            i64,
  pub sensor_id:     Option<String>,
  pub temperature_c: Option<f64>,
  pub temperature_f: Option<f64>,
  pub timestamp:     Option<String>,
}

/// One aggregation row of `GET /report`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
  pub callsign:  String,
  pub mentions:  i64,
  pub last_seen: Option<String>,
}

/// The `GET /report` aggregate: transcripts in range plus the top mentioned
/// callsigns.
#[derive(Debug, Clone, PartialEq)]
pub struct MentionReport {
  pub transcript_count: i64,
  pub top:              Vec<ReportEntry>,
}
