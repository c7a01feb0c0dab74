//! Positional row codec.
//!
//! Sync rows arrive as ordered arrays of scalars. They are decoded into the
//! named-field structs below at this boundary and never propagated
//! positionally past it. Missing trailing cells take the documented
//! defaults; non-key cells of the wrong type decode as NULL and are left to
//! the storage layer's constraints.

use serde_json::Value;

use crate::{Error, Result, table::TableKind};

// ─── Row types ───────────────────────────────────────────────────────────────

/// One `transcriptions` (or `transcriptions_large`) row.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptRow {
  pub id:            i64,
  pub filename:      Option<String>,
  pub transcription: Option<String>,
  pub timestamp:     Option<String>,
  pub created_at:    Option<String>,
  /// Defaults to 0 when the cell is absent.
  pub processed:     i64,
}

/// One `callsigns` row. `seen_count` and `last_seen` arrive pre-aggregated;
/// sync overwrites them with the incoming values, it never increments.
#[derive(Debug, Clone, PartialEq)]
pub struct CallsignRow {
  pub id:                 i64,
  pub callsign:           Option<String>,
  /// Defaults to 0 when the cell is absent.
  pub validated:          i64,
  pub first_seen:         Option<String>,
  pub last_seen:          Option<String>,
  /// Defaults to 1 when the cell is absent.
  pub seen_count:         i64,
  pub original_timestamp: Option<String>,
}

/// One `callsign_log` row — a single observed mention of a callsign within
/// a transcript at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct MentionRow {
  pub id:            i64,
  pub callsign:      Option<String>,
  pub transcript_id: Option<i64>,
  pub timestamp:     Option<String>,
}

/// One `system_stats` telemetry snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemStatRow {
  pub id:           i64,
  pub device_name:  Option<String>,
  pub timestamp:    Option<String>,
  pub cpu_usage:    Option<f64>,
  pub memory_usage: Option<f64>,
  pub cpu_temp:     Option<f64>,
}

/// One `temperature_log` sensor snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReadingRow {
  pub id:            i64,
  pub sensor_id:     Option<String>,
  pub temperature_c: Option<f64>,
  pub temperature_f: Option<f64>,
  pub timestamp:     Option<String>,
}

/// A decoded sync row, tagged by table.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncRecord {
  Transcript(TranscriptRow),
  TranscriptLarge(TranscriptRow),
  Callsign(CallsignRow),
  Mention(MentionRow),
  SystemStat(SystemStatRow),
  SensorReading(SensorReadingRow),
}

impl SyncRecord {
  /// Decode one positional wire row for `kind`.
  ///
  /// Returns `Ok(None)` when the row is not an array — such entries are
  /// skipped by the sync endpoint without counting toward any tally.
  /// An array row whose key cell is absent or non-integer is an error and
  /// fails the whole request.
  pub fn decode(kind: TableKind, row: &Value) -> Result<Option<SyncRecord>> {
    let Some(cells) = row.as_array() else {
      return Ok(None);
    };

    let record = match kind {
      TableKind::Transcriptions => SyncRecord::Transcript(transcript_row(kind, cells)?),
      TableKind::TranscriptionsLarge => {
        SyncRecord::TranscriptLarge(transcript_row(kind, cells)?)
      }
      TableKind::Callsigns => SyncRecord::Callsign(CallsignRow {
        id:                 key_at(kind, cells)?,
        callsign:           text_at(cells, 1),
        validated:          int_or(cells, 2, 0),
        first_seen:         text_at(cells, 3),
        last_seen:          text_at(cells, 4),
        seen_count:         int_or(cells, 5, 1),
        original_timestamp: text_at(cells, 6),
      }),
      TableKind::CallsignLog => SyncRecord::Mention(MentionRow {
        id:            key_at(kind, cells)?,
        callsign:      text_at(cells, 1),
        transcript_id: int_at(cells, 2),
        timestamp:     text_at(cells, 3),
      }),
      TableKind::SystemStats => SyncRecord::SystemStat(SystemStatRow {
        id:           key_at(kind, cells)?,
        device_name:  text_at(cells, 1),
        timestamp:    text_at(cells, 2),
        cpu_usage:    float_at(cells, 3),
        memory_usage: float_at(cells, 4),
        cpu_temp:     float_at(cells, 5),
      }),
      TableKind::TemperatureLog => SyncRecord::SensorReading(SensorReadingRow {
        id:            key_at(kind, cells)?,
        sensor_id:     text_at(cells, 1),
        temperature_c: float_at(cells, 2),
        temperature_f: float_at(cells, 3),
        timestamp:     text_at(cells, 4),
      }),
    };

    Ok(Some(record))
  }
}

fn transcript_row(kind: TableKind, cells: &[Value]) -> Result<TranscriptRow> {
  Ok(TranscriptRow {
    id:            key_at(kind, cells)?,
    filename:      text_at(cells, 1),
    transcription: text_at(cells, 2),
    timestamp:     text_at(cells, 3),
    created_at:    text_at(cells, 4),
    processed:     int_or(cells, 5, 0),
  })
}

// ─── Cell accessors ──────────────────────────────────────────────────────────

fn key_at(kind: TableKind, cells: &[Value]) -> Result<i64> {
  int_at(cells, 0).ok_or(Error::MissingKey { table: kind.name() })
}

/// Integers may arrive as JSON numbers or numeric strings; anything else is
/// absent.
fn int_at(cells: &[Value], idx: usize) -> Option<i64> {
  match cells.get(idx) {
    Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
    Some(Value::String(s)) => s.trim().parse().ok(),
    _ => None,
  }
}

fn int_or(cells: &[Value], idx: usize, default: i64) -> i64 {
  int_at(cells, idx).unwrap_or(default)
}

fn float_at(cells: &[Value], idx: usize) -> Option<f64> {
  match cells.get(idx) {
    Some(Value::Number(n)) => n.as_f64(),
    Some(Value::String(s)) => s.trim().parse().ok(),
    _ => None,
  }
}

fn text_at(cells: &[Value], idx: usize) -> Option<String> {
  match cells.get(idx) {
    Some(Value::String(s)) => Some(s.clone()),
    Some(Value::Number(n)) => Some(n.to_string()),
    _ => None,
  }
}
