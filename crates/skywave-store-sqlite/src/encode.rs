//! Upsert statement construction and parameter encoding.
//!
//! Statement text is assembled from the static table registry only —
//! identifiers never come from caller data. All row values are bound as
//! parameters.

use rusqlite::types::Value as SqlValue;
use skywave_core::{
  record::{CallsignRow, MentionRow, SensorReadingRow, SyncRecord, SystemStatRow, TranscriptRow},
  table::TableKind,
};

/// `INSERT ... ON CONFLICT(key) DO UPDATE SET col = excluded.col` for one
/// table, with positional placeholders in registry column order.
pub fn upsert_sql(kind: TableKind) -> String {
  let key = kind.key_column();
  let cols = kind.columns();
  let placeholders =
    (1..=cols.len()).map(|i| format!("?{i}")).collect::<Vec<_>>().join(", ");
  let updates = cols
    .iter()
    .filter(|c| **c != key)
    .map(|c| format!("{c} = excluded.{c}"))
    .collect::<Vec<_>>()
    .join(", ");

  format!(
    "INSERT INTO {table} ({columns}) VALUES ({placeholders})
     ON CONFLICT({key}) DO UPDATE SET {updates}",
    table = kind.name(),
    columns = cols.join(", "),
  )
}

/// Bindable values for one record, in registry column order.
pub fn params_for(record: &SyncRecord) -> Vec<SqlValue> {
  match record {
    SyncRecord::Transcript(r) | SyncRecord::TranscriptLarge(r) => transcript_params(r),
    SyncRecord::Callsign(r) => callsign_params(r),
    SyncRecord::Mention(r) => mention_params(r),
    SyncRecord::SystemStat(r) => system_stat_params(r),
    SyncRecord::SensorReading(r) => sensor_reading_params(r),
  }
}

fn transcript_params(r: &TranscriptRow) -> Vec<SqlValue> {
  vec![
    SqlValue::Integer(r.id),
    text(&r.filename),
    text(&r.transcription),
    text(&r.timestamp),
    text(&r.created_at),
    SqlValue::Integer(r.processed),
  ]
}

fn callsign_params(r: &CallsignRow) -> Vec<SqlValue> {
  vec![
    SqlValue::Integer(r.id),
    text(&r.callsign),
    SqlValue::Integer(r.validated),
    text(&r.first_seen),
    text(&r.last_seen),
    SqlValue::Integer(r.seen_count),
    text(&r.original_timestamp),
  ]
}

fn mention_params(r: &MentionRow) -> Vec<SqlValue> {
  vec![
    SqlValue::Integer(r.id),
    text(&r.callsign),
    int(&r.transcript_id),
    text(&r.timestamp),
  ]
}

fn system_stat_params(r: &SystemStatRow) -> Vec<SqlValue> {
  vec![
    SqlValue::Integer(r.id),
    text(&r.device_name),
    text(&r.timestamp),
    real(&r.cpu_usage),
    real(&r.memory_usage),
    real(&r.cpu_temp),
  ]
}

fn sensor_reading_params(r: &SensorReadingRow) -> Vec<SqlValue> {
  vec![
    SqlValue::Integer(r.id),
    text(&r.sensor_id),
    real(&r.temperature_c),
    real(&r.temperature_f),
    text(&r.timestamp),
  ]
}

fn text(v: &Option<String>) -> SqlValue {
  match v {
    Some(s) => SqlValue::Text(s.clone()),
    None => SqlValue::Null,
  }
}

fn int(v: &Option<i64>) -> SqlValue {
  match v {
    Some(n) => SqlValue::Integer(*n),
    None => SqlValue::Null,
  }
}

fn real(v: &Option<f64>) -> SqlValue {
  match v {
    Some(f) => SqlValue::Real(*f),
    None => SqlValue::Null,
  }
}
