//! Sync-batch normalization and the per-table outcome report.
//!
//! A sync request body maps table names to rows. Producers are sloppy about
//! the value shape, so three forms are accepted per table: a list of rows,
//! a single bare row, and a list-of-rows wrapped in one accidental extra
//! array level. Everything is normalized and decoded here; the storage
//! layer only ever sees [`SyncRecord`]s.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::{Result, record::SyncRecord, table::TableKind};

// ─── Batch ───────────────────────────────────────────────────────────────────

/// A decoded sync request, in payload order.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncBatch {
  pub tables: Vec<(String, TableBatch)>,
}

/// The decoded rows for one table name in the payload.
#[derive(Debug, Clone, PartialEq)]
pub enum TableBatch {
  /// The table name is not in the registry; reported as skipped, siblings
  /// still apply.
  Unknown,
  Rows {
    kind:      TableKind,
    records:   Vec<SyncRecord>,
    /// Non-array entries dropped during decode. Counted for observability;
    /// excluded from the `updated` tally.
    malformed: usize,
  },
}

impl SyncBatch {
  /// Decode a request payload object into a batch.
  ///
  /// Fails only when an array row lacks a usable key; unknown tables and
  /// non-array rows are tolerated per the sync contract.
  pub fn from_payload(payload: &Map<String, Value>) -> Result<Self> {
    let mut tables = Vec::with_capacity(payload.len());

    for (name, value) in payload {
      let Some(kind) = TableKind::from_name(name) else {
        tables.push((name.clone(), TableBatch::Unknown));
        continue;
      };

      let rows = normalize_rows(value);
      let mut records = Vec::with_capacity(rows.len());
      let mut malformed = 0;
      for row in rows {
        match SyncRecord::decode(kind, row)? {
          Some(record) => records.push(record),
          None => malformed += 1,
        }
      }
      tables.push((name.clone(), TableBatch::Rows { kind, records, malformed }));
    }

    Ok(SyncBatch { tables })
  }
}

/// Normalize one table's payload value to a flat list of positional rows.
fn normalize_rows(value: &Value) -> Vec<&Value> {
  let Some(rows) = value.as_array() else {
    return Vec::new();
  };
  if rows.is_empty() {
    return Vec::new();
  }
  // [[[1, ...], [2, ...]]] — one accidental extra wrapper; unwrap a level.
  if rows.len() == 1
    && let Some(inner) = rows[0].as_array()
    && inner.first().is_some_and(Value::is_array)
  {
    return inner.iter().collect();
  }
  // [1, "a.wav", ...] — a single bare row.
  if !rows[0].is_array() {
    return vec![value];
  }
  rows.iter().collect()
}

// ─── Report ──────────────────────────────────────────────────────────────────

/// Wire-shaped outcome for one table: `{"updated": n}` or
/// `{"skipped": "unknown table"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TableOutcome {
  Updated { updated: u64 },
  Skipped { skipped: String },
}

impl TableOutcome {
  pub fn updated(n: u64) -> Self {
    Self::Updated { updated: n }
  }

  pub fn skipped(reason: &str) -> Self {
    Self::Skipped { skipped: reason.to_string() }
  }
}

/// Per-table summary returned by a successful sync call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SyncReport {
  pub tables: BTreeMap<String, TableOutcome>,
}
