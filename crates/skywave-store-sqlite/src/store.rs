//! [`SqliteStore`] — the SQLite implementation of
//! [`MonitorStore`](skywave_core::store::MonitorStore).

use std::path::Path;

use rusqlite::{params_from_iter, types::Value as SqlValue};

use skywave_core::{
  query::{
    CallsignQuery, MentionLogQuery, MentionQuery, SensorReadingQuery,
    SystemStatQuery, TimeRange, TranscriptQuery,
  },
  store::MonitorStore,
  sync::{SyncBatch, SyncReport, TableBatch, TableOutcome},
  view::{
    CallsignRecord, DedupHit, MentionHit, MentionRecord, MentionReport, ReportEntry,
    SensorReadingRecord, SystemStatRecord, TranscriptHit, TranscriptRecord,
  },
};

use crate::{
  Result,
  encode::{params_for, upsert_sql},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Skywave store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. There is
/// no application-level locking; isolation comes entirely from SQLite
/// transactions.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── WHERE-clause assembly ───────────────────────────────────────────────────

fn push_range(
  column: &str,
  range: &TimeRange,
  conds: &mut Vec<String>,
  params: &mut Vec<SqlValue>,
) {
  if let Some(since) = &range.since {
    conds.push(format!("{column} >= ?"));
    params.push(SqlValue::Text(since.clone()));
  }
  if let Some(until) = &range.until {
    conds.push(format!("{column} <= ?"));
    params.push(SqlValue::Text(until.clone()));
  }
}

fn where_clause(conds: &[String]) -> String {
  if conds.is_empty() {
    String::new()
  } else {
    format!("WHERE {}", conds.join(" AND "))
  }
}

// ─── MonitorStore impl ───────────────────────────────────────────────────────

impl MonitorStore for SqliteStore {
  type Error = crate::Error;

  // ── Sync ──────────────────────────────────────────────────────────────────

  async fn apply_sync(&self, batch: SyncBatch) -> Result<SyncReport> {
    let report = self
      .conn
      .call(move |conn| {
        // One transaction for the whole batch: either every table commits
        // or none does. Dropping the transaction on error rolls back.
        let tx = conn.transaction()?;
        let mut report = SyncReport::default();

        for (name, table) in batch.tables {
          match table {
            TableBatch::Unknown => {
              tracing::debug!(table = %name, "sync: unknown table skipped");
              report.tables.insert(name, TableOutcome::skipped("unknown table"));
            }
            TableBatch::Rows { kind, records, malformed } => {
              if malformed > 0 {
                tracing::warn!(
                  table = %name,
                  count = malformed,
                  "sync: dropped non-array rows"
                );
              }
              let mut updated = 0u64;
              {
                let mut stmt = tx.prepare_cached(&upsert_sql(kind))?;
                for record in &records {
                  stmt.execute(params_from_iter(params_for(record)))?;
                  updated += 1;
                }
              }
              report.tables.insert(name, TableOutcome::updated(updated));
            }
          }
        }

        tx.commit()?;
        Ok(report)
      })
      .await?;
    Ok(report)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn list_callsigns(&self, query: CallsignQuery) -> Result<Vec<CallsignRecord>> {
    let rows = self
      .conn
      .call(move |conn| {
        let mut conds: Vec<String> = vec![];
        let mut params: Vec<SqlValue> = vec![];

        if let Some(text) = &query.text {
          conds.push("callsign LIKE ?".into());
          params.push(SqlValue::Text(query.mode.like_pattern(text)));
        }
        if let Some(validated) = query.validated {
          conds.push("validated = ?".into());
          params.push(SqlValue::Integer(validated as i64));
        }
        if let Some(min_seen) = query.min_seen {
          conds.push("seen_count >= ?".into());
          params.push(SqlValue::Integer(min_seen));
        }
        push_range("last_seen", &query.range, &mut conds, &mut params);

        // Sort column and direction come from the safelist enums, the limit
        // is clamped and bound — nothing caller-controlled reaches the
        // statement text.
        let sql = format!(
          "SELECT id, callsign, validated, first_seen, last_seen, seen_count
           FROM callsigns
           {where_clause}
           ORDER BY {order} {dir}
           LIMIT ?",
          where_clause = where_clause(&conds),
          order = query.order.as_sql(),
          dir = query.dir.as_sql(),
        );
        params.push(SqlValue::Integer(query.limit));

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(params_from_iter(params), |row| {
            Ok(CallsignRecord {
              id:         row.get(0)?,
              callsign:   row.get(1)?,
              validated:  row.get(2)?,
              first_seen: row.get(3)?,
              last_seen:  row.get(4)?,
              seen_count: row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn list_transcripts(&self, query: TranscriptQuery) -> Result<Vec<TranscriptRecord>> {
    let rows = self
      .conn
      .call(move |conn| {
        let mut conds: Vec<String> = vec![];
        let mut params: Vec<SqlValue> = vec![];
        push_range("t.timestamp", &query.range, &mut conds, &mut params);

        let sql = format!(
          "SELECT t.id, t.filename, t.transcription, t.timestamp, t.created_at,
                  GROUP_CONCAT(DISTINCT cl.callsign) AS callsigns
           FROM transcriptions t
           LEFT JOIN callsign_log cl ON cl.transcript_id = t.id
           {where_clause}
           GROUP BY t.id
           ORDER BY t.timestamp DESC, t.id DESC
           LIMIT ?",
          where_clause = where_clause(&conds),
        );
        params.push(SqlValue::Integer(query.limit));

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(params_from_iter(params), |row| {
            Ok(TranscriptRecord {
              id:            row.get(0)?,
              filename:      row.get(1)?,
              transcription: row.get(2)?,
              timestamp:     row.get(3)?,
              created_at:    row.get(4)?,
              callsigns:     row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn recent_transcripts(
    &self,
    range: TimeRange,
    limit: i64,
  ) -> Result<Vec<TranscriptHit>> {
    let rows = self
      .conn
      .call(move |conn| {
        let mut conds: Vec<String> = vec![];
        let mut params: Vec<SqlValue> = vec![];
        push_range("t.timestamp", &range, &mut conds, &mut params);

        let sql = format!(
          "SELECT t.id, t.filename, t.transcription, t.timestamp
           FROM transcriptions t
           {where_clause}
           ORDER BY t.timestamp DESC
           LIMIT ?",
          where_clause = where_clause(&conds),
        );
        params.push(SqlValue::Integer(limit));

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(params_from_iter(params), |row| {
            Ok(TranscriptHit {
              transcript_id:        row.get(0)?,
              filename:             row.get(1)?,
              transcription:        row.get(2)?,
              transcript_timestamp: row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn latest_mention_per_transcript(
    &self,
    query: MentionQuery,
  ) -> Result<Vec<DedupHit>> {
    let rows = self
      .conn
      .call(move |conn| {
        let mut conds: Vec<String> = vec!["callsign = ?".into()];
        let mut params: Vec<SqlValue> = vec![SqlValue::Text(query.callsign)];
        push_range("timestamp", &query.range, &mut conds, &mut params);

        // Aggregate mentions per transcript first, then join and limit the
        // outer deduplicated result. Limiting inside the subquery would
        // undercount transcripts with multiple mentions.
        let sql = format!(
          "SELECT t.id, t.filename, t.transcription, t.timestamp,
                  x.last_mentioned_at
           FROM (
             SELECT transcript_id, MAX(timestamp) AS last_mentioned_at
             FROM callsign_log
             WHERE {conds}
             GROUP BY transcript_id
           ) x
           JOIN transcriptions t ON t.id = x.transcript_id
           ORDER BY x.last_mentioned_at DESC
           LIMIT ?",
          conds = conds.join(" AND "),
        );
        params.push(SqlValue::Integer(query.limit));

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(params_from_iter(params), |row| {
            Ok(DedupHit {
              transcript_id:        row.get(0)?,
              filename:             row.get(1)?,
              transcription:        row.get(2)?,
              transcript_timestamp: row.get(3)?,
              last_mentioned_at:    row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn mention_hits(&self, query: MentionQuery) -> Result<Vec<MentionHit>> {
    let rows = self
      .conn
      .call(move |conn| {
        let mut conds: Vec<String> = vec!["csl.callsign = ?".into()];
        let mut params: Vec<SqlValue> = vec![SqlValue::Text(query.callsign)];
        push_range("csl.timestamp", &query.range, &mut conds, &mut params);

        let sql = format!(
          "SELECT t.id, t.filename, t.transcription, t.timestamp, csl.timestamp
           FROM callsign_log csl
           JOIN transcriptions t ON t.id = csl.transcript_id
           WHERE {conds}
           ORDER BY csl.timestamp DESC
           LIMIT ?",
          conds = conds.join(" AND "),
        );
        params.push(SqlValue::Integer(query.limit));

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(params_from_iter(params), |row| {
            Ok(MentionHit {
              transcript_id:        row.get(0)?,
              filename:             row.get(1)?,
              transcription:        row.get(2)?,
              transcript_timestamp: row.get(3)?,
              mentioned_at:         row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn mention_log(&self, query: MentionLogQuery) -> Result<Vec<MentionRecord>> {
    let rows = self
      .conn
      .call(move |conn| {
        let mut conds: Vec<String> = vec![];
        let mut params: Vec<SqlValue> = vec![];

        if let Some(callsign) = &query.callsign {
          conds.push("callsign = ?".into());
          params.push(SqlValue::Text(callsign.clone()));
        }
        if let Some(transcript_id) = query.transcript_id {
          conds.push("transcript_id = ?".into());
          params.push(SqlValue::Integer(transcript_id));
        }
        push_range("timestamp", &query.range, &mut conds, &mut params);

        let sql = format!(
          "SELECT id, callsign, transcript_id, timestamp
           FROM callsign_log
           {where_clause}
           ORDER BY timestamp DESC
           LIMIT ?",
          where_clause = where_clause(&conds),
        );
        params.push(SqlValue::Integer(query.limit));

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(params_from_iter(params), |row| {
            Ok(MentionRecord {
              id:            row.get(0)?,
              callsign:      row.get(1)?,
              transcript_id: row.get(2)?,
              timestamp:     row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn mention_report(&self, range: TimeRange) -> Result<MentionReport> {
    let report = self
      .conn
      .call(move |conn| {
        let mut conds: Vec<String> = vec![];
        let mut params: Vec<SqlValue> = vec![];
        push_range("timestamp", &range, &mut conds, &mut params);
        let where_sql = where_clause(&conds);

        let transcript_count: i64 = conn.query_row(
          &format!("SELECT COUNT(*) FROM transcriptions {where_sql}"),
          params_from_iter(params.clone()),
          |row| row.get(0),
        )?;

        let sql = format!(
          "SELECT callsign, COUNT(*) AS mentions, MAX(timestamp) AS last_seen
           FROM callsign_log
           {where_sql}
           GROUP BY callsign
           ORDER BY mentions DESC
           LIMIT {top}",
          top = skywave_core::query::REPORT_TOP,
        );
        let mut stmt = conn.prepare(&sql)?;
        let top = stmt
          .query_map(params_from_iter(params), |row| {
            Ok(ReportEntry {
              callsign:  row.get(0)?,
              mentions:  row.get(1)?,
              last_seen: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(MentionReport { transcript_count, top })
      })
      .await?;
    Ok(report)
  }

  // ── Telemetry ─────────────────────────────────────────────────────────────

  async fn list_system_stats(
    &self,
    query: SystemStatQuery,
  ) -> Result<Vec<SystemStatRecord>> {
    let rows = self
      .conn
      .call(move |conn| {
        let mut conds: Vec<String> = vec![];
        let mut params: Vec<SqlValue> = vec![];

        if let Some(device) = &query.device_name {
          conds.push("device_name = ?".into());
          params.push(SqlValue::Text(device.clone()));
        }
        push_range("timestamp", &query.range, &mut conds, &mut params);

        let sql = format!(
          "SELECT id, device_name, timestamp, cpu_usage, memory_usage, cpu_temp
           FROM system_stats
           {where_clause}
           ORDER BY timestamp DESC
           LIMIT ?",
          where_clause = where_clause(&conds),
        );
        params.push(SqlValue::Integer(query.limit));

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(params_from_iter(params), |row| {
            Ok(SystemStatRecord {
              id:           row.get(0)?,
              device_name:  row.get(1)?,
              timestamp:    row.get(2)?,
              cpu_usage:    row.get(3)?,
              memory_usage: row.get(4)?,
              cpu_temp:     row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn list_sensor_readings(
    &self,
    query: SensorReadingQuery,
  ) -> Result<Vec<SensorReadingRecord>> {
    let rows = self
      .conn
      .call(move |conn| {
        let mut conds: Vec<String> = vec![];
        let mut params: Vec<SqlValue> = vec![];

        if let Some(sensor) = &query.sensor_id {
          conds.push("sensor_id = ?".into());
          params.push(SqlValue::Text(sensor.clone()));
        }
        push_range("timestamp", &query.range, &mut conds, &mut params);

        let sql = format!(
          "SELECT id, sensor_id, temperature_c, temperature_f, timestamp
           FROM temperature_log
           {where_clause}
           ORDER BY timestamp DESC
           LIMIT ?",
          where_clause = where_clause(&conds),
        );
        params.push(SqlValue::Integer(query.limit));

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(params_from_iter(params), |row| {
            Ok(SensorReadingRecord {
              id:            row.get(0)?,
              sensor_id:     row.get(1)?,
              temperature_c: row.get(2)?,
              temperature_f: row.get(3)?,
              timestamp:     row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }
}
