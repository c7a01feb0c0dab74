//! The `MonitorStore` trait.
//!
//! Implemented by storage backends (e.g. `skywave-store-sqlite`). The HTTP
//! layer depends on this abstraction, not on any concrete backend.
//!
//! All methods return `Send` futures so the trait can be used in
//! multi-threaded async runtimes (tokio with `axum`).

use std::future::Future;

use crate::{
  query::{
    CallsignQuery, MentionLogQuery, MentionQuery, SensorReadingQuery,
    SystemStatQuery, TimeRange, TranscriptQuery,
  },
  sync::{SyncBatch, SyncReport},
  view::{
    CallsignRecord, DedupHit, MentionHit, MentionRecord, MentionReport,
    SensorReadingRecord, SystemStatRecord, TranscriptHit, TranscriptRecord,
  },
};

pub trait MonitorStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Sync ──────────────────────────────────────────────────────────────

  /// Apply a decoded sync batch inside a single transaction.
  ///
  /// Upsert semantics per row: insert when the key is absent, otherwise
  /// overwrite all non-key columns. Any statement failure rolls back every
  /// table in the batch. Replaying an identical batch leaves the stored
  /// state unchanged.
  fn apply_sync(
    &self,
    batch: SyncBatch,
  ) -> impl Future<Output = Result<SyncReport, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Filtered, sorted callsign listing.
  fn list_callsigns(
    &self,
    query: CallsignQuery,
  ) -> impl Future<Output = Result<Vec<CallsignRecord>, Self::Error>> + Send + '_;

  /// Transcript listing with aggregated distinct callsigns, newest first.
  fn list_transcripts(
    &self,
    query: TranscriptQuery,
  ) -> impl Future<Output = Result<Vec<TranscriptRecord>, Self::Error>> + Send + '_;

  /// Plain transcript listing (the no-callsign fallback branch), newest
  /// first.
  fn recent_transcripts(
    &self,
    range: TimeRange,
    limit: i64,
  ) -> impl Future<Output = Result<Vec<TranscriptHit>, Self::Error>> + Send + '_;

  /// Dedup mode: at most one row per transcript mentioning the callsign,
  /// ordered by the most recent mention. Mentions are aggregated to their
  /// maximum timestamp *before* the join, and the limit applies to the
  /// outer deduplicated result.
  fn latest_mention_per_transcript(
    &self,
    query: MentionQuery,
  ) -> impl Future<Output = Result<Vec<DedupHit>, Self::Error>> + Send + '_;

  /// Mentions mode: every individual mention joined to its transcript, one
  /// row per mention, most recent first.
  fn mention_hits(
    &self,
    query: MentionQuery,
  ) -> impl Future<Output = Result<Vec<MentionHit>, Self::Error>> + Send + '_;

  /// Raw mention-log listing, most recent first.
  fn mention_log(
    &self,
    query: MentionLogQuery,
  ) -> impl Future<Output = Result<Vec<MentionRecord>, Self::Error>> + Send + '_;

  /// Transcript count plus per-callsign mention counts over a range,
  /// ordered by count descending.
  fn mention_report(
    &self,
    range: TimeRange,
  ) -> impl Future<Output = Result<MentionReport, Self::Error>> + Send + '_;

  /// System-telemetry listing, optionally per device, newest first.
  fn list_system_stats(
    &self,
    query: SystemStatQuery,
  ) -> impl Future<Output = Result<Vec<SystemStatRecord>, Self::Error>> + Send + '_;

  /// Sensor-reading listing, optionally per sensor, newest first.
  fn list_sensor_readings(
    &self,
    query: SensorReadingQuery,
  ) -> impl Future<Output = Result<Vec<SensorReadingRecord>, Self::Error>> + Send + '_;
}
