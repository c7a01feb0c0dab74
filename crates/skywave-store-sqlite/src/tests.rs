//! Integration tests for `SqliteStore` against an in-memory database.

use serde_json::{Value, json};
use skywave_core::{
  query::{
    CALLSIGN_LIMITS, CallsignQuery, MatchMode, MentionLogQuery, MentionQuery,
    SensorReadingQuery, SortColumn, SortDir, SystemStatQuery, TimeRange,
    TranscriptQuery,
  },
  store::MonitorStore,
  sync::{SyncBatch, TableOutcome},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory().await.expect("in-memory store")
}

fn batch(payload: Value) -> SyncBatch {
  SyncBatch::from_payload(payload.as_object().unwrap()).expect("decodable payload")
}

fn range(since: Option<&str>, until: Option<&str>) -> TimeRange {
  TimeRange {
    since: since.map(str::to_string),
    until: until.map(str::to_string),
  }
}

fn all_callsigns_query() -> CallsignQuery {
  CallsignQuery {
    text:      None,
    mode:      MatchMode::Contains,
    validated: None,
    min_seen:  None,
    range:     TimeRange::default(),
    order:     SortColumn::LastSeen,
    dir:       SortDir::Desc,
    limit:     CALLSIGN_LIMITS.max,
  }
}

/// One transcript with five mentions of W1AW at distinct timestamps, plus a
/// second transcript mentioning K6ABC.
fn mention_fixture() -> SyncBatch {
  batch(json!({
    "transcriptions": [
      [10, "net.wav", "roll call", "2024-01-01 10:00:00", "2024-01-01 10:01:00", 1],
      [11, "late.wav", "late check-in", "2024-01-02 09:00:00", "2024-01-02 09:01:00", 1],
    ],
    "callsigns": [
      [1, "W1AW", 1, "2024-01-01 10:00:00", "2024-01-01 10:20:00", 5, "2024-01-01 10:00:00"],
      [2, "K6ABC", 0, "2024-01-02 09:00:00", "2024-01-02 09:00:00", 1, "2024-01-02 09:00:00"],
    ],
    "callsign_log": [
      [1, "W1AW", 10, "2024-01-01 10:00:00"],
      [2, "W1AW", 10, "2024-01-01 10:05:00"],
      [3, "W1AW", 10, "2024-01-01 10:10:00"],
      [4, "W1AW", 10, "2024-01-01 10:15:00"],
      [5, "W1AW", 10, "2024-01-01 10:20:00"],
      [6, "K6ABC", 11, "2024-01-02 09:00:00"],
    ],
  }))
}

// ─── Sync: upsert & idempotency ──────────────────────────────────────────────

#[tokio::test]
async fn sync_reports_per_table_counts() {
  let s = store().await;
  let report = s.apply_sync(mention_fixture()).await.unwrap();

  assert_eq!(report.tables["transcriptions"], TableOutcome::updated(2));
  assert_eq!(report.tables["callsigns"], TableOutcome::updated(2));
  assert_eq!(report.tables["callsign_log"], TableOutcome::updated(6));
}

#[tokio::test]
async fn replaying_a_batch_is_idempotent() {
  let s = store().await;
  s.apply_sync(mention_fixture()).await.unwrap();
  let first: Vec<_> = s.list_callsigns(all_callsigns_query()).await.unwrap();
  let mentions_first = s
    .mention_log(MentionLogQuery { limit: 1000, ..Default::default() })
    .await
    .unwrap();

  // Same payload again: identical counts and field values.
  let report = s.apply_sync(mention_fixture()).await.unwrap();
  assert_eq!(report.tables["callsign_log"], TableOutcome::updated(6));

  let second: Vec<_> = s.list_callsigns(all_callsigns_query()).await.unwrap();
  let mentions_second = s
    .mention_log(MentionLogQuery { limit: 1000, ..Default::default() })
    .await
    .unwrap();
  assert_eq!(first, second);
  assert_eq!(mentions_first, mentions_second);
  assert_eq!(mentions_second.len(), 6);
}

#[tokio::test]
async fn redelivery_overwrites_non_key_fields() {
  let s = store().await;
  s.apply_sync(batch(json!({
    "callsigns": [[1, "W1AW", 0, "2024-01-01 10:00:00", "2024-01-01 10:00:00", 1, null]],
  })))
  .await
  .unwrap();

  // The edge node re-sends the same key with updated aggregates; sync
  // overwrites, it never increments.
  s.apply_sync(batch(json!({
    "callsigns": [[1, "W1AW", 1, "2024-01-01 10:00:00", "2024-01-03 08:00:00", 9, null]],
  })))
  .await
  .unwrap();

  let rows = s.list_callsigns(all_callsigns_query()).await.unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].validated, 1);
  assert_eq!(rows[0].seen_count, 9);
  assert_eq!(rows[0].last_seen.as_deref(), Some("2024-01-03 08:00:00"));
}

#[tokio::test]
async fn unknown_table_is_skipped_and_siblings_commit() {
  let s = store().await;
  let report = s
    .apply_sync(batch(json!({
      "bogus_table": [[1, "x"]],
      "callsigns": [[1, "W1AW"]],
    })))
    .await
    .unwrap();

  assert_eq!(report.tables["bogus_table"], TableOutcome::skipped("unknown table"));
  assert_eq!(report.tables["callsigns"], TableOutcome::updated(1));

  let rows = s.list_callsigns(all_callsigns_query()).await.unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].callsign, "W1AW");
}

#[tokio::test]
async fn malformed_rows_do_not_count_as_updated() {
  let s = store().await;
  let report = s
    .apply_sync(batch(json!({
      "callsign_log": [[1, "W1AW", 10, "2024-01-01 10:00:00"], "junk", 42],
    })))
    .await
    .unwrap();

  assert_eq!(report.tables["callsign_log"], TableOutcome::updated(1));
  let rows = s
    .mention_log(MentionLogQuery { limit: 1000, ..Default::default() })
    .await
    .unwrap();
  assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn storage_failure_rolls_back_the_whole_batch() {
  let s = store().await;

  // The second callsigns row violates the NOT NULL constraint on
  // `callsign`; nothing from any table may survive.
  let err = s
    .apply_sync(batch(json!({
      "transcriptions": [[10, "a.wav", "text", "2024-01-01 10:00:00", null, 0]],
      "callsigns": [[1, "W1AW"], [2, null]],
      "callsign_log": [[1, "W1AW", 10, "2024-01-01 10:00:00"]],
    })))
    .await;
  assert!(err.is_err());

  assert!(s.recent_transcripts(TimeRange::default(), 100).await.unwrap().is_empty());
  assert!(s.list_callsigns(all_callsigns_query()).await.unwrap().is_empty());
  assert!(
    s.mention_log(MentionLogQuery { limit: 100, ..Default::default() })
      .await
      .unwrap()
      .is_empty()
  );
}

#[tokio::test]
async fn telemetry_tables_upsert() {
  let s = store().await;
  let report = s
    .apply_sync(batch(json!({
      "system_stats": [[1, "pi-4", "2024-01-01 00:00:00", 12.5, 61.0, 48.2]],
      "temperature_log": [[1, "shack", 21.5, 70.7, "2024-01-01 00:00:00"]],
      "transcriptions_large": [[1, "big.wav", "long text", "2024-01-01 00:00:00", null, 1]],
    })))
    .await
    .unwrap();

  assert_eq!(report.tables["system_stats"], TableOutcome::updated(1));
  assert_eq!(report.tables["temperature_log"], TableOutcome::updated(1));
  assert_eq!(report.tables["transcriptions_large"], TableOutcome::updated(1));
}

// ─── Telemetry reads ─────────────────────────────────────────────────────────

/// Two devices and two sensors reporting across two days.
fn telemetry_fixture() -> SyncBatch {
  batch(json!({
    "system_stats": [
      [1, "pi-4", "2024-01-01 00:00:00", 12.5, 61.0, 48.2],
      [2, "pi-4", "2024-01-02 00:00:00", 15.0, 62.0, 50.1],
      [3, "nuc", "2024-01-01 12:00:00", 40.0, 80.0, 65.5],
    ],
    "temperature_log": [
      [1, "shack", 21.5, 70.7, "2024-01-01 00:00:00"],
      [2, "shack", 22.0, 71.6, "2024-01-02 00:00:00"],
      [3, "attic", 35.0, 95.0, "2024-01-01 12:00:00"],
    ],
  }))
}

#[tokio::test]
async fn system_stats_list_newest_first_with_device_filter() {
  let s = store().await;
  s.apply_sync(telemetry_fixture()).await.unwrap();

  let rows = s
    .list_system_stats(SystemStatQuery { limit: 100, ..Default::default() })
    .await
    .unwrap();
  assert_eq!(rows.len(), 3);
  assert_eq!(rows[0].id, 2);
  assert_eq!(rows[0].cpu_temp, Some(50.1));

  let rows = s
    .list_system_stats(SystemStatQuery {
      device_name: Some("nuc".into()),
      limit: 100,
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].device_name.as_deref(), Some("nuc"));
}

#[tokio::test]
async fn system_stats_range_and_limit_apply() {
  let s = store().await;
  s.apply_sync(telemetry_fixture()).await.unwrap();

  let rows = s
    .list_system_stats(SystemStatQuery {
      range: range(Some("2024-01-01 06:00:00"), None),
      limit: 100,
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(rows.len(), 2);

  let rows = s
    .list_system_stats(SystemStatQuery { limit: 1, ..Default::default() })
    .await
    .unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].id, 2);
}

#[tokio::test]
async fn sensor_readings_list_newest_first_with_sensor_filter() {
  let s = store().await;
  s.apply_sync(telemetry_fixture()).await.unwrap();

  let rows = s
    .list_sensor_readings(SensorReadingQuery { limit: 100, ..Default::default() })
    .await
    .unwrap();
  assert_eq!(rows.len(), 3);
  assert_eq!(rows[0].id, 2);
  assert_eq!(rows[0].temperature_c, Some(22.0));

  let rows = s
    .list_sensor_readings(SensorReadingQuery {
      sensor_id: Some("attic".into()),
      limit: 100,
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].temperature_f, Some(95.0));
}

// ─── Callsign listing ────────────────────────────────────────────────────────

#[tokio::test]
async fn callsign_filters_compose() {
  let s = store().await;
  s.apply_sync(mention_fixture()).await.unwrap();

  // Prefix match.
  let rows = s
    .list_callsigns(CallsignQuery {
      text: Some("W1".into()),
      mode: MatchMode::Prefix,
      ..all_callsigns_query()
    })
    .await
    .unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].callsign, "W1AW");

  // Contains match hits the middle of K6ABC.
  let rows = s
    .list_callsigns(CallsignQuery {
      text: Some("6AB".into()),
      mode: MatchMode::Contains,
      ..all_callsigns_query()
    })
    .await
    .unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].callsign, "K6ABC");

  // Validated + minimum seen count.
  let rows = s
    .list_callsigns(CallsignQuery {
      validated: Some(true),
      min_seen: Some(2),
      ..all_callsigns_query()
    })
    .await
    .unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].callsign, "W1AW");
}

#[tokio::test]
async fn callsign_sort_and_limit() {
  let s = store().await;
  s.apply_sync(mention_fixture()).await.unwrap();

  let rows = s
    .list_callsigns(CallsignQuery {
      order: SortColumn::SeenCount,
      dir: SortDir::Desc,
      ..all_callsigns_query()
    })
    .await
    .unwrap();
  assert_eq!(rows[0].callsign, "W1AW");

  let rows = s
    .list_callsigns(CallsignQuery {
      order: SortColumn::Callsign,
      dir: SortDir::Asc,
      limit: 1,
      ..all_callsigns_query()
    })
    .await
    .unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].callsign, "K6ABC");
}

#[tokio::test]
async fn callsign_range_applies_to_last_seen() {
  let s = store().await;
  s.apply_sync(mention_fixture()).await.unwrap();

  let rows = s
    .list_callsigns(CallsignQuery {
      range: range(Some("2024-01-02 00:00:00"), None),
      ..all_callsigns_query()
    })
    .await
    .unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].callsign, "K6ABC");
}

// ─── Transcript listing ──────────────────────────────────────────────────────

#[tokio::test]
async fn transcripts_aggregate_distinct_callsigns() {
  let s = store().await;
  s.apply_sync(mention_fixture()).await.unwrap();
  // A second distinct callsign mentioned in transcript 10.
  s.apply_sync(batch(json!({
    "callsign_log": [[7, "K6ABC", 10, "2024-01-01 10:21:00"]],
  })))
  .await
  .unwrap();

  let rows = s
    .list_transcripts(TranscriptQuery { range: TimeRange::default(), limit: 100 })
    .await
    .unwrap();
  assert_eq!(rows.len(), 2);
  // Newest first.
  assert_eq!(rows[0].id, 11);
  assert_eq!(rows[0].callsigns.as_deref(), Some("K6ABC"));

  let net = &rows[1];
  assert_eq!(net.id, 10);
  let callsigns = net.callsigns.as_deref().unwrap();
  assert!(callsigns.contains("W1AW") && callsigns.contains("K6ABC"), "{callsigns}");
}

#[tokio::test]
async fn transcript_day_boundaries_are_inclusive() {
  let s = store().await;
  s.apply_sync(mention_fixture()).await.unwrap();

  // since 2024-01-01 00:00:00 .. until 2024-01-01 23:59:59 keeps only the
  // first day's transcript.
  let rows = s
    .list_transcripts(TranscriptQuery {
      range: range(Some("2024-01-01 00:00:00"), Some("2024-01-01 23:59:59")),
      limit: 100,
    })
    .await
    .unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].id, 10);
}

// ─── Per-callsign transcript queries ─────────────────────────────────────────

#[tokio::test]
async fn dedup_mode_returns_one_row_with_max_timestamp() {
  let s = store().await;
  s.apply_sync(mention_fixture()).await.unwrap();

  let rows = s
    .latest_mention_per_transcript(MentionQuery {
      callsign: "W1AW".into(),
      range:    TimeRange::default(),
      limit:    25,
    })
    .await
    .unwrap();

  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].transcript_id, 10);
  assert_eq!(rows[0].last_mentioned_at.as_deref(), Some("2024-01-01 10:20:00"));
}

#[tokio::test]
async fn dedup_limit_applies_after_deduplication() {
  let s = store().await;
  s.apply_sync(mention_fixture()).await.unwrap();
  // W1AW also mentioned twice in transcript 11, later than in 10.
  s.apply_sync(batch(json!({
    "callsign_log": [[8, "W1AW", 11, "2024-01-02 09:30:00"],
                     [9, "W1AW", 11, "2024-01-02 09:45:00"]],
  })))
  .await
  .unwrap();

  // limit=2 must return both transcripts even though transcript 10 alone
  // has five mentions.
  let rows = s
    .latest_mention_per_transcript(MentionQuery {
      callsign: "W1AW".into(),
      range:    TimeRange::default(),
      limit:    2,
    })
    .await
    .unwrap();

  assert_eq!(rows.len(), 2);
  assert_eq!(rows[0].transcript_id, 11);
  assert_eq!(rows[0].last_mentioned_at.as_deref(), Some("2024-01-02 09:45:00"));
  assert_eq!(rows[1].transcript_id, 10);
}

#[tokio::test]
async fn mentions_mode_returns_every_mention_newest_first() {
  let s = store().await;
  s.apply_sync(mention_fixture()).await.unwrap();

  let rows = s
    .mention_hits(MentionQuery {
      callsign: "W1AW".into(),
      range:    TimeRange::default(),
      limit:    25,
    })
    .await
    .unwrap();

  assert_eq!(rows.len(), 5);
  assert!(rows.iter().all(|r| r.transcript_id == 10));
  let times: Vec<_> = rows.iter().map(|r| r.mentioned_at.clone().unwrap()).collect();
  let mut sorted = times.clone();
  sorted.sort_by(|a, b| b.cmp(a));
  assert_eq!(times, sorted);
  assert_eq!(times[0], "2024-01-01 10:20:00");
}

#[tokio::test]
async fn mention_range_filters_both_modes() {
  let s = store().await;
  s.apply_sync(mention_fixture()).await.unwrap();

  let query = MentionQuery {
    callsign: "W1AW".into(),
    range:    range(Some("2024-01-01 10:06:00"), Some("2024-01-01 10:16:00")),
    limit:    25,
  };

  let hits = s.mention_hits(query.clone()).await.unwrap();
  assert_eq!(hits.len(), 2);

  let dedup = s.latest_mention_per_transcript(query).await.unwrap();
  assert_eq!(dedup.len(), 1);
  assert_eq!(dedup[0].last_mentioned_at.as_deref(), Some("2024-01-01 10:15:00"));
}

// ─── Mention log ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn mention_log_filters_by_callsign_and_transcript() {
  let s = store().await;
  s.apply_sync(mention_fixture()).await.unwrap();

  let rows = s
    .mention_log(MentionLogQuery {
      callsign: Some("K6ABC".into()),
      limit: 100,
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].transcript_id, Some(11));

  let rows = s
    .mention_log(MentionLogQuery {
      transcript_id: Some(10),
      limit: 100,
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(rows.len(), 5);
}

// ─── Report ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn report_counts_and_orders_by_mentions() {
  let s = store().await;
  s.apply_sync(mention_fixture()).await.unwrap();

  let report = s.mention_report(TimeRange::default()).await.unwrap();
  assert_eq!(report.transcript_count, 2);
  assert_eq!(report.top.len(), 2);
  assert_eq!(report.top[0].callsign, "W1AW");
  assert_eq!(report.top[0].mentions, 5);
  assert_eq!(report.top[0].last_seen.as_deref(), Some("2024-01-01 10:20:00"));
  assert_eq!(report.top[1].callsign, "K6ABC");
  assert_eq!(report.top[1].mentions, 1);
}

#[tokio::test]
async fn report_range_restricts_both_aggregates() {
  let s = store().await;
  s.apply_sync(mention_fixture()).await.unwrap();

  let report = s
    .mention_report(range(Some("2024-01-02 00:00:00"), None))
    .await
    .unwrap();
  assert_eq!(report.transcript_count, 1);
  assert_eq!(report.top.len(), 1);
  assert_eq!(report.top[0].callsign, "K6ABC");
}
