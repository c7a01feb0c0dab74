//! SQL schema for the Skywave SQLite store.
//!
//! Executed once at connection startup. All timestamps are stored as
//! local-civil `YYYY-MM-DD HH:MM:SS` text, which compares correctly as
//! strings.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS transcriptions (
    id            INTEGER PRIMARY KEY,
    filename      TEXT,
    transcription TEXT,
    timestamp     TEXT,
    created_at    TEXT,
    processed     INTEGER NOT NULL DEFAULT 0
);

-- Long-form archive copies; same shape and sync contract as transcriptions.
CREATE TABLE IF NOT EXISTS transcriptions_large (
    id            INTEGER PRIMARY KEY,
    filename      TEXT,
    transcription TEXT,
    timestamp     TEXT,
    created_at    TEXT,
    processed     INTEGER NOT NULL DEFAULT 0
);

-- seen_count and last_seen arrive pre-aggregated from the edge node.
CREATE TABLE IF NOT EXISTS callsigns (
    id                 INTEGER PRIMARY KEY,
    callsign           TEXT NOT NULL,
    validated          INTEGER NOT NULL DEFAULT 0,
    first_seen         TEXT,
    last_seen          TEXT,
    seen_count         INTEGER NOT NULL DEFAULT 1,
    original_timestamp TEXT
);

-- One row per observed mention of a callsign within a transcript.
CREATE TABLE IF NOT EXISTS callsign_log (
    id            INTEGER PRIMARY KEY,
    callsign      TEXT NOT NULL,
    transcript_id INTEGER,
    timestamp     TEXT
);

CREATE TABLE IF NOT EXISTS system_stats (
    id           INTEGER PRIMARY KEY,
    device_name  TEXT,
    timestamp    TEXT,
    cpu_usage    REAL,
    memory_usage REAL,
    cpu_temp     REAL
);

CREATE TABLE IF NOT EXISTS temperature_log (
    id            INTEGER PRIMARY KEY,
    sensor_id     TEXT,
    temperature_c REAL,
    temperature_f REAL,
    timestamp     TEXT
);

CREATE INDEX IF NOT EXISTS transcriptions_ts_idx ON transcriptions(timestamp);
CREATE INDEX IF NOT EXISTS callsigns_last_seen_idx ON callsigns(last_seen);
CREATE INDEX IF NOT EXISTS callsign_log_callsign_idx ON callsign_log(callsign);
CREATE INDEX IF NOT EXISTS callsign_log_transcript_idx ON callsign_log(transcript_id);
CREATE INDEX IF NOT EXISTS callsign_log_ts_idx ON callsign_log(timestamp);

PRAGMA user_version = 1;
";
