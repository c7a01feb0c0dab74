//! Declarative registry of the tables accepted by the sync endpoint.
//!
//! Each [`TableKind`] describes its wire name, key column, and full column
//! list in wire order. The upsert executor and the row codec are both driven
//! by this data, so adding a table means adding a variant here plus a row
//! type in [`crate::record`] — no control flow changes.

/// One syncable table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
  Transcriptions,
  TranscriptionsLarge,
  Callsigns,
  CallsignLog,
  SystemStats,
  TemperatureLog,
}

impl TableKind {
  pub const ALL: [TableKind; 6] = [
    TableKind::Transcriptions,
    TableKind::TranscriptionsLarge,
    TableKind::Callsigns,
    TableKind::CallsignLog,
    TableKind::SystemStats,
    TableKind::TemperatureLog,
  ];

  /// Resolve a wire table name. Unknown names are reported as skipped by
  /// the sync endpoint, never treated as fatal.
  pub fn from_name(name: &str) -> Option<Self> {
    match name {
      "transcriptions" => Some(Self::Transcriptions),
      "transcriptions_large" => Some(Self::TranscriptionsLarge),
      "callsigns" => Some(Self::Callsigns),
      "callsign_log" => Some(Self::CallsignLog),
      "system_stats" => Some(Self::SystemStats),
      "temperature_log" => Some(Self::TemperatureLog),
      _ => None,
    }
  }

  pub fn name(self) -> &'static str {
    match self {
      Self::Transcriptions => "transcriptions",
      Self::TranscriptionsLarge => "transcriptions_large",
      Self::Callsigns => "callsigns",
      Self::CallsignLog => "callsign_log",
      Self::SystemStats => "system_stats",
      Self::TemperatureLog => "temperature_log",
    }
  }

  /// The column holding the caller-supplied key. Every table keys on `id`.
  pub fn key_column(self) -> &'static str {
    "id"
  }

  /// All columns in wire order, key first.
  pub fn columns(self) -> &'static [&'static str] {
    match self {
      Self::Transcriptions | Self::TranscriptionsLarge => {
        &["id", "filename", "transcription", "timestamp", "created_at", "processed"]
      }
      Self::Callsigns => &[
        "id",
        "callsign",
        "validated",
        "first_seen",
        "last_seen",
        "seen_count",
        "original_timestamp",
      ],
      Self::CallsignLog => &["id", "callsign", "transcript_id", "timestamp"],
      Self::SystemStats => {
        &["id", "device_name", "timestamp", "cpu_usage", "memory_usage", "cpu_temp"]
      }
      Self::TemperatureLog => {
        &["id", "sensor_id", "temperature_c", "temperature_f", "timestamp"]
      }
    }
  }
}
