//! Read-side query parameter types: safelists and limit clamping.
//!
//! Caller-influenced sort columns and limits are never interpolated into
//! SQL. Sort columns map onto the fixed strings below and limits are
//! clamped to a policy range before any query is built.

// ─── Limits ──────────────────────────────────────────────────────────────────

/// Clamping policy for a caller-supplied result-size limit.
#[derive(Debug, Clone, Copy)]
pub struct LimitPolicy {
  pub min:     i64,
  pub max:     i64,
  pub default: i64,
}

impl LimitPolicy {
  pub const fn new(min: i64, max: i64, default: i64) -> Self {
    Self { min, max, default }
  }

  /// The effective limit: the default when absent, otherwise clamped to
  /// `[min, max]` regardless of what the caller sent.
  pub fn clamp(&self, requested: Option<i64>) -> i64 {
    match requested {
      None => self.default,
      Some(n) => n.clamp(self.min, self.max),
    }
  }
}

pub const CALLSIGN_LIMITS: LimitPolicy = LimitPolicy::new(1, 100_000, 25);
pub const MENTION_LIMITS: LimitPolicy = LimitPolicy::new(1, 100_000, 25);
pub const TRANSCRIPT_LIMITS: LimitPolicy = LimitPolicy::new(1, 500, 200);
pub const TELEMETRY_LIMITS: LimitPolicy = LimitPolicy::new(1, 100_000, 25);
/// Fixed cap on the report's per-callsign breakdown.
pub const REPORT_TOP: i64 = 50;

// ─── Safelists ───────────────────────────────────────────────────────────────

/// Free-text match mode for callsign filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
  Prefix,
  #[default]
  Contains,
}

impl MatchMode {
  pub fn from_param(raw: &str) -> Self {
    match raw.trim().to_ascii_lowercase().as_str() {
      "prefix" => Self::Prefix,
      _ => Self::Contains,
    }
  }

  /// Build the LIKE pattern for `text`. The pattern is bound as a
  /// parameter, never spliced into the statement.
  pub fn like_pattern(self, text: &str) -> String {
    match self {
      Self::Prefix => format!("{text}%"),
      Self::Contains => format!("%{text}%"),
    }
  }
}

/// Safelisted sort columns for the callsign listing. Unrecognized input
/// falls back to `last_seen`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
  #[default]
  LastSeen,
  FirstSeen,
  SeenCount,
  Callsign,
}

impl SortColumn {
  pub fn from_param(raw: &str) -> Self {
    match raw.trim().to_ascii_lowercase().as_str() {
      "first_seen" => Self::FirstSeen,
      "seen_count" => Self::SeenCount,
      "callsign" => Self::Callsign,
      _ => Self::LastSeen,
    }
  }

  pub fn as_sql(self) -> &'static str {
    match self {
      Self::LastSeen => "last_seen",
      Self::FirstSeen => "first_seen",
      Self::SeenCount => "seen_count",
      Self::Callsign => "callsign",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
  Asc,
  #[default]
  Desc,
}

impl SortDir {
  pub fn from_param(raw: &str) -> Self {
    match raw.trim().to_ascii_lowercase().as_str() {
      "asc" => Self::Asc,
      _ => Self::Desc,
    }
  }

  pub fn as_sql(self) -> &'static str {
    match self {
      Self::Asc => "ASC",
      Self::Desc => "DESC",
    }
  }
}

// ─── Query types ─────────────────────────────────────────────────────────────

/// An inclusive time range, already rendered as local-civil
/// `YYYY-MM-DD HH:MM:SS` strings (see [`crate::time`]). `None` bounds apply
/// no filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeRange {
  pub since: Option<String>,
  pub until: Option<String>,
}

/// Parameters for the filtered callsign listing.
#[derive(Debug, Clone)]
pub struct CallsignQuery {
  /// Uppercased free-text filter; `None` disables the text match.
  pub text:      Option<String>,
  pub mode:      MatchMode,
  pub validated: Option<bool>,
  pub min_seen:  Option<i64>,
  /// Applied to `last_seen`.
  pub range:     TimeRange,
  pub order:     SortColumn,
  pub dir:       SortDir,
  /// Already clamped by the caller via [`CALLSIGN_LIMITS`].
  pub limit:     i64,
}

/// Parameters for the transcript listing (with aggregated callsigns).
#[derive(Debug, Clone)]
pub struct TranscriptQuery {
  pub range: TimeRange,
  pub limit: i64,
}

/// Parameters for the per-callsign transcript queries (dedup and mentions
/// modes).
#[derive(Debug, Clone)]
pub struct MentionQuery {
  /// Uppercased callsign, exact match.
  pub callsign: String,
  pub range:    TimeRange,
  pub limit:    i64,
}

/// Parameters for the raw mention-log listing.
#[derive(Debug, Clone, Default)]
pub struct MentionLogQuery {
  pub callsign:      Option<String>,
  pub transcript_id: Option<i64>,
  pub range:         TimeRange,
  pub limit:         i64,
}

/// Parameters for the system-telemetry listing.
#[derive(Debug, Clone, Default)]
pub struct SystemStatQuery {
  /// Exact match on the reporting device; `None` lists all devices.
  pub device_name: Option<String>,
  pub range:       TimeRange,
  pub limit:       i64,
}

/// Parameters for the sensor-reading listing.
#[derive(Debug, Clone, Default)]
pub struct SensorReadingQuery {
  /// Exact match on the sensor; `None` lists all sensors.
  pub sensor_id: Option<String>,
  pub range:     TimeRange,
  pub limit:     i64,
}
