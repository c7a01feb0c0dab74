//! Caller-supplied time-range parsing.
//!
//! Range bounds are interpreted in a fixed local civil zone: input without
//! an offset is taken as already-local, input with an explicit offset is
//! converted. A bare date expands to the day's start (as a range start) or
//! its last second (as a range end). Unparseable input yields `None` — no
//! filter, never an error.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

use crate::query::TimeRange;

/// Storage/comparison format for all row timestamps.
pub const SQL_DATETIME: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBound {
  Start,
  End,
}

/// Parse one bound in the server's local civil zone.
pub fn parse_range_bound(raw: &str, bound: RangeBound) -> Option<String> {
  parse_range_bound_in(raw, bound, &Local)
}

/// Parse both bounds of a range. Absent or unparseable input leaves the
/// bound unset.
pub fn parse_range(since: Option<&str>, until: Option<&str>) -> TimeRange {
  TimeRange {
    since: since.and_then(|s| parse_range_bound(s, RangeBound::Start)),
    until: until.and_then(|s| parse_range_bound(s, RangeBound::End)),
  }
}

/// Zone-generic bound parsing; production uses [`Local`], tests pin a
/// `FixedOffset`.
pub fn parse_range_bound_in<Tz: TimeZone>(
  raw: &str,
  bound: RangeBound,
  tz: &Tz,
) -> Option<String> {
  let raw = raw.trim();
  if raw.is_empty() {
    return None;
  }

  // Explicit offset: convert into the civil zone.
  if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
    return Some(dt.with_timezone(tz).naive_local().format(SQL_DATETIME).to_string());
  }

  // Bare date: expand to the day boundary for this end of the range.
  if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
    let dt = match bound {
      RangeBound::Start => date.and_hms_opt(0, 0, 0),
      RangeBound::End => date.and_hms_opt(23, 59, 59),
    }?;
    return Some(dt.format(SQL_DATETIME).to_string());
  }

  // Offsetless datetime: already local. Seconds are optional.
  for fmt in [SQL_DATETIME, "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
      return Some(dt.format(SQL_DATETIME).to_string());
    }
  }

  None
}
