//! Time range bounds and aggregation granularity

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Date-only layouts tried after RFC 3339 and the ISO date-time forms
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d", "%B %d, %Y", "%d %B %Y", "%b %d %Y", "%b %d, %Y", "%d %b %Y"];

/// Zone-less date-time layouts, read as UTC
const DATETIME_FORMATS: &[&str] =
  &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

/// One bound of a query time range, as the caller supplied it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timestamp {
  /// Seconds since the Unix epoch
  Epoch(i64),
  /// Date text, passed to the service unchanged
  Text(String),
  /// An already-parsed instant
  DateTime(DateTime<Utc>),
}

impl Timestamp {
  /// Resolve to a comparable UTC instant
  pub fn parse(&self) -> Result<DateTime<Utc>> {
    match self {
      Timestamp::Epoch(secs) => epoch(*secs).ok_or_else(|| self.unparseable()),
      Timestamp::DateTime(dt) => Ok(*dt),
      Timestamp::Text(text) => parse_text(text.trim()).ok_or_else(|| self.unparseable()),
    }
  }

  /// Value sent in the `start` / `end` query parameter
  pub fn as_query_value(&self) -> String {
    match self {
      Timestamp::Text(text) => text.clone(),
      Timestamp::DateTime(dt) => dt.to_rfc3339_opts(SecondsFormat::Secs, true),
      Timestamp::Epoch(secs) => match epoch(*secs) {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Secs, true),
        None => secs.to_string(),
      },
    }
  }

  fn unparseable(&self) -> Error {
    Error::Parse(format!("unrecognised date/time '{self}'"))
  }
}

fn epoch(secs: i64) -> Option<DateTime<Utc>> {
  Utc.timestamp_opt(secs, 0).single()
}

fn parse_text(text: &str) -> Option<DateTime<Utc>> {
  if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit() || c == '-') && text.len() != 8 {
    if let Ok(secs) = text.parse::<i64>() {
      return epoch(secs);
    }
  }

  if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
    return Some(dt.with_timezone(&Utc));
  }

  DATETIME_FORMATS
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
    .or_else(|| {
      DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    })
    .map(|naive| naive.and_utc())
}

impl std::fmt::Display for Timestamp {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Timestamp::Epoch(secs) => write!(f, "{secs}"),
      Timestamp::Text(text) => write!(f, "{text}"),
      Timestamp::DateTime(dt) => write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::Secs, true)),
    }
  }
}

impl From<i64> for Timestamp {
  fn from(secs: i64) -> Self {
    Timestamp::Epoch(secs)
  }
}

impl From<&str> for Timestamp {
  fn from(text: &str) -> Self {
    Timestamp::Text(text.to_string())
  }
}

impl From<String> for Timestamp {
  fn from(text: String) -> Self {
    Timestamp::Text(text)
  }
}

impl From<&String> for Timestamp {
  fn from(text: &String) -> Self {
    Timestamp::Text(text.clone())
  }
}

impl From<DateTime<Utc>> for Timestamp {
  fn from(dt: DateTime<Utc>) -> Self {
    Timestamp::DateTime(dt)
  }
}

impl From<NaiveDate> for Timestamp {
  fn from(date: NaiveDate) -> Self {
    Timestamp::Text(date.format("%Y-%m-%d").to_string())
  }
}

/// Reject a range whose start is after its end.
///
/// Both bounds are parsed first; a bound that cannot be parsed makes the
/// range unorderable and is reported the same way. Equal bounds are valid.
pub fn check_time_range(start: &Timestamp, end: &Timestamp) -> Result<()> {
  let invalid = |reason: String| Error::InvalidTimeRange {
    start: start.to_string(),
    end: end.to_string(),
    reason,
  };

  let from = start.parse().map_err(|e| invalid(format!("start: {e}")))?;
  let to = end.parse().map_err(|e| invalid(format!("end: {e}")))?;

  if from > to {
    return Err(invalid("start is after end".to_string()));
  }
  Ok(())
}

/// Interval metric data is aggregated into (`time_agg`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeAgg {
  #[default]
  Day,
  Hour,
}

impl std::fmt::Display for TimeAgg {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      TimeAgg::Day => write!(f, "day"),
      TimeAgg::Hour => write!(f, "hour"),
    }
  }
}

impl std::str::FromStr for TimeAgg {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s.to_ascii_lowercase().as_str() {
      "day" | "1d" => Ok(TimeAgg::Day),
      "hour" | "1h" => Ok(TimeAgg::Hour),
      other => Err(Error::Parse(format!("unknown time aggregation '{other}'"))),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ts(s: &str) -> Timestamp {
    Timestamp::from(s)
  }

  #[test]
  fn test_parse_accepts_common_forms() {
    let jan2 = Utc.with_ymd_and_hms(2019, 1, 2, 0, 0, 0).unwrap();
    for text in ["2019-01-02", "2019/01/02", "20190102", "2019-01-02T00:00:00Z", "2019-01-02T00:00:00.000Z", "2019-01-02 00:00:00", "January 2, 2019", "2 January 2019", "Jan 2 2019", "1546387200"] {
      assert_eq!(ts(text).parse().unwrap(), jan2, "failed on {text}");
    }
    assert_eq!(Timestamp::Epoch(1_546_387_200).parse().unwrap(), jan2);
  }

  #[test]
  fn test_range_ordering() {
    assert!(check_time_range(&ts("2019-01-01"), &ts("2019-01-08")).is_ok());
    assert!(check_time_range(&ts("2019-01-01"), &ts("2019-01-01")).is_ok());

    let err = check_time_range(&ts("2019-02-01"), &ts("2019-01-01")).unwrap_err();
    assert!(matches!(err, Error::InvalidTimeRange { ref start, .. } if start == "2019-02-01"));
  }

  #[test]
  fn test_range_mixes_representations() {
    // 2019-01-01T00:00:00Z
    let start = Timestamp::Epoch(1_546_300_800);
    assert!(check_time_range(&start, &ts("2019-01-01")).is_ok());
    assert!(check_time_range(&ts("2019-01-02"), &start).is_err());
  }

  #[test]
  fn test_unparseable_bound_is_a_range_error() {
    let err = check_time_range(&ts("yesterday-ish"), &ts("2019-01-01")).unwrap_err();
    assert!(matches!(err, Error::InvalidTimeRange { .. }));
    let err = check_time_range(&ts("2019-01-01"), &ts("")).unwrap_err();
    assert!(matches!(err, Error::InvalidTimeRange { .. }));
  }

  #[test]
  fn test_query_value() {
    assert_eq!(ts("2019-01-01").as_query_value(), "2019-01-01");
    assert_eq!(Timestamp::Epoch(1_546_300_800).as_query_value(), "2019-01-01T00:00:00Z");
    let date = NaiveDate::from_ymd_opt(2019, 1, 8).unwrap();
    assert_eq!(Timestamp::from(date).as_query_value(), "2019-01-08");
  }

  #[test]
  fn test_time_agg() {
    assert_eq!(TimeAgg::default().to_string(), "day");
    assert_eq!("hour".parse::<TimeAgg>().unwrap(), TimeAgg::Hour);
    assert!("week".parse::<TimeAgg>().is_err());
  }
}
