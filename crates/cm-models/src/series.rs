//! Metric data series models

use bigdecimal::BigDecimal;
use cm_core::{Error, Result};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::str::FromStr;

/// A single metric value, kept as the exact decimal text the service sent.
///
/// The service sends values as JSON strings, but plain JSON numbers are
/// accepted too; with `serde_json`'s `arbitrary_precision` their digits are
/// never routed through `f64`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetricValue(String);

impl MetricValue {
  /// Wrap decimal text
  pub fn new(text: impl Into<String>) -> Self {
    MetricValue(text.into())
  }

  /// The wire text
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Exact decimal value
  pub fn to_decimal(&self) -> Result<BigDecimal> {
    BigDecimal::from_str(&self.0).map_err(|e| Error::Parse(format!("'{}' is not a decimal: {}", self.0, e)))
  }

  /// Nearest `f64`; lossy
  pub fn to_f64(&self) -> Result<f64> {
    self.0.parse::<f64>().map_err(|e| Error::Parse(format!("'{}' is not a number: {}", self.0, e)))
  }
}

impl std::fmt::Display for MetricValue {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for MetricValue {
  fn from(text: &str) -> Self {
    MetricValue(text.to_string())
  }
}

impl Serialize for MetricValue {
  fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.0)
  }
}

impl<'de> Deserialize<'de> for MetricValue {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
    match Value::deserialize(deserializer)? {
      Value::String(s) => Ok(MetricValue(s)),
      Value::Number(n) => Ok(MetricValue(n.to_string())),
      other => Err(D::Error::custom(format!("expected a decimal string or number, got {other}"))),
    }
  }
}

/// One timestamp of a series; `values` lines up with [`SeriesResult::metrics`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesRow {
  /// ISO 8601 timestamp as sent by the service
  pub time: String,
  /// `None` where the service reported no data
  pub values: Vec<Option<MetricValue>>,
}

/// Normalized metric data: the metric names and one row per timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeriesResult {
  pub metrics: Vec<String>,
  #[serde(default)]
  pub series: Vec<SeriesRow>,
}

impl SeriesResult {
  /// Check every row has exactly one value per metric
  pub fn validate(&self) -> Result<()> {
    let width = self.metrics.len();
    match self.series.iter().find(|row| row.values.len() != width) {
      Some(row) => Err(Error::Parse(format!(
        "row at {} has {} values for {} metrics",
        row.time,
        row.values.len(),
        width
      ))),
      None => Ok(()),
    }
  }

  /// Values of one metric, in row order
  pub fn column(&self, metric: &str) -> Option<Vec<Option<&MetricValue>>> {
    let idx = self.metrics.iter().position(|m| m == metric)?;
    Some(self.series.iter().map(|row| row.values.get(idx).and_then(Option::as_ref)).collect())
  }

  pub fn len(&self) -> usize {
    self.series.len()
  }

  pub fn is_empty(&self) -> bool {
    self.series.is_empty()
  }
}
