//! Identifier kinds and selection types

use crate::error::Error;
use serde::{Deserialize, Serialize};

/// The four kinds of reference list the service publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceKind {
  Asset,
  Metric,
  Exchange,
  Market,
}

impl ReferenceKind {
  /// All kinds, in cache slot order
  pub const ALL: [ReferenceKind; 4] =
    [ReferenceKind::Asset, ReferenceKind::Metric, ReferenceKind::Exchange, ReferenceKind::Market];

  /// Path of the "list K" endpoint
  pub fn list_endpoint(&self) -> &'static str {
    match self {
      ReferenceKind::Asset => "assets",
      ReferenceKind::Metric => "metrics",
      ReferenceKind::Exchange => "exchanges",
      ReferenceKind::Market => "markets",
    }
  }

  /// Key the list is wrapped in
  pub fn list_key(&self) -> &'static str {
    self.list_endpoint()
  }

  /// Path of the "K info" endpoint
  pub fn info_endpoint(&self) -> &'static str {
    match self {
      ReferenceKind::Asset => "asset_info",
      ReferenceKind::Metric => "metric_info",
      ReferenceKind::Exchange => "exchange_info",
      ReferenceKind::Market => "market_info",
    }
  }

  /// Key the info entries are wrapped in
  pub fn info_key(&self) -> &'static str {
    match self {
      ReferenceKind::Asset => "assetsInfo",
      ReferenceKind::Metric => "metricsInfo",
      ReferenceKind::Exchange => "exchangesInfo",
      ReferenceKind::Market => "marketsInfo",
    }
  }

  /// Membership error for `token`
  pub fn invalid(&self, token: &str) -> Error {
    match self {
      ReferenceKind::Asset => Error::InvalidAsset(token.to_string()),
      ReferenceKind::Metric => Error::InvalidMetric { metric: token.to_string(), asset: None },
      ReferenceKind::Exchange => Error::InvalidExchange(token.to_string()),
      ReferenceKind::Market => Error::InvalidMarket(token.to_string()),
    }
  }
}

impl std::fmt::Display for ReferenceKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ReferenceKind::Asset => write!(f, "asset"),
      ReferenceKind::Metric => write!(f, "metric"),
      ReferenceKind::Exchange => write!(f, "exchange"),
      ReferenceKind::Market => write!(f, "market"),
    }
  }
}

/// Split a caller-supplied identifier string on `,`.
///
/// Surrounding whitespace is dropped; matching stays case-sensitive. A single
/// identifier still goes through the split, and empty pieces are kept so
/// `"btc,"` fails validation on the empty token.
pub fn split_identifiers(identifiers: &str) -> impl Iterator<Item = &str> {
  identifiers.split(',').map(str::trim)
}

/// Which metrics a data query asks for.
///
/// Only the literal `"all"` (or no value at all) selects every metric of the
/// asset. Anything else is a caller-supplied list and is never overridden.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MetricSelection {
  #[default]
  All,
  List(String),
}

impl MetricSelection {
  /// Sentinel string accepted for [`MetricSelection::All`]
  pub const ALL: &'static str = "all";
}

impl From<&str> for MetricSelection {
  fn from(s: &str) -> Self {
    if s == Self::ALL {
      MetricSelection::All
    } else {
      MetricSelection::List(s.to_string())
    }
  }
}

impl From<String> for MetricSelection {
  fn from(s: String) -> Self {
    if s == Self::ALL {
      MetricSelection::All
    } else {
      MetricSelection::List(s)
    }
  }
}

impl<T: Into<MetricSelection>> From<Option<T>> for MetricSelection {
  fn from(value: Option<T>) -> Self {
    value.map(Into::into).unwrap_or_default()
  }
}

impl From<&[&str]> for MetricSelection {
  fn from(metrics: &[&str]) -> Self {
    MetricSelection::List(metrics.join(","))
  }
}
