//! Reference entry models returned by the `*_info` endpoints

use crate::fields::{optional, required};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of `assetsInfo`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "Map<String, Value>")]
pub struct AssetInfo {
  pub id: String,
  pub name: Option<String>,
  /// Metric codes available for this asset
  pub metrics: Vec<String>,
  pub exchanges: Vec<String>,
  pub markets: Vec<String>,
  pub min_time: Option<String>,
  pub max_time: Option<String>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// One entry of `exchangesInfo`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "Map<String, Value>")]
pub struct ExchangeInfo {
  pub id: String,
  pub name: Option<String>,
  pub markets: Vec<String>,
  pub min_time: Option<String>,
  pub max_time: Option<String>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// One entry of `metricsInfo`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "Map<String, Value>")]
pub struct MetricInfo {
  pub id: String,
  pub name: Option<String>,
  pub description: Option<String>,
  pub category: Option<String>,
  pub subcategory: Option<String>,
  pub unit: Option<String>,
  pub data_type: Option<String>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// One entry of `marketsInfo`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "Map<String, Value>")]
pub struct MarketInfo {
  pub id: String,
  pub market_type: Option<String>,
  pub exchange: Option<String>,
  pub base: Option<String>,
  pub quote: Option<String>,
  pub min_time: Option<String>,
  pub max_time: Option<String>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl TryFrom<Map<String, Value>> for AssetInfo {
  type Error = serde_json::Error;

  fn try_from(mut map: Map<String, Value>) -> Result<Self, Self::Error> {
    Ok(AssetInfo {
      id: required(&mut map, "id")?,
      name: optional(&mut map, "name")?,
      metrics: optional(&mut map, "metrics")?,
      exchanges: optional(&mut map, "exchanges")?,
      markets: optional(&mut map, "markets")?,
      min_time: optional(&mut map, "minTime")?,
      max_time: optional(&mut map, "maxTime")?,
      extra: map,
    })
  }
}

impl TryFrom<Map<String, Value>> for ExchangeInfo {
  type Error = serde_json::Error;

  fn try_from(mut map: Map<String, Value>) -> Result<Self, Self::Error> {
    Ok(ExchangeInfo {
      id: required(&mut map, "id")?,
      name: optional(&mut map, "name")?,
      markets: optional(&mut map, "markets")?,
      min_time: optional(&mut map, "minTime")?,
      max_time: optional(&mut map, "maxTime")?,
      extra: map,
    })
  }
}

impl TryFrom<Map<String, Value>> for MetricInfo {
  type Error = serde_json::Error;

  fn try_from(mut map: Map<String, Value>) -> Result<Self, Self::Error> {
    Ok(MetricInfo {
      id: required(&mut map, "id")?,
      name: optional(&mut map, "name")?,
      description: optional(&mut map, "description")?,
      category: optional(&mut map, "category")?,
      subcategory: optional(&mut map, "subcategory")?,
      unit: optional(&mut map, "unit")?,
      data_type: optional(&mut map, "dataType")?,
      extra: map,
    })
  }
}

impl TryFrom<Map<String, Value>> for MarketInfo {
  type Error = serde_json::Error;

  fn try_from(mut map: Map<String, Value>) -> Result<Self, Self::Error> {
    Ok(MarketInfo {
      id: required(&mut map, "id")?,
      market_type: optional(&mut map, "marketType")?,
      exchange: optional(&mut map, "exchange")?,
      base: optional(&mut map, "base")?,
      quote: optional(&mut map, "quote")?,
      min_time: optional(&mut map, "minTime")?,
      max_time: optional(&mut map, "maxTime")?,
      extra: map,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_asset_info_keeps_unknown_fields() {
    let raw = json!({
      "id": "btc",
      "name": "Bitcoin",
      "metrics": ["PriceUSD", "BlkCnt"],
      "exchanges": ["binance"],
      "markets": ["binance-btc-usdt-spot"],
      "minTime": "2009-01-03T00:00:00.000Z",
      "maxTime": "2019-06-01T00:00:00.000Z",
      "experimental": true
    });
    let info: AssetInfo = serde_json::from_value(raw).unwrap();
    assert_eq!(info.metrics, vec!["PriceUSD", "BlkCnt"]);
    assert_eq!(info.min_time.as_deref(), Some("2009-01-03T00:00:00.000Z"));
    assert_eq!(info.extra.get("experimental"), Some(&json!(true)));
  }

  #[test]
  fn test_huge_integers_in_unknown_fields_stay_exact() {
    let raw = r#"{"id":"btc","metrics":["PriceUSD"],"nested":{"n":12345678901234567890123},"supply":1e22}"#;
    let info: AssetInfo = serde_json::from_str(raw).unwrap();
    assert_eq!(info.metrics, vec!["PriceUSD"]);
    assert_eq!(info.extra["nested"]["n"].to_string(), "12345678901234567890123");
    assert_eq!(info.extra["supply"].to_string(), "1e22");
    assert!(!info.extra.contains_key("id"));
  }

  #[test]
  fn test_missing_id_is_rejected() {
    assert!(serde_json::from_value::<ExchangeInfo>(json!({"name": "Binance"})).is_err());
  }

  #[test]
  fn test_sparse_entries_default() {
    let metric: MetricInfo = serde_json::from_value(json!({"id": "PriceUSD"})).unwrap();
    assert!(metric.description.is_none());
    let market: MarketInfo =
      serde_json::from_value(json!({"id": "binance-btc-usdt-spot", "marketType": "spot"})).unwrap();
    assert_eq!(market.market_type.as_deref(), Some("spot"));
  }
}
