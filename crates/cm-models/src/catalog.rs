//! Catalog entry models (`catalog-all/{kind}`, unwrapped from `data`)
//!
//! Kinds without a dedicated type come back as [`CatalogEntry`] objects.

use crate::fields::{optional, required};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Untyped catalog entry
pub type CatalogEntry = Map<String, Value>;

/// Availability window of a metric at one frequency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFrequency {
  pub frequency: String,
  #[serde(default)]
  pub assets: Vec<String>,
  pub min_time: Option<String>,
  pub max_time: Option<String>,
}

/// A metric as listed under an asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogAssetMetric {
  pub metric: String,
  #[serde(default)]
  pub frequencies: Vec<CatalogFrequency>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct CatalogAsset {
  pub asset: String,
  pub full_name: Option<String>,
  pub metrics: Vec<CatalogAssetMetric>,
  pub exchanges: Vec<String>,
  pub markets: Vec<String>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct CatalogMetric {
  pub metric: String,
  pub full_name: Option<String>,
  pub description: Option<String>,
  pub category: Option<String>,
  pub subcategory: Option<String>,
  pub unit: Option<String>,
  pub data_type: Option<String>,
  pub reviewable: Option<bool>,
  pub frequencies: Vec<CatalogFrequency>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct CatalogExchange {
  pub exchange: String,
  pub markets: Vec<String>,
  pub min_time: Option<String>,
  pub max_time: Option<String>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct CatalogMarket {
  pub market: String,
  pub exchange: Option<String>,
  #[serde(rename = "type")]
  pub market_type: Option<String>,
  pub base: Option<String>,
  pub quote: Option<String>,
  pub symbol: Option<String>,
  pub min_time: Option<String>,
  pub max_time: Option<String>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl TryFrom<Map<String, Value>> for CatalogAsset {
  type Error = serde_json::Error;

  fn try_from(mut map: Map<String, Value>) -> Result<Self, Self::Error> {
    Ok(CatalogAsset {
      asset: required(&mut map, "asset")?,
      full_name: optional(&mut map, "full_name")?,
      metrics: optional(&mut map, "metrics")?,
      exchanges: optional(&mut map, "exchanges")?,
      markets: optional(&mut map, "markets")?,
      extra: map,
    })
  }
}

impl TryFrom<Map<String, Value>> for CatalogMetric {
  type Error = serde_json::Error;

  fn try_from(mut map: Map<String, Value>) -> Result<Self, Self::Error> {
    Ok(CatalogMetric {
      metric: required(&mut map, "metric")?,
      full_name: optional(&mut map, "full_name")?,
      description: optional(&mut map, "description")?,
      category: optional(&mut map, "category")?,
      subcategory: optional(&mut map, "subcategory")?,
      unit: optional(&mut map, "unit")?,
      data_type: optional(&mut map, "data_type")?,
      reviewable: optional(&mut map, "reviewable")?,
      frequencies: optional(&mut map, "frequencies")?,
      extra: map,
    })
  }
}

impl TryFrom<Map<String, Value>> for CatalogExchange {
  type Error = serde_json::Error;

  fn try_from(mut map: Map<String, Value>) -> Result<Self, Self::Error> {
    Ok(CatalogExchange {
      exchange: required(&mut map, "exchange")?,
      markets: optional(&mut map, "markets")?,
      min_time: optional(&mut map, "min_time")?,
      max_time: optional(&mut map, "max_time")?,
      extra: map,
    })
  }
}

impl TryFrom<Map<String, Value>> for CatalogMarket {
  type Error = serde_json::Error;

  fn try_from(mut map: Map<String, Value>) -> Result<Self, Self::Error> {
    Ok(CatalogMarket {
      market: required(&mut map, "market")?,
      exchange: optional(&mut map, "exchange")?,
      market_type: optional(&mut map, "type")?,
      base: optional(&mut map, "base")?,
      quote: optional(&mut map, "quote")?,
      symbol: optional(&mut map, "symbol")?,
      min_time: optional(&mut map, "min_time")?,
      max_time: optional(&mut map, "max_time")?,
      extra: map,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_catalog_asset_nested_metrics() {
    let asset: CatalogAsset = serde_json::from_value(json!({
      "asset": "btc",
      "full_name": "Bitcoin",
      "metrics": [{"metric": "PriceUSD", "frequencies": [{"frequency": "1d", "min_time": "2010-07-18T00:00:00.000000000Z"}]}],
      "exchanges": ["coinbase"]
    }))
    .unwrap();
    assert_eq!(asset.metrics[0].metric, "PriceUSD");
    assert_eq!(asset.metrics[0].frequencies[0].frequency, "1d");
    assert!(asset.markets.is_empty());
  }

  #[test]
  fn test_catalog_market_type_field() {
    let market: CatalogMarket = serde_json::from_value(json!({
      "market": "coinbase-btc-usd-spot",
      "exchange": "coinbase",
      "type": "spot",
      "size_asset": "btc"
    }))
    .unwrap();
    assert_eq!(market.market_type.as_deref(), Some("spot"));
    assert_eq!(market.extra.get("size_asset"), Some(&json!("btc")));
  }

  #[test]
  fn test_catalog_metric_keeps_huge_unknown_counts() {
    let raw = r#"{"metric":"DiffMean","reviewable":true,"frequencies":[{"frequency":"1d"}],"max_value":98765432109876543210987}"#;
    let metric: CatalogMetric = serde_json::from_str(raw).unwrap();
    assert_eq!(metric.reviewable, Some(true));
    assert_eq!(metric.frequencies[0].frequency, "1d");
    assert_eq!(metric.extra["max_value"].to_string(), "98765432109876543210987");
  }
}
