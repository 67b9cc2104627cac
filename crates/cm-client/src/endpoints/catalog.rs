use super::EndpointCore;
use cm_core::{Endpoint, Result};
use cm_models::{CatalogAsset, CatalogEntry, CatalogExchange, CatalogMarket, CatalogMetric};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Catalog listings under `catalog-all/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
  Assets,
  Metrics,
  Exchanges,
  ExchangeAssets,
  Pairs,
  Institutions,
  Markets,
  MarketCandles,
  MarketMetrics,
  Indexes,
  Alerts,
}

impl CatalogKind {
  pub const ALL: [CatalogKind; 11] = [
    CatalogKind::Assets,
    CatalogKind::Metrics,
    CatalogKind::Exchanges,
    CatalogKind::ExchangeAssets,
    CatalogKind::Pairs,
    CatalogKind::Institutions,
    CatalogKind::Markets,
    CatalogKind::MarketCandles,
    CatalogKind::MarketMetrics,
    CatalogKind::Indexes,
    CatalogKind::Alerts,
  ];

  /// Path segment after `catalog-all/`
  pub fn segment(&self) -> &'static str {
    match self {
      CatalogKind::Assets => "assets",
      CatalogKind::Metrics => "metrics",
      CatalogKind::Exchanges => "exchanges",
      CatalogKind::ExchangeAssets => "exchange-assets",
      CatalogKind::Pairs => "pairs",
      CatalogKind::Institutions => "institutions",
      CatalogKind::Markets => "markets",
      CatalogKind::MarketCandles => "market-candles",
      CatalogKind::MarketMetrics => "market-metrics",
      CatalogKind::Indexes => "indexes",
      CatalogKind::Alerts => "alerts",
    }
  }

  /// Query parameter that carries [`CatalogFilter::ids`] for this kind
  pub fn ids_param(&self) -> &'static str {
    match self {
      CatalogKind::ExchangeAssets => "exchange_assets",
      CatalogKind::MarketCandles | CatalogKind::MarketMetrics => "markets",
      CatalogKind::Alerts => "assets",
      other => other.segment(),
    }
  }
}

impl std::str::FromStr for CatalogKind {
  type Err = cm_core::Error;

  fn from_str(s: &str) -> Result<Self> {
    CatalogKind::ALL
      .into_iter()
      .find(|k| k.segment() == s || k.segment().replace('-', "_") == s)
      .ok_or_else(|| cm_core::Error::Parse(format!("unknown catalog kind '{s}'")))
  }
}

impl std::fmt::Display for CatalogKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.segment())
  }
}

/// Optional catalog filters. Only fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
  /// Comma-separated ids of the listed kind (assets, metrics, markets, ...).
  /// All entries are returned when unset.
  pub ids: Option<String>,
  /// Comma-separated response fields to keep, e.g. `metrics` for assets or
  /// `candles` for markets
  pub include: Option<String>,
  /// Comma-separated response fields to drop
  pub exclude: Option<String>,
  /// Maximum number of entries; `none` means unlimited
  pub limit: Option<String>,
  /// Metrics only: restrict to human-reviewable metrics
  pub reviewable: Option<bool>,
  /// Markets only: unique exchange name
  pub exchange: Option<String>,
  /// Markets only: `spot`, `future` or `option`
  pub market_type: Option<String>,
  /// Markets only: base asset
  pub base: Option<String>,
  /// Markets only: quote asset
  pub quote: Option<String>,
  /// Markets only: any asset of the market
  pub asset: Option<String>,
  /// Markets only: full instrument name of a derivative market
  pub symbol: Option<String>,
  /// Alerts only: comma-separated alert names
  pub alerts: Option<String>,
}

impl CatalogFilter {
  /// Filter on ids alone
  pub fn ids(ids: impl Into<String>) -> Self {
    Self { ids: Some(ids.into()), ..Self::default() }
  }

  fn params(&self, kind: CatalogKind) -> HashMap<String, String> {
    let mut params = HashMap::new();
    let fields = [
      (kind.ids_param(), &self.ids),
      ("include", &self.include),
      ("exclude", &self.exclude),
      ("limit", &self.limit),
      ("exchange", &self.exchange),
      ("type", &self.market_type),
      ("base", &self.base),
      ("quote", &self.quote),
      ("asset", &self.asset),
      ("symbol", &self.symbol),
      ("alerts", &self.alerts),
    ];
    for (name, value) in fields {
      if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
        params.insert(name.to_string(), value.to_string());
      }
    }
    if let Some(reviewable) = self.reviewable {
      params.insert("reviewable".to_string(), reviewable.to_string());
    }
    params
  }
}

/// Catalog endpoints
pub struct CatalogEndpoints {
  core: EndpointCore,
}

impl CatalogEndpoints {
  /// Create a new catalog endpoints instance
  pub fn new(core: EndpointCore) -> Self {
    Self { core }
  }

  /// Fetch any catalog kind and decode its `data` entries as `T`
  #[instrument(skip(self, filter), fields(kind = %kind))]
  pub async fn fetch<T: DeserializeOwned>(&self, kind: CatalogKind, filter: &CatalogFilter) -> Result<Vec<T>> {
    let params = filter.params(kind);
    debug!("Catalog filters: {:?}", params);
    self.core.transport.get(&Endpoint::Catalog(kind.segment()), &params, "data").await
  }

  /// Untyped entries of any kind
  pub async fn entries(&self, kind: CatalogKind, filter: &CatalogFilter) -> Result<Vec<CatalogEntry>> {
    self.fetch(kind, filter).await
  }

  pub async fn assets(&self, filter: &CatalogFilter) -> Result<Vec<CatalogAsset>> {
    self.fetch(CatalogKind::Assets, filter).await
  }

  pub async fn metrics(&self, filter: &CatalogFilter) -> Result<Vec<CatalogMetric>> {
    self.fetch(CatalogKind::Metrics, filter).await
  }

  pub async fn exchanges(&self, filter: &CatalogFilter) -> Result<Vec<CatalogExchange>> {
    self.fetch(CatalogKind::Exchanges, filter).await
  }

  pub async fn markets(&self, filter: &CatalogFilter) -> Result<Vec<CatalogMarket>> {
    self.fetch(CatalogKind::Markets, filter).await
  }
}
