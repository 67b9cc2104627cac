use super::EndpointCore;
use cm_core::{Endpoint, ReferenceKind, Result};
use cm_models::{AssetInfo, ExchangeInfo, MarketInfo, MetricInfo};
use serde_json::Value;
use std::collections::HashMap;
use tracing::instrument;

/// Reference entry lookups (`asset_info`, `exchange_info`, ...)
///
/// Each lookup takes an optional comma-separated subset. When one is given it
/// is validated against the matching reference list first, and an invalid
/// token fails the call before the info request goes out.
pub struct InfoEndpoints {
  core: EndpointCore,
}

impl InfoEndpoints {
  /// Create a new info endpoints instance
  pub fn new(core: EndpointCore) -> Self {
    Self { core }
  }

  /// Asset entries: name, metrics, exchanges, markets and data time bounds
  ///
  /// # Examples
  ///
  /// ```rust,no_run
  /// # async fn run(client: cm_client::CoinMetricsClient) -> cm_client::Result<()> {
  /// let btc = client.info().get_asset_info(Some("btc")).await?;
  /// println!("{} metrics for btc", btc[0].metrics.len());
  /// # Ok(())
  /// # }
  /// ```
  #[instrument(skip(self))]
  pub async fn get_asset_info(&self, assets: Option<&str>) -> Result<Vec<AssetInfo>> {
    self.core.reference.info(ReferenceKind::Asset, assets).await
  }

  /// Exchange entries: markets and data time bounds
  #[instrument(skip(self))]
  pub async fn get_exchange_info(&self, exchanges: Option<&str>) -> Result<Vec<ExchangeInfo>> {
    self.core.reference.info(ReferenceKind::Exchange, exchanges).await
  }

  /// Metric entries: name, description, category, unit
  #[instrument(skip(self))]
  pub async fn get_metric_info(&self, metrics: Option<&str>) -> Result<Vec<MetricInfo>> {
    self.core.reference.info(ReferenceKind::Metric, metrics).await
  }

  /// Market entries
  #[instrument(skip(self))]
  pub async fn get_market_info(&self, markets: Option<&str>) -> Result<Vec<MarketInfo>> {
    self.core.reference.info(ReferenceKind::Market, markets).await
  }

  /// Metrics supported by a single asset
  pub async fn get_asset_metrics(&self, asset: &str) -> Result<Vec<String>> {
    self.core.reference.get_asset_metrics(asset).await
  }

  /// Raw values of an index. Usually requires a Pro key.
  #[instrument(skip(self))]
  pub async fn get_index_values(&self, index_id: &str) -> Result<Value> {
    let endpoint = Endpoint::IndexValues { index_id: index_id.to_string() };
    self.core.transport.query(&endpoint, &HashMap::new()).await
  }
}
