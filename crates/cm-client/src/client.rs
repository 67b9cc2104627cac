/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

use crate::endpoints::aliases::AliasTable;
use crate::endpoints::{
  EndpointCore, catalog::CatalogEndpoints, info::InfoEndpoints, metric_data::MetricDataEndpoints,
};
use crate::reference::ReferenceCache;
use crate::transport::Transport;
use cm_core::{Config, MetricSelection, Result, TimeAgg, Timestamp};
use cm_models::SeriesResult;
use std::sync::Arc;
use tracing::info;

/// Main Coin Metrics API client
///
/// Owns the transport, the reference cache and the metric alias table. The
/// endpoint groups handed out by [`metric_data`](Self::metric_data),
/// [`info`](Self::info) and [`catalog`](Self::catalog) all share them, so a
/// reference list fetched by one group is reused by every other.
///
/// # Examples
///
/// ```rust,no_run
/// use cm_client::CoinMetricsClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = CoinMetricsClient::community()?;
///
///     let prices = client.metric_data().get_price_usd("btc", "2019-01-01", "2019-01-08").await?;
///     for row in &prices.series {
///         println!("{} {:?}", row.time, row.values[0]);
///     }
///
///     Ok(())
/// }
/// ```
pub struct CoinMetricsClient {
  config: Config,
  transport: Arc<Transport>,
  reference: Arc<ReferenceCache>,
  aliases: Arc<AliasTable>,
}

impl CoinMetricsClient {
  /// Create a client from a configuration
  ///
  /// # Errors
  ///
  /// Returns [`Error::Config`](cm_core::Error::Config) if the configuration is
  /// invalid, the HTTP client cannot be built, or the metric alias table maps
  /// one name to two codes.
  pub fn new(config: Config) -> Result<Self> {
    let transport = Arc::new(Transport::new(&config)?);
    let reference = Arc::new(ReferenceCache::new(transport.clone()));
    let aliases = Arc::new(AliasTable::standard()?);

    info!(
      "Coin Metrics client ready: {} ({})",
      transport.base_url(),
      if config.is_pro() { "pro" } else { "community" }
    );

    Ok(Self { config, transport, reference, aliases })
  }

  /// Unauthenticated client against the community API
  pub fn community() -> Result<Self> {
    Self::new(Config::community())
  }

  /// Authenticated client against the Pro API. The key is sent in `header`.
  pub fn pro(api_key: impl Into<String>, header: impl Into<String>) -> Result<Self> {
    Self::new(Config::pro(api_key, header))
  }

  /// Client configured from `COINMETRICS_*` environment variables
  pub fn from_env() -> Result<Self> {
    Self::new(Config::from_env()?)
  }

  fn core(&self) -> EndpointCore {
    EndpointCore::new(self.transport.clone(), self.reference.clone())
  }

  /// Metric data: the query builder, the named accessors and `get_metric`
  pub fn metric_data(&self) -> MetricDataEndpoints {
    MetricDataEndpoints::new(self.core(), self.aliases.clone())
  }

  /// Info lookups and index values
  pub fn info(&self) -> InfoEndpoints {
    InfoEndpoints::new(self.core())
  }

  /// Catalog listings
  pub fn catalog(&self) -> CatalogEndpoints {
    CatalogEndpoints::new(self.core())
  }

  /// Reference lists and validators
  pub fn reference(&self) -> &ReferenceCache {
    &self.reference
  }

  /// Shortcut for [`MetricDataEndpoints::get_metric_data`]
  pub async fn get_metric_data(
    &self,
    asset: &str,
    metrics: impl Into<MetricSelection>,
    start: impl Into<Timestamp>,
    end: impl Into<Timestamp>,
    time_agg: TimeAgg,
  ) -> Result<SeriesResult> {
    self.metric_data().get_metric_data(asset, metrics, start, end, time_agg).await
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  pub fn is_pro(&self) -> bool {
    self.config.is_pro()
  }
}

impl std::fmt::Debug for CoinMetricsClient {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CoinMetricsClient")
      .field("transport", &self.transport)
      .field("reference", &self.reference)
      .field("aliases", &self.aliases.entries().len())
      .finish()
  }
}
