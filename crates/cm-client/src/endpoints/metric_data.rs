use super::EndpointCore;
use super::aliases::AliasTable;
use cm_core::{Endpoint, Error, MetricSelection, Result, TimeAgg, Timestamp};
use cm_models::SeriesResult;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Which reference list requested metrics are checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetricScope {
  /// The global metric list
  #[default]
  Global,
  /// The metrics listed in the asset's info entry
  Asset,
}

/// A metric data request over one asset and a closed time range
#[derive(Debug, Clone, PartialEq)]
pub struct MetricDataQuery {
  pub asset: String,
  pub metrics: MetricSelection,
  pub start: Timestamp,
  pub end: Timestamp,
  pub time_agg: TimeAgg,
  pub scope: MetricScope,
}

impl MetricDataQuery {
  /// Every metric of `asset`, daily, checked against the global list
  pub fn new(asset: impl Into<String>, start: impl Into<Timestamp>, end: impl Into<Timestamp>) -> Self {
    Self {
      asset: asset.into(),
      metrics: MetricSelection::All,
      start: start.into(),
      end: end.into(),
      time_agg: TimeAgg::Day,
      scope: MetricScope::Global,
    }
  }

  pub fn metrics(mut self, metrics: impl Into<MetricSelection>) -> Self {
    self.metrics = metrics.into();
    self
  }

  pub fn time_agg(mut self, time_agg: TimeAgg) -> Self {
    self.time_agg = time_agg;
    self
  }

  pub fn scope(mut self, scope: MetricScope) -> Self {
    self.scope = scope;
    self
  }

  fn params(&self, metrics: &str) -> HashMap<String, String> {
    HashMap::from([
      ("metrics".to_string(), metrics.to_string()),
      ("start".to_string(), self.start.as_query_value()),
      ("end".to_string(), self.end.as_query_value()),
      ("time_agg".to_string(), self.time_agg.to_string()),
    ])
  }
}

/// Metric data endpoints: the query builder and the per-metric accessors
pub struct MetricDataEndpoints {
  core: EndpointCore,
  aliases: Arc<AliasTable>,
}

impl MetricDataEndpoints {
  /// Create a new metric data endpoints instance
  pub fn new(core: EndpointCore, aliases: Arc<AliasTable>) -> Self {
    Self { core, aliases }
  }

  /// Fetch `metrics` for `asset` between `start` and `end` inclusive.
  ///
  /// `"all"` expands to every metric the asset supports. See
  /// [`query`](Self::query) for the validation order.
  pub async fn get_metric_data(
    &self,
    asset: &str,
    metrics: impl Into<MetricSelection>,
    start: impl Into<Timestamp>,
    end: impl Into<Timestamp>,
    time_agg: TimeAgg,
  ) -> Result<SeriesResult> {
    let query = MetricDataQuery::new(asset, start, end).metrics(metrics).time_agg(time_agg);
    self.query(&query).await
  }

  /// Validate and dispatch a [`MetricDataQuery`].
  ///
  /// Checks run in a fixed order and stop at the first failure: asset, then
  /// metrics, then time range. The data request is only sent once all three
  /// pass.
  #[instrument(skip(self, query), fields(asset = %query.asset, time_agg = %query.time_agg))]
  pub async fn query(&self, query: &MetricDataQuery) -> Result<SeriesResult> {
    let reference = &self.core.reference;
    if query.asset.contains(',') {
      warn!("Metric data requested for several assets: '{}'", query.asset);
      return Err(Error::InvalidAsset(query.asset.clone()));
    }

    let metrics = match &query.metrics {
      MetricSelection::All => reference.get_asset_metrics(&query.asset).await?.join(","),
      MetricSelection::List(list) => list.clone(),
    };
    debug!("Metrics: '{}'", metrics);
    debug!("Range: '{}' .. '{}'", query.start, query.end);

    reference.check_asset(&query.asset).await?;
    match query.scope {
      MetricScope::Global => reference.check_metric(&metrics).await?,
      MetricScope::Asset => reference.check_metric_for_asset(&query.asset, &metrics).await?,
    }
    reference.check_time_range(&query.start, &query.end)?;

    let endpoint = Endpoint::MetricData { asset: query.asset.clone() };
    let data: SeriesResult = self.core.transport.get(&endpoint, &query.params(&metrics), "metricData").await?;
    data.validate()?;

    debug!("Received {} rows for {} metrics", data.series.len(), data.metrics.len());
    Ok(data)
  }

  /// Fetch one metric by accessor name, friendly alias or metric code
  pub async fn get_metric(
    &self,
    name: &str,
    asset: &str,
    start: impl Into<Timestamp>,
    end: impl Into<Timestamp>,
  ) -> Result<SeriesResult> {
    let code = self.aliases.resolve(name)?;
    self.get_metric_data(asset, code, start, end, TimeAgg::Day).await
  }

  /// The alias table backing [`get_metric`](Self::get_metric)
  pub fn aliases(&self) -> &AliasTable {
    &self.aliases
  }
}
