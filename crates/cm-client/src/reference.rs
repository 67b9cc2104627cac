//! Reference lists and the validators built on them
//!
//! Each of the four lists (assets, metrics, exchanges, markets) is fetched on
//! first use and then kept for the life of the client; it is never refreshed.
//! Population is not serialized: concurrent first callers may each fetch, and
//! the last write wins. Every writer stores the same server state, so the
//! only cost is a redundant request.

use crate::transport::Transport;
use cm_core::{
  Endpoint, Error, ReferenceKind, Result, Timestamp, check_time_range, split_identifiers,
};
use cm_models::AssetInfo;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, instrument, warn};

type Slot = RwLock<Option<Arc<[String]>>>;

/// Lazily populated reference lists, owned by one client
pub struct ReferenceCache {
  transport: Arc<Transport>,
  slots: [Slot; 4],
}

impl ReferenceCache {
  pub fn new(transport: Arc<Transport>) -> Self {
    Self { transport, slots: Default::default() }
  }

  fn slot(&self, kind: ReferenceKind) -> &Slot {
    match kind {
      ReferenceKind::Asset => &self.slots[0],
      ReferenceKind::Metric => &self.slots[1],
      ReferenceKind::Exchange => &self.slots[2],
      ReferenceKind::Market => &self.slots[3],
    }
  }

  /// The list of `kind` if it has been fetched already
  pub fn cached(&self, kind: ReferenceKind) -> Option<Arc<[String]>> {
    self.slot(kind).read().unwrap_or_else(PoisonError::into_inner).clone()
  }

  /// The list of `kind`, fetching it on first use
  #[instrument(skip(self), fields(kind = %kind))]
  pub async fn list(&self, kind: ReferenceKind) -> Result<Arc<[String]>> {
    if let Some(list) = self.cached(kind) {
      debug!("{} list cache hit ({} entries)", kind, list.len());
      return Ok(list);
    }

    debug!("{} list cache miss, fetching", kind);
    let fetched: Vec<String> =
      self.transport.get(&Endpoint::list(kind), &HashMap::new(), kind.list_key()).await?;
    let fetched: Arc<[String]> = fetched.into();

    *self.slot(kind).write().unwrap_or_else(PoisonError::into_inner) = Some(fetched.clone());
    Ok(fetched)
  }

  pub async fn get_asset_list(&self) -> Result<Arc<[String]>> {
    self.list(ReferenceKind::Asset).await
  }

  pub async fn get_metric_list(&self) -> Result<Arc<[String]>> {
    self.list(ReferenceKind::Metric).await
  }

  pub async fn get_exchange_list(&self) -> Result<Arc<[String]>> {
    self.list(ReferenceKind::Exchange).await
  }

  pub async fn get_market_list(&self) -> Result<Arc<[String]>> {
    self.list(ReferenceKind::Market).await
  }

  /// Fail with the kind's error on the first comma-separated token that is
  /// not in its reference list
  pub async fn check(&self, kind: ReferenceKind, identifiers: &str) -> Result<()> {
    let reference = self.list(kind).await?;
    match split_identifiers(identifiers).find(|token| !reference.iter().any(|r| r == token)) {
      Some(token) => {
        warn!("Invalid {} '{}'", kind, token);
        Err(kind.invalid(token))
      }
      None => Ok(()),
    }
  }

  pub async fn check_asset(&self, assets: &str) -> Result<()> {
    self.check(ReferenceKind::Asset, assets).await
  }

  pub async fn check_metric(&self, metrics: &str) -> Result<()> {
    self.check(ReferenceKind::Metric, metrics).await
  }

  pub async fn check_exchange(&self, exchanges: &str) -> Result<()> {
    self.check(ReferenceKind::Exchange, exchanges).await
  }

  pub async fn check_market(&self, markets: &str) -> Result<()> {
    self.check(ReferenceKind::Market, markets).await
  }

  /// Info entries of `kind`, all of them or just `subset`.
  ///
  /// A non-empty subset is validated against the reference list before the
  /// info request is sent.
  #[instrument(skip(self), fields(kind = %kind))]
  pub async fn info<T: DeserializeOwned>(&self, kind: ReferenceKind, subset: Option<&str>) -> Result<Vec<T>> {
    let mut params = HashMap::new();
    if let Some(subset) = subset.filter(|s| !s.is_empty()) {
      self.check(kind, subset).await?;
      params.insert("subset".to_string(), subset.to_string());
    }
    self.transport.get(&Endpoint::info(kind), &params, kind.info_key()).await
  }

  /// Metrics available for one asset, read from its asset info entry
  #[instrument(skip(self))]
  pub async fn get_asset_metrics(&self, asset: &str) -> Result<Vec<String>> {
    if asset.contains(',') {
      warn!("Asset-scoped metric lookup given several assets: '{}'", asset);
      return Err(Error::InvalidAsset(asset.to_string()));
    }

    let asset = asset.trim();
    let entries: Vec<AssetInfo> = self.info(ReferenceKind::Asset, Some(asset)).await?;
    entries
      .into_iter()
      .find(|entry| entry.id == asset)
      .map(|entry| entry.metrics)
      .ok_or_else(|| Error::MissingField(format!("assetsInfo entry for '{}'", asset)))
  }

  /// Fail on the first metric the given asset does not support
  pub async fn check_metric_for_asset(&self, asset: &str, metrics: &str) -> Result<()> {
    let reference = self.get_asset_metrics(asset).await?;
    match split_identifiers(metrics).find(|token| !reference.iter().any(|r| r == token)) {
      Some(metric) => {
        warn!("Invalid metric '{}' for asset '{}'", metric, asset);
        Err(Error::InvalidMetric { metric: metric.to_string(), asset: Some(asset.trim().to_string()) })
      }
      None => Ok(()),
    }
  }

  /// Reject ranges whose start is after their end; no network involved
  pub fn check_time_range(&self, start: &Timestamp, end: &Timestamp) -> Result<()> {
    check_time_range(start, end).inspect_err(|e| warn!("{}", e))
  }
}

impl std::fmt::Debug for ReferenceCache {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let mut s = f.debug_struct("ReferenceCache");
    for kind in ReferenceKind::ALL {
      s.field(kind.list_endpoint(), &self.cached(kind).map(|l| l.len()));
    }
    s.finish()
  }
}
