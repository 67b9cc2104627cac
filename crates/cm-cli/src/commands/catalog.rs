use super::print_json;
use anyhow::Result;
use clap::Args;
use cm_client::{CatalogFilter, CatalogKind, CoinMetricsClient};

#[derive(Args, Debug)]
pub struct CatalogArgs {
  /// assets, metrics, exchanges, exchange-assets, pairs, institutions, markets,
  /// market-candles, market-metrics, indexes or alerts
  pub kind: CatalogKind,

  /// Comma-separated ids of the listed kind
  #[arg(long)]
  pub ids: Option<String>,

  #[arg(long)]
  pub include: Option<String>,

  #[arg(long)]
  pub exclude: Option<String>,

  /// Maximum entries, or "none"
  #[arg(long)]
  pub limit: Option<String>,

  /// Metrics: only human-reviewable ones
  #[arg(long)]
  pub reviewable: Option<bool>,

  /// Markets: exchange name
  #[arg(long)]
  pub exchange: Option<String>,

  /// Markets: spot, future or option
  #[arg(long = "type")]
  pub market_type: Option<String>,

  #[arg(long)]
  pub base: Option<String>,

  #[arg(long)]
  pub quote: Option<String>,

  #[arg(long)]
  pub asset: Option<String>,

  #[arg(long)]
  pub symbol: Option<String>,

  /// Alerts: comma-separated alert names
  #[arg(long)]
  pub alerts: Option<String>,
}

impl CatalogArgs {
  fn filter(&self) -> CatalogFilter {
    CatalogFilter {
      ids: self.ids.clone(),
      include: self.include.clone(),
      exclude: self.exclude.clone(),
      limit: self.limit.clone(),
      reviewable: self.reviewable,
      exchange: self.exchange.clone(),
      market_type: self.market_type.clone(),
      base: self.base.clone(),
      quote: self.quote.clone(),
      asset: self.asset.clone(),
      symbol: self.symbol.clone(),
      alerts: self.alerts.clone(),
    }
  }
}

pub async fn execute(client: &CoinMetricsClient, args: CatalogArgs) -> Result<()> {
  let catalog = client.catalog();
  let filter = args.filter();
  match args.kind {
    CatalogKind::Assets => print_json(&catalog.assets(&filter).await?),
    CatalogKind::Metrics => print_json(&catalog.metrics(&filter).await?),
    CatalogKind::Exchanges => print_json(&catalog.exchanges(&filter).await?),
    CatalogKind::Markets => print_json(&catalog.markets(&filter).await?),
    kind => print_json(&catalog.entries(kind, &filter).await?),
  }
}

pub async fn index_values(client: &CoinMetricsClient, index_id: &str) -> Result<()> {
  print_json(&client.info().get_index_values(index_id).await?)
}
