use super::print_json;
use anyhow::Result;
use clap::Args;
use cm_client::{CoinMetricsClient, ReferenceKind};

#[derive(Args, Debug)]
pub struct InfoArgs {
  /// Comma-separated ids to restrict the lookup to; validated first
  #[arg(short, long)]
  pub subset: Option<String>,
}

/// Print one reference list
pub async fn list(client: &CoinMetricsClient, kind: ReferenceKind) -> Result<()> {
  let list = client.reference().list(kind).await?;
  print_json(&*list)
}

/// Print the info entries of `kind`
pub async fn info(client: &CoinMetricsClient, kind: ReferenceKind, args: InfoArgs) -> Result<()> {
  let subset = args.subset.as_deref();
  let info = client.info();
  match kind {
    ReferenceKind::Asset => print_json(&info.get_asset_info(subset).await?),
    ReferenceKind::Metric => print_json(&info.get_metric_info(subset).await?),
    ReferenceKind::Exchange => print_json(&info.get_exchange_info(subset).await?),
    ReferenceKind::Market => print_json(&info.get_market_info(subset).await?),
  }
}

pub async fn asset_metrics(client: &CoinMetricsClient, asset: &str) -> Result<()> {
  print_json(&client.info().get_asset_metrics(asset).await?)
}
