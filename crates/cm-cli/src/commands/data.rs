use super::print_json;
use anyhow::Result;
use chrono::{Duration, Utc};
use clap::{Args, ValueEnum};
use cm_client::{
  CoinMetricsClient, Error, MetricDataQuery, MetricScope, SeriesResult, Tabular, TimeAgg, Timestamp, normalize,
};
use serde::Serialize;
use tracing::info;

/// Span used when no start is given
const DEFAULT_LOOKBACK_DAYS: i64 = 7;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
  /// The service's metrics/series shape
  #[default]
  Series,
  /// One object per timestamp, keyed by metric
  Records,
  /// Float table: index, columns, data
  Table,
}

#[derive(Args, Debug)]
pub struct RangeArgs {
  /// Range start (date, RFC 3339 or epoch seconds). Defaults to a week before the end.
  #[arg(long)]
  pub start: Option<String>,

  /// Range end, inclusive. Defaults to today (UTC).
  #[arg(long)]
  pub end: Option<String>,

  /// Output shape
  #[arg(long, value_enum, default_value_t = OutputFormat::Series)]
  pub format: OutputFormat,
}

impl RangeArgs {
  fn bounds(&self) -> Result<(Timestamp, Timestamp)> {
    let end = match &self.end {
      Some(end) => Timestamp::from(end),
      None => Timestamp::from(Utc::now().date_naive()),
    };
    let start = match &self.start {
      Some(start) => Timestamp::from(start),
      None => {
        let to = end.parse().map_err(|e| Error::InvalidTimeRange {
          start: format!("{DEFAULT_LOOKBACK_DAYS} days before end"),
          end: end.to_string(),
          reason: format!("end: {e}"),
        })?;
        Timestamp::from((to - Duration::days(DEFAULT_LOOKBACK_DAYS)).date_naive())
      }
    };
    Ok((start, end))
  }
}

#[derive(Args, Debug)]
pub struct MetricDataArgs {
  /// Asset id, e.g. btc
  pub asset: String,

  /// Comma-separated metric codes, or "all"
  #[arg(short, long, default_value = "all")]
  pub metrics: String,

  /// day or hour
  #[arg(long, default_value = "day")]
  pub time_agg: TimeAgg,

  /// Check metrics against the asset's own list instead of the global one
  #[arg(long)]
  pub asset_scope: bool,

  #[command(flatten)]
  pub range: RangeArgs,
}

#[derive(Args, Debug)]
pub struct MetricArgs {
  /// Accessor name, alias or metric code, e.g. price_usd
  pub name: String,

  /// Asset id
  pub asset: String,

  #[command(flatten)]
  pub range: RangeArgs,
}

#[derive(Serialize)]
struct AliasRow {
  code: &'static str,
  names: Vec<&'static str>,
}

pub async fn metric_data(client: &CoinMetricsClient, args: MetricDataArgs) -> Result<()> {
  let (start, end) = args.range.bounds()?;
  let scope = if args.asset_scope { MetricScope::Asset } else { MetricScope::Global };
  let query =
    MetricDataQuery::new(&args.asset, start, end).metrics(args.metrics.as_str()).time_agg(args.time_agg).scope(scope);

  let data = client.metric_data().query(&query).await?;
  info!("{} rows for {}", data.len(), args.asset);
  render(&data, args.range.format)
}

pub async fn metric(client: &CoinMetricsClient, args: MetricArgs) -> Result<()> {
  let (start, end) = args.range.bounds()?;
  let data = client.metric_data().get_metric(&args.name, &args.asset, start, end).await?;
  render(&data, args.range.format)
}

/// Print the accessor table, or only the entry for `code`
pub fn aliases(client: &CoinMetricsClient, code: Option<&str>) -> Result<()> {
  let metric_data = client.metric_data();
  let table = metric_data.aliases();
  let rows: Vec<AliasRow> = table
    .entries()
    .iter()
    .filter(|entry| code.map_or(true, |c| c == entry.code))
    .map(|entry| AliasRow { code: entry.code, names: table.names_for(entry.code) })
    .collect();
  print_json(&rows)
}

fn render(data: &SeriesResult, format: OutputFormat) -> Result<()> {
  match format {
    OutputFormat::Series => print_json(data),
    OutputFormat::Records => print_json(&normalize(data)),
    OutputFormat::Table => print_json(&data.to_table()?),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_start_is_a_week_before_end() {
    let range = RangeArgs { start: None, end: Some("2019-01-08".into()), format: OutputFormat::Series };
    let (start, end) = range.bounds().unwrap();
    assert_eq!(start.as_query_value(), "2019-01-01");
    assert_eq!(end.as_query_value(), "2019-01-08");
  }

  #[test]
  fn test_explicit_bounds_pass_through() {
    let range = RangeArgs { start: Some("1546300800".into()), end: Some("Jan 08 2019".into()), format: OutputFormat::Table };
    let (start, end) = range.bounds().unwrap();
    assert_eq!(start, Timestamp::Text("1546300800".into()));
    assert_eq!(end, Timestamp::Text("Jan 08 2019".into()));
  }

  #[test]
  fn test_unparseable_end_is_a_time_range_error() {
    let range = RangeArgs { start: None, end: Some("not a date".into()), format: OutputFormat::Series };
    let err = range.bounds().unwrap_err();
    match err.downcast_ref::<Error>() {
      Some(Error::InvalidTimeRange { end, .. }) => assert_eq!(end, "not a date"),
      other => panic!("expected InvalidTimeRange, got {:?}", other),
    }
  }
}
