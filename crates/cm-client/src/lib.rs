//! # cm-client
//!
//! An async client for the Coin Metrics time-series API (v4).
//!
//! ## Features
//!
//! - **Validated queries**: assets, metrics and time ranges are checked against
//!   the service's own reference lists before any data request is sent
//! - **Cached reference lists**: each list is fetched once per client
//! - **Exact values**: metric values keep the decimal text the service sent
//! - **Named accessors**: `get_price_usd`, `get_block_count` and friends, plus
//!   lookup by any alias through `get_metric`
//! - **Community or Pro**: unauthenticated by default, API key header for Pro
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cm_client::{CoinMetricsClient, MetricDataQuery, TimeAgg, Tabular};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CoinMetricsClient::community()?;
//!
//!     let query = MetricDataQuery::new("btc", "2019-01-01", "2019-01-08")
//!         .metrics("PriceUSD,BlkCnt")
//!         .time_agg(TimeAgg::Day);
//!     let data = client.metric_data().query(&query).await?;
//!
//!     let table = data.to_table()?;
//!     println!("{} rows, columns {:?}", table.len(), table.columns);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All methods return `Result<T, cm_core::Error>`. Validation failures name the
//! offending identifier; transport failures carry the status or cause.

#![warn(clippy::all)]

pub mod client;
pub mod endpoints;
pub mod reference;
pub mod transport;

pub use client::CoinMetricsClient;
pub use cm_core::{
  Config, Error, ErrorKind, MetricSelection, ReferenceKind, Result, TimeAgg, Timestamp, TransportError,
};
pub use cm_models::*;

pub use endpoints::{
  aliases::{AliasTable, METRIC_ACCESSORS, MetricAccessor},
  catalog::{CatalogEndpoints, CatalogFilter, CatalogKind},
  info::InfoEndpoints,
  metric_data::{MetricDataEndpoints, MetricDataQuery, MetricScope},
};
pub use reference::ReferenceCache;
