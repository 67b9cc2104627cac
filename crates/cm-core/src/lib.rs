pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{Error, ErrorKind, Result, TransportError};
pub use types::{
  MetricSelection, ReferenceKind, TimeAgg, Timestamp, check_time_range, split_identifiers,
};

/// Every service path the client calls, relative to the base URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
  // Reference lists
  Assets,
  Metrics,
  Exchanges,
  Markets,

  // Info lookups
  AssetInfo,
  ExchangeInfo,
  MetricInfo,
  MarketInfo,

  // Time series
  MetricData { asset: String },
  IndexValues { index_id: String },

  // Catalog, `catalog-all/{kind}`
  Catalog(&'static str),
}

impl Endpoint {
  /// List endpoint for a reference kind
  pub fn list(kind: ReferenceKind) -> Self {
    match kind {
      ReferenceKind::Asset => Endpoint::Assets,
      ReferenceKind::Metric => Endpoint::Metrics,
      ReferenceKind::Exchange => Endpoint::Exchanges,
      ReferenceKind::Market => Endpoint::Markets,
    }
  }

  /// Info endpoint for a reference kind
  pub fn info(kind: ReferenceKind) -> Self {
    match kind {
      ReferenceKind::Asset => Endpoint::AssetInfo,
      ReferenceKind::Metric => Endpoint::MetricInfo,
      ReferenceKind::Exchange => Endpoint::ExchangeInfo,
      ReferenceKind::Market => Endpoint::MarketInfo,
    }
  }

  /// Path relative to the base URL
  pub fn path(&self) -> String {
    match self {
      Endpoint::Assets => ReferenceKind::Asset.list_endpoint().to_string(),
      Endpoint::Metrics => ReferenceKind::Metric.list_endpoint().to_string(),
      Endpoint::Exchanges => ReferenceKind::Exchange.list_endpoint().to_string(),
      Endpoint::Markets => ReferenceKind::Market.list_endpoint().to_string(),
      Endpoint::AssetInfo => ReferenceKind::Asset.info_endpoint().to_string(),
      Endpoint::ExchangeInfo => ReferenceKind::Exchange.info_endpoint().to_string(),
      Endpoint::MetricInfo => ReferenceKind::Metric.info_endpoint().to_string(),
      Endpoint::MarketInfo => ReferenceKind::Market.info_endpoint().to_string(),
      Endpoint::MetricData { asset } => format!("assets/{asset}/metricdata"),
      Endpoint::IndexValues { index_id } => format!("indexes/{index_id}/values"),
      Endpoint::Catalog(kind) => format!("catalog-all/{kind}"),
    }
  }
}

impl std::fmt::Display for Endpoint {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.path())
  }
}

/// Base URL of the authenticated API
pub const PRO_BASE_URL: &str = "https://api.coinmetrics.io/v4/";

/// Base URL of the unauthenticated community API
pub const COMMUNITY_BASE_URL: &str = "https://community-api.coinmetrics.io/v4/";

/// Header the API key is sent in unless configured otherwise
pub const DEFAULT_API_KEY_HEADER: &str = "api_key";

/// API rate limits
pub const DEFAULT_RATE_LIMIT: u32 = 100; // requests per minute
pub const PRO_RATE_LIMIT: u32 = 6000; // requests per minute
