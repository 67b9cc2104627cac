use thiserror::Error;

/// Failures raised while talking to the service.
///
/// HTTP status semantics are not interpreted beyond success/failure; the
/// status code and whatever message the body carried are handed back as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
  /// The request never produced a response (DNS, connect, TLS, body read)
  #[error("network failure: {0}")]
  Network(String),

  /// The service answered with a non-2xx status
  #[error("HTTP {status}: {message}")]
  Status { status: u16, message: String },

  /// The response body was not valid JSON
  #[error("undecodable response body: {0}")]
  Decode(String),
}

/// The main error type for cm-* crates
#[derive(Error, Debug)]
pub enum Error {
  /// Asset token absent from the asset list, or more than one asset given
  /// where exactly one is required
  #[error("Invalid asset: '{0}'")]
  InvalidAsset(String),

  /// Metric token absent from the global list, or from the list of a
  /// specific asset when `asset` is set
  #[error("Invalid metric '{metric}'{}", .asset.as_ref().map(|a| format!(" for asset '{a}'")).unwrap_or_default())]
  InvalidMetric { metric: String, asset: Option<String> },

  /// Exchange token absent from the exchange list
  #[error("Invalid exchange: '{0}'")]
  InvalidExchange(String),

  /// Market token absent from the market list
  #[error("Invalid market: '{0}'")]
  InvalidMarket(String),

  /// Start after end, or a bound that cannot be parsed into a date/time
  #[error("Invalid time range '{start}' .. '{end}': {reason}")]
  InvalidTimeRange { start: String, end: String, reason: String },

  /// HTTP transport error
  #[error("Transport error: {0}")]
  Transport(#[from] TransportError),

  /// Missing required field in response
  #[error("Missing required field: {0}")]
  MissingField(String),

  /// Configuration error
  #[error("Configuration error: {0}")]
  Config(String),

  /// Parse error for data processing
  #[error("Parse error: {0}")]
  Parse(String),
}

/// Fieldless mirror of [`Error`] for callers that only care about the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
  InvalidAsset,
  InvalidMetric,
  InvalidExchange,
  InvalidMarket,
  InvalidTimeRange,
  Transport,
  MissingField,
  Config,
  Parse,
}

impl Error {
  /// Category of this error
  pub fn kind(&self) -> ErrorKind {
    match self {
      Error::InvalidAsset(_) => ErrorKind::InvalidAsset,
      Error::InvalidMetric { .. } => ErrorKind::InvalidMetric,
      Error::InvalidExchange(_) => ErrorKind::InvalidExchange,
      Error::InvalidMarket(_) => ErrorKind::InvalidMarket,
      Error::InvalidTimeRange { .. } => ErrorKind::InvalidTimeRange,
      Error::Transport(_) => ErrorKind::Transport,
      Error::MissingField(_) => ErrorKind::MissingField,
      Error::Config(_) => ErrorKind::Config,
      Error::Parse(_) => ErrorKind::Parse,
    }
  }

  /// The identifier (or range) the error is about, when there is one
  pub fn subject(&self) -> Option<String> {
    match self {
      Error::InvalidAsset(a) => Some(a.clone()),
      Error::InvalidMetric { metric, .. } => Some(metric.clone()),
      Error::InvalidExchange(e) => Some(e.clone()),
      Error::InvalidMarket(m) => Some(m.clone()),
      Error::InvalidTimeRange { start, end, .. } => Some(format!("{start}..{end}")),
      Error::MissingField(f) => Some(f.clone()),
      _ => None,
    }
  }
}

/// Result type alias for cm-* crates
pub type Result<T> = std::result::Result<T, Error>;
