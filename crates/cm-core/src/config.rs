//! Configuration management for the Coin Metrics client
//!
//! Community and Pro access are the same client with different settings:
//! a configured API key switches the base URL and adds the credential header.

use crate::error::{Error, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use url::Url;

/// Main configuration struct for the Coin Metrics client
#[derive(Clone, Deserialize, Serialize)]
pub struct Config {
  /// Pro API key. `None` selects the community API.
  pub api_key: Option<String>,

  /// Header the API key is sent in. The service has used both `api_key`
  /// and `Authorization` across revisions, so this is never guessed.
  pub api_key_header: String,

  /// Base URL every endpoint path is appended to
  pub base_url: String,

  /// API rate limit (requests per minute)
  pub rate_limit: u32,
}

impl Config {
  /// Unauthenticated community configuration
  pub fn community() -> Self {
    Config {
      api_key: None,
      api_key_header: crate::DEFAULT_API_KEY_HEADER.to_string(),
      base_url: crate::COMMUNITY_BASE_URL.to_string(),
      rate_limit: crate::DEFAULT_RATE_LIMIT,
    }
  }

  /// Authenticated Pro configuration sending `api_key` in `header`
  pub fn pro(api_key: impl Into<String>, header: impl Into<String>) -> Self {
    Config {
      api_key: Some(api_key.into()),
      api_key_header: header.into(),
      base_url: crate::PRO_BASE_URL.to_string(),
      rate_limit: crate::PRO_RATE_LIMIT,
    }
  }

  /// Load configuration from environment variables
  ///
  /// An empty `COINMETRICS_API_KEY` counts as absent.
  pub fn from_env() -> Result<Self> {
    dotenv().ok();

    let api_key = env::var("COINMETRICS_API_KEY").ok().filter(|k| !k.trim().is_empty());
    let header = env::var("COINMETRICS_API_KEY_HEADER")
      .unwrap_or_else(|_| crate::DEFAULT_API_KEY_HEADER.to_string());

    let mut config = match api_key {
      Some(key) => Config::pro(key, header),
      None => Config { api_key_header: header, ..Config::community() },
    };

    if let Ok(base_url) = env::var("COINMETRICS_BASE_URL") {
      config = config.with_base_url(base_url);
    }

    if let Ok(rate_limit) = env::var("COINMETRICS_RATE_LIMIT") {
      let rate_limit =
        rate_limit.parse().map_err(|_| Error::Config("Invalid COINMETRICS_RATE_LIMIT".to_string()))?;
      config = config.with_rate_limit(rate_limit);
    }

    config.validate()?;
    Ok(config)
  }

  /// Override the base URL
  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into();
    self
  }

  /// Override the per-minute request budget
  pub fn with_rate_limit(mut self, rate_limit: u32) -> Self {
    self.rate_limit = rate_limit;
    self
  }

  /// Whether requests will carry the credential header
  pub fn is_pro(&self) -> bool {
    self.api_key.is_some()
  }

  /// Parsed base URL, with a trailing `/` so relative endpoint paths
  /// extend it instead of replacing its last segment.
  pub fn base(&self) -> Result<Url> {
    let mut raw = self.base_url.clone();
    if !raw.ends_with('/') {
      raw.push('/');
    }
    Url::parse(&raw).map_err(|e| Error::Config(format!("Invalid base URL '{}': {}", self.base_url, e)))
  }

  /// Check the configuration is usable
  pub fn validate(&self) -> Result<()> {
    self.base()?;
    if self.rate_limit == 0 {
      return Err(Error::Config("rate_limit must be non-zero".to_string()));
    }
    if self.api_key_header.trim().is_empty() {
      return Err(Error::Config("api_key_header must not be empty".to_string()));
    }
    Ok(())
  }
}

impl Default for Config {
  fn default() -> Self {
    Config::community()
  }
}

impl std::fmt::Debug for Config {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Config")
      .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
      .field("api_key_header", &self.api_key_header)
      .field("base_url", &self.base_url)
      .field("rate_limit", &self.rate_limit)
      .finish()
  }
}
