//! HTTP transport layer for Coin Metrics API requests

use cm_core::{Config, Endpoint, Error, Result, TransportError};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::num::NonZeroU32;
use tracing::{debug, error, instrument};
use url::Url;

/// HTTP transport layer for making requests to the Coin Metrics API
///
/// One GET per call, no retries. Numbers in the decoded body keep their
/// exact text (`serde_json` is built with `arbitrary_precision`).
pub struct Transport {
  client: Client,
  base_url: Url,
  credential: Option<(HeaderName, HeaderValue)>,
  rate_limiter: DefaultDirectRateLimiter,
}

impl Transport {
  /// Create a new transport instance
  pub fn new(config: &Config) -> Result<Self> {
    config.validate()?;

    let client = Client::builder()
      .user_agent(concat!("cm-client/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

    let credential = match &config.api_key {
      Some(key) => {
        let name = HeaderName::from_bytes(config.api_key_header.as_bytes())
          .map_err(|e| Error::Config(format!("Invalid API key header name: {}", e)))?;
        let mut value = HeaderValue::from_str(key)
          .map_err(|e| Error::Config(format!("API key is not a valid header value: {}", e)))?;
        value.set_sensitive(true);
        Some((name, value))
      }
      None => None,
    };

    let quota = NonZeroU32::new(config.rate_limit)
      .ok_or_else(|| Error::Config("rate_limit must be non-zero".to_string()))?;

    Ok(Self {
      client,
      base_url: config.base()?,
      credential,
      rate_limiter: RateLimiter::direct(Quota::per_minute(quota)),
    })
  }

  /// Create a mock transport for testing
  #[cfg(test)]
  pub fn new_mock() -> Self {
    Self::new(&Config::pro("test_key", "api_key").with_base_url("https://mock.coinmetrics.io/v4"))
      .expect("mock config is valid")
  }

  /// GET `endpoint` with `params` and return the decoded JSON body
  #[instrument(skip(self, params), fields(endpoint = %endpoint))]
  pub async fn query(&self, endpoint: &Endpoint, params: &HashMap<String, String>) -> Result<Value> {
    let url = self.build_url(endpoint, params)?;
    debug!("Making request to: {}", url);

    self.rate_limiter.until_ready().await;

    let mut request = self.client.get(url);
    if let Some((name, value)) = &self.credential {
      request = request.header(name.clone(), value.clone());
    }

    let response =
      request.send().await.map_err(|e| TransportError::Network(format!("Request failed: {}", e)))?;
    let status = response.status();

    let text = response
      .text()
      .await
      .map_err(|e| TransportError::Network(format!("Failed to read response body: {}", e)))?;
    debug!("Response status {} with {} bytes", status, text.len());

    if !status.is_success() {
      let message = error_message(&text);
      error!("Request failed with status {}: {}", status, message);
      return Err(TransportError::Status { status: status.as_u16(), message }.into());
    }

    serde_json::from_str::<Value>(&text).map_err(|e| {
      error!("Failed to parse JSON response: {}", e);
      TransportError::Decode(format!("{}. Response: {}", e, truncate(&text, 200))).into()
    })
  }

  /// Like [`query`](Self::query), then take `key` out of the top-level object
  /// and deserialize it.
  pub async fn get<T>(&self, endpoint: &Endpoint, params: &HashMap<String, String>, key: &str) -> Result<T>
  where
    T: DeserializeOwned,
  {
    let mut payload = self.query(endpoint, params).await?;
    let value =
      payload.get_mut(key).map(Value::take).ok_or_else(|| Error::MissingField(key.to_string()))?;

    serde_json::from_value(value)
      .map_err(|e| TransportError::Decode(format!("'{}' has an unexpected shape: {}", key, e)).into())
  }

  /// Build the full URL for an API request; parameters are sorted by name
  fn build_url(&self, endpoint: &Endpoint, params: &HashMap<String, String>) -> Result<Url> {
    let mut url = self
      .base_url
      .join(&endpoint.path())
      .map_err(|e| Error::Config(format!("Invalid endpoint '{}': {}", endpoint, e)))?;

    if !params.is_empty() {
      let mut pairs: Vec<_> = params.iter().collect();
      pairs.sort();
      url.query_pairs_mut().extend_pairs(pairs);
    }

    Ok(url)
  }

  /// Get the base URL being used
  pub fn base_url(&self) -> &str {
    self.base_url.as_str()
  }

  /// Whether requests carry the credential header
  pub fn is_authenticated(&self) -> bool {
    self.credential.is_some()
  }
}

impl std::fmt::Debug for Transport {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Transport")
      .field("base_url", &self.base_url.as_str())
      .field("credential_header", &self.credential.as_ref().map(|(name, _)| name.as_str()))
      .finish()
  }
}

/// Pull `error.message` out of an error body, falling back to the raw text
fn error_message(body: &str) -> String {
  serde_json::from_str::<Value>(body)
    .ok()
    .and_then(|v| {
      v.pointer("/error/message").or_else(|| v.get("error")).and_then(Value::as_str).map(str::to_string)
    })
    .unwrap_or_else(|| truncate(body, 200).to_string())
}

fn truncate(text: &str, max: usize) -> &str {
  match text.char_indices().nth(max) {
    Some((idx, _)) => &text[..idx],
    None => text,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_build_url() {
    let transport = Transport::new_mock();
    let mut params = HashMap::new();
    params.insert("start".to_string(), "2019-01-01".to_string());
    params.insert("metrics".to_string(), "PriceUSD,BlkCnt".to_string());

    let url = transport.build_url(&Endpoint::MetricData { asset: "btc".into() }, &params).unwrap();

    assert_eq!(
      url.as_str(),
      "https://mock.coinmetrics.io/v4/assets/btc/metricdata?metrics=PriceUSD%2CBlkCnt&start=2019-01-01"
    );
  }

  #[test]
  fn test_build_url_without_params() {
    let transport = Transport::new_mock();
    let url = transport.build_url(&Endpoint::Assets, &HashMap::new()).unwrap();
    assert_eq!(url.as_str(), "https://mock.coinmetrics.io/v4/assets");
  }

  #[test]
  fn test_error_message_extraction() {
    let body = r#"{"error":{"type":"unauthorized","message":"Requested resource requires authorization."}}"#;
    assert_eq!(error_message(body), "Requested resource requires authorization.");
    assert_eq!(error_message(r#"{"error":"bad asset"}"#), "bad asset");
    assert_eq!(error_message("<html>502</html>"), "<html>502</html>");
  }

  #[test]
  fn test_invalid_header_name_is_config_error() {
    let config = Config::pro("key", "bad header");
    assert!(matches!(Transport::new(&config), Err(Error::Config(_))));
  }

  #[test]
  fn test_truncate_respects_char_boundaries() {
    assert_eq!(truncate("äöü", 2), "äö");
    assert_eq!(truncate("abc", 10), "abc");
  }
}
