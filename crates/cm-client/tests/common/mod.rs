//! Shared fixtures for the wiremock-backed client tests
#![allow(dead_code)]

use cm_client::{CoinMetricsClient, Config};
use serde_json::{Map, Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate, Times};

pub const BTC_PRICES: [(&str, &str); 8] = [
  ("2019-01-01T00:00:00.000000000Z", "3808.117489180"),
  ("2019-01-02T00:00:00.000000000Z", "3880.781397870"),
  ("2019-01-03T00:00:00.000000000Z", "3767.200943040"),
  ("2019-01-04T00:00:00.000000000Z", "3792.785851360"),
  ("2019-01-05T00:00:00.000000000Z", "3770.964634150"),
  ("2019-01-06T00:00:00.000000000Z", "3987.554261970"),
  ("2019-01-07T00:00:00.000000000Z", "3952.915208150"),
  ("2019-01-08T00:00:00.000000000Z", "3950.946733470"),
];

/// Community client pointed at the mock server
pub fn client(server: &MockServer) -> CoinMetricsClient {
  CoinMetricsClient::new(Config::community().with_base_url(server.uri())).expect("client")
}

/// Pro client pointed at the mock server
pub fn pro_client(server: &MockServer, key: &str, header: &str) -> CoinMetricsClient {
  CoinMetricsClient::new(Config::pro(key, header).with_base_url(server.uri())).expect("client")
}

/// `GET /{name}` answering `{"{name}": items}`
pub async fn mount_list(server: &MockServer, name: &str, items: &[&str], expected: impl Into<Times>) {
  let mut body = Map::new();
  body.insert(name.to_string(), json!(items));
  Mock::given(method("GET"))
    .and(path(format!("/{name}")))
    .respond_with(ResponseTemplate::new(200).set_body_json(Value::Object(body)))
    .expect(expected)
    .mount(server)
    .await;
}

/// The usual reference lists, each fetched at most once
pub async fn mount_reference(server: &MockServer) {
  mount_list(server, "assets", &["btc", "eth", "ltc"], ..=1).await;
  mount_list(server, "metrics", &["PriceUSD", "BlkCnt", "SplyCur", "TxCnt"], ..=1).await;
  mount_list(server, "exchanges", &["binance", "coinbase"], ..=1).await;
  mount_list(server, "markets", &["coinbase-btc-usd-spot", "binance-eth-btc-spot"], ..=1).await;
}

pub fn asset_info(id: &str, metrics: &[&str]) -> Value {
  json!({
    "id": id,
    "name": id.to_uppercase(),
    "metrics": metrics,
    "exchanges": ["coinbase"],
    "markets": ["coinbase-btc-usd-spot"],
    "minTime": "2009-01-03T00:00:00.000000000Z",
    "maxTime": "2019-01-08T00:00:00.000000000Z",
  })
}

/// `GET /asset_info?subset={id}` answering one entry
pub async fn mount_asset_info(server: &MockServer, id: &str, metrics: &[&str], expected: u64) {
  Mock::given(method("GET"))
    .and(path("/asset_info"))
    .and(query_param("subset", id))
    .respond_with(
      ResponseTemplate::new(200).set_body_json(json!({ "assetsInfo": [asset_info(id, metrics)] })),
    )
    .expect(expected)
    .mount(server)
    .await;
}

/// `metricData` body for a single metric
pub fn single_metric_body(metric: &str, rows: &[(&str, &str)]) -> Value {
  let series: Vec<Value> = rows.iter().map(|(time, value)| json!({ "time": time, "values": [value] })).collect();
  json!({ "metricData": { "metrics": [metric], "series": series } })
}
