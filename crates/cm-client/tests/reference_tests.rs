mod common;

use cm_client::{Error, ReferenceKind};
use common::*;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_reference_lists_are_fetched_once() {
  let server = MockServer::start().await;
  mount_list(&server, "assets", &["btc", "eth"], 1).await;
  let client = client(&server);

  for _ in 0..3 {
    let assets = client.reference().get_asset_list().await.unwrap();
    assert_eq!(assets.to_vec(), vec!["btc", "eth"]);
  }
  client.reference().check_asset("btc").await.unwrap();
  client.reference().check_asset("eth,btc").await.unwrap();

  assert!(client.reference().cached(ReferenceKind::Asset).is_some());
  assert!(client.reference().cached(ReferenceKind::Metric).is_none());
}

#[tokio::test]
async fn test_validators_accept_known_identifiers() {
  let server = MockServer::start().await;
  mount_reference(&server).await;
  let client = client(&server);
  let reference = client.reference();

  reference.check_asset("btc").await.unwrap();
  reference.check_asset("btc, eth ,ltc").await.unwrap();
  reference.check_metric("PriceUSD,BlkCnt").await.unwrap();
  reference.check_exchange("coinbase").await.unwrap();
  reference.check_market("coinbase-btc-usd-spot,binance-eth-btc-spot").await.unwrap();
}

#[tokio::test]
async fn test_validators_name_the_first_bad_token() {
  let server = MockServer::start().await;
  mount_reference(&server).await;
  let client = client(&server);
  let reference = client.reference();

  match reference.check_asset("btc,doge,xyz").await {
    Err(Error::InvalidAsset(token)) => assert_eq!(token, "doge"),
    other => panic!("expected InvalidAsset, got {:?}", other),
  }
  match reference.check_metric("PriceUSD,priceusd").await {
    Err(Error::InvalidMetric { metric, asset }) => {
      assert_eq!(metric, "priceusd");
      assert_eq!(asset, None);
    }
    other => panic!("expected InvalidMetric, got {:?}", other),
  }
  assert!(matches!(reference.check_exchange("kraken").await, Err(Error::InvalidExchange(e)) if e == "kraken"));
  assert!(matches!(
    reference.check_market("kraken-btc-usd-spot").await,
    Err(Error::InvalidMarket(m)) if m == "kraken-btc-usd-spot"
  ));
}

#[tokio::test]
async fn test_empty_token_is_rejected() {
  let server = MockServer::start().await;
  mount_reference(&server).await;
  let client = client(&server);

  assert!(matches!(client.reference().check_asset("btc,").await, Err(Error::InvalidAsset(t)) if t.is_empty()));
}

#[tokio::test]
async fn test_asset_metrics_from_asset_info() {
  let server = MockServer::start().await;
  mount_reference(&server).await;
  mount_asset_info(&server, "btc", &["PriceUSD", "BlkCnt"], 1).await;
  let client = client(&server);

  let metrics = client.info().get_asset_metrics("btc").await.unwrap();
  assert_eq!(metrics, vec!["PriceUSD", "BlkCnt"]);
}

#[tokio::test]
async fn test_asset_metrics_trims_the_asset_before_lookup() {
  let server = MockServer::start().await;
  mount_reference(&server).await;
  mount_asset_info(&server, "btc", &["PriceUSD"], 1).await;
  let client = client(&server);

  let metrics = client.info().get_asset_metrics(" btc ").await.unwrap();
  assert_eq!(metrics, vec!["PriceUSD"]);
}

#[tokio::test]
async fn test_asset_info_with_huge_unknown_integers() {
  let server = MockServer::start().await;
  mount_reference(&server).await;
  let body = r#"{"assetsInfo":[{"id":"btc","metrics":["PriceUSD","BlkCnt"],"nested":{"n":12345678901234567890123}}]}"#;
  Mock::given(method("GET"))
    .and(path("/asset_info"))
    .and(query_param("subset", "btc"))
    .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
    .expect(1)
    .mount(&server)
    .await;
  let client = client(&server);

  let info = client.info().get_asset_info(Some("btc")).await.unwrap();
  assert_eq!(info[0].metrics, vec!["PriceUSD", "BlkCnt"]);
  assert_eq!(info[0].extra["nested"]["n"].to_string(), "12345678901234567890123");
}

#[tokio::test]
async fn test_asset_metrics_rejects_several_assets_without_network() {
  let server = MockServer::start().await;
  mount_list(&server, "assets", &["btc", "eth"], 0).await;
  mount_asset_info(&server, "btc,eth", &[], 0).await;
  let client = client(&server);

  let err = client.info().get_asset_metrics("btc,eth").await.unwrap_err();
  assert!(matches!(err, Error::InvalidAsset(a) if a == "btc,eth"));
}

#[tokio::test]
async fn test_metric_checked_against_asset_scope() {
  let server = MockServer::start().await;
  mount_reference(&server).await;
  mount_asset_info(&server, "btc", &["PriceUSD", "BlkCnt"], 3).await;
  let client = client(&server);
  let reference = client.reference();

  // SplyCur is in the global list but not in btc's entry
  reference.check_metric("SplyCur").await.unwrap();
  reference.check_metric_for_asset("btc", "PriceUSD").await.unwrap();
  match reference.check_metric_for_asset("btc", "PriceUSD,SplyCur").await {
    Err(Error::InvalidMetric { metric, asset }) => {
      assert_eq!(metric, "SplyCur");
      assert_eq!(asset.as_deref(), Some("btc"));
    }
    other => panic!("expected InvalidMetric, got {:?}", other),
  }

  // Globally unknown is unknown for every asset too
  assert!(reference.check_metric("NotAMetric").await.is_err());
  assert!(matches!(
    reference.check_metric_for_asset("btc", "NotAMetric").await,
    Err(Error::InvalidMetric { asset: Some(_), .. })
  ));
}

#[tokio::test]
async fn test_info_subset_is_validated_first() {
  let server = MockServer::start().await;
  mount_reference(&server).await;
  Mock::given(method("GET"))
    .and(path("/exchange_info"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "exchangesInfo": [] })))
    .expect(0)
    .mount(&server)
    .await;
  let client = client(&server);

  let err = client.info().get_exchange_info(Some("coinbase,kraken")).await.unwrap_err();
  assert!(matches!(err, Error::InvalidExchange(e) if e == "kraken"));
}

#[tokio::test]
async fn test_info_entries_are_typed() {
  let server = MockServer::start().await;
  mount_reference(&server).await;
  Mock::given(method("GET"))
    .and(path("/metric_info"))
    .and(query_param("subset", "PriceUSD"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "metricsInfo": [{
        "id": "PriceUSD",
        "name": "Price, USD",
        "description": "The fixed closing price of the asset as of 00:00 UTC the following day",
        "category": "Market",
        "subcategory": "Price",
        "unit": "USD",
        "dataType": "decimal",
        "type": "Sum"
      }]
    })))
    .expect(1)
    .mount(&server)
    .await;
  Mock::given(method("GET"))
    .and(path("/market_info"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "marketsInfo": [{ "id": "coinbase-btc-usd-spot" }, { "id": "binance-eth-btc-spot" }]
    })))
    .expect(1)
    .mount(&server)
    .await;
  let client = client(&server);

  let metrics = client.info().get_metric_info(Some("PriceUSD")).await.unwrap();
  assert_eq!(metrics.len(), 1);
  assert_eq!(metrics[0].id, "PriceUSD");
  assert_eq!(metrics[0].category.as_deref(), Some("Market"));

  // No subset: every entry, no validation request needed
  let markets = client.info().get_market_info(None).await.unwrap();
  assert_eq!(markets.len(), 2);
  assert!(client.reference().cached(ReferenceKind::Market).is_none());
}
