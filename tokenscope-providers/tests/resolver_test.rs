//! Integration tests for provider fallback resolution
//!
//! Stands up fake DexScreener, Jupiter and Solscan endpoints with wiremock and
//! checks which of them each resolution actually contacts.

use serde_json::json;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use tokenscope_core::{MarketValue, TokenAddress};
use tokenscope_net::{HttpConfig, HttpFetcher};
use tokenscope_providers::{market_providers, metadata_providers, resolve, Provider};

const MINT: &str = "GBUxQFRXQjSPjkxymAUKPfbUbSpRY8Ui7az1HCxtpump";

fn address() -> TokenAddress {
    TokenAddress::parse(MINT).expect("valid mint")
}

fn fetcher() -> HttpFetcher {
    HttpFetcher::new(&HttpConfig::default().with_timeout(5)).expect("client")
}

/// Point each provider at the mock server, keeping its parser and order
fn rehost<T>(providers: Vec<Provider<T>>, base: &str) -> Vec<Provider<T>> {
    providers
        .into_iter()
        .map(|p| {
            let template = match p.name.as_str() {
                "DexScreener" => format!("{}/dexscreener/{{address}}", base),
                "Jupiter" => format!("{}/jupiter?ids={{address}}", base),
                _ => format!("{}/solscan?tokenAddress={{address}}", base),
            };
            p.with_url_template(&template)
        })
        .collect()
}

fn dexscreener_body() -> serde_json::Value {
    json!({
        "pairs": [{
            "dexId": "raydium",
            "priceUsd": "0.0042",
            "fdv": 4200000,
            "liquidity": {"usd": 150000},
            "volume": {"h24": "60000"},
            "priceChange": {"h24": 3.2},
            "baseToken": {"address": MINT, "name": "Pump Cat", "symbol": "PCAT"},
            "info": {"decimals": 6}
        }]
    })
}

#[tokio::test]
async fn test_first_provider_short_circuits() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/dexscreener/{}", MINT)))
        .respond_with(ResponseTemplate::new(200).set_body_json(dexscreener_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/jupiter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/solscan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let providers = rehost(metadata_providers(), &server.uri());
    let meta = resolve(&fetcher(), &providers, &address()).await;

    assert_eq!(meta.name, "Pump Cat");
    assert_eq!(meta.source, "DexScreener");
    assert!(!meta.fallback);
}

#[tokio::test]
async fn test_error_and_empty_responses_fall_through() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/dexscreener/{}", MINT)))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/jupiter"))
        .and(query_param("ids", MINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/solscan"))
        .and(query_param("tokenAddress", MINT))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"name": "Pump Cat", "symbol": "PCAT", "decimals": 6})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let providers = rehost(metadata_providers(), &server.uri());
    let meta = resolve(&fetcher(), &providers, &address()).await;

    assert_eq!(meta.source, "Solscan");
    assert_eq!(meta.symbol.as_deref(), Some("PCAT"));
    assert!(meta.success);
}

#[tokio::test]
async fn test_all_providers_down() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let providers = rehost(metadata_providers(), &server.uri());
    let meta = resolve(&fetcher(), &providers, &address()).await;

    assert!(meta.fallback);
    assert!(!meta.success);
    assert_eq!(meta.name, "Token GBUxQFRX...");
    assert_eq!(meta.source, "Fallback");
}

#[tokio::test]
async fn test_market_from_dexscreener() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/dexscreener/{}", MINT)))
        .respond_with(ResponseTemplate::new(200).set_body_json(dexscreener_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/jupiter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let providers = rehost(market_providers(), &server.uri());
    let market = resolve(&fetcher(), &providers, &address()).await;

    assert_eq!(market.liquidity_usd, MarketValue::Known(150000.0));
    assert_eq!(market.volume_24h_usd, MarketValue::Known(60000.0));
    assert_eq!(market.dex.as_deref(), Some("raydium"));
}

#[tokio::test]
async fn test_market_no_pairs_anywhere() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/dexscreener/{}", MINT)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"pairs": null})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/jupiter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let providers = rehost(market_providers(), &server.uri());
    let market = resolve(&fetcher(), &providers, &address()).await;

    assert!(market.fallback);
    assert_eq!(market.liquidity_usd, MarketValue::NotTrading);
}
