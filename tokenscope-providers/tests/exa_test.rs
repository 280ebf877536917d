//! Integration tests for the Exa search backend

use serde_json::json;
use wiremock::{
    matchers::{body_partial_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

use tokenscope_providers::{ExaConfig, ExaSearch, MentionSearch, SearchError, SearchRequest};

fn create_test_search(base_url: &str) -> ExaSearch {
    let config = ExaConfig::default()
        .with_api_key(Some("test-exa-key".to_string()))
        .with_base_url(base_url);
    ExaSearch::new(config).expect("search backend")
}

fn request() -> SearchRequest {
    SearchRequest::new("site:x.com GBUxQFRX")
        .with_domains(&["x.com".to_string(), "twitter.com".to_string()])
        .with_num_results(10)
        .with_start_published_date(Some("2023-01-01"))
}

#[tokio::test]
async fn test_search_maps_results() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(header("x-api-key", "test-exa-key"))
        .and(body_partial_json(json!({
            "query": "site:x.com GBUxQFRX",
            "numResults": 10,
            "includeDomains": ["x.com", "twitter.com"],
            "startPublishedDate": "2023-01-01",
            "contents": {"text": true}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {
                    "title": "PCAT on pump.fun",
                    "url": "https://x.com/solana_degen/status/1790000000",
                    "publishedDate": "2024-05-01T12:00:00.000Z",
                    "text": "Just aped $PCAT CA: GBUxQFRXQjSP"
                },
                {
                    "title": "thread",
                    "url": "https://twitter.com/someone/status/1",
                    "author": "@CryptoKaleo"
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mentions = create_test_search(&server.uri())
        .search(&request())
        .await
        .expect("search ok");

    assert_eq!(mentions.len(), 2);
    assert_eq!(mentions[0].author.as_deref(), Some("@solana_degen"));
    assert!(mentions[0].body.contains("GBUxQFRXQjSP"));
    assert_eq!(mentions[1].author.as_deref(), Some("@CryptoKaleo"));
    assert_eq!(mentions[1].body, "");
    assert!(mentions.iter().all(|m| m.engagement.is_none()));
}

#[tokio::test]
async fn test_search_empty_results() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&server)
        .await;

    let mentions = create_test_search(&server.uri())
        .search(&request())
        .await
        .expect("search ok");
    assert!(mentions.is_empty());
}

#[tokio::test]
async fn test_search_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let err = create_test_search(&server.uri())
        .search(&request())
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Status(429)));
}

#[tokio::test]
async fn test_search_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = create_test_search(&server.uri())
        .search(&request())
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Parse(_)));
}
