//! Feed fetching against a mock HTTP server

use allexis_sdk::{AllexisSdk, SdkConfig, SdkError};
use mockito::Server;
use serde_json::json;

fn sdk_for(endpoint: String) -> AllexisSdk {
    AllexisSdk::with_config(SdkConfig::new().with_feed_endpoint(endpoint)).unwrap()
}

#[tokio::test]
async fn test_get_feed_returns_parsed_payload() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/bins/m0znl")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"products":[{"id":"item1","title":"Track one"}]}"#)
        .expect(1)
        .create_async()
        .await;

    let sdk = sdk_for(format!("{}/bins/m0znl", server.url()));
    let feed = sdk.get_feed("home").await.unwrap();

    assert_eq!(feed["products"][0]["id"], json!("item1"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_feed_id_does_not_change_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/feed")
        .with_status(200)
        .with_body("[]")
        .expect(2)
        .create_async()
        .await;

    let sdk = sdk_for(format!("{}/feed", server.url()));
    assert_eq!(sdk.get_feed("a").await.unwrap(), json!([]));
    assert_eq!(sdk.get_feed("b").await.unwrap(), json!([]));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/feed")
        .with_status(500)
        .with_body("<html>Internal Server Error</html>")
        .create_async()
        .await;

    let sdk = sdk_for(format!("{}/feed", server.url()));
    let err = sdk.get_feed("home").await.unwrap_err();

    assert!(matches!(err, SdkError::Parse(_)), "unexpected error: {}", err);
}

#[tokio::test]
async fn test_unreachable_endpoint_is_http_error() {
    let sdk = sdk_for("http://127.0.0.1:1/feed".to_string());
    let err = sdk.get_feed("home").await.unwrap_err();

    assert!(matches!(err, SdkError::Http(_)), "unexpected error: {}", err);
}
