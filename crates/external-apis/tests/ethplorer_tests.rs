// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for `EthplorerClient`

use alloy_primitives::Address;
use api_client::{ApiClient, ApiError, HealthStatus, HolderListProvider};
use external_apis::{EthplorerClient, EthplorerConfig};
use rust_decimal::Decimal;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

mod fixtures;
use fixtures::*;

fn create_test_client(base_url: String) -> EthplorerClient {
    EthplorerClient::new(EthplorerConfig {
        base_url,
        api_key: "test-key".to_string(),
        timeout_seconds: 10,
        health_check_timeout_seconds: 5,
    })
    .unwrap()
}

fn token() -> Address {
    Address::from([0x42; 20])
}

#[tokio::test]
async fn top_holders_preserves_provider_order() {
    let mock_server = MockServer::start().await;
    let first = Address::from([0x01; 20]);
    let second = Address::from([0x02; 20]);

    Mock::given(method("GET"))
        .and(path(format!("/getTopTokenHolders/{}", token())))
        .and(query_param("apiKey", "test-key"))
        .and(query_param("limit", "100"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ethplorer_holders(&[(first, 40.5), (second, 10.25)])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(mock_server.uri());
    let holders = client.top_holders(token(), 100).await.unwrap();

    assert_eq!(holders.len(), 2);
    assert_eq!(holders[0].address, first);
    assert_eq!(holders[0].share, Decimal::new(405, 1));
    assert_eq!(holders[1].address, second);
    assert_eq!(holders[1].share, Decimal::new(1025, 2));
}

#[tokio::test]
async fn provider_error_object_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": 104, "message": "Invalid token address" }
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(mock_server.uri());
    let result = client.top_holders(token(), 100).await;

    match result {
        Err(ApiError::Custom { error }) => {
            assert!(error.to_string().contains("Invalid token address"));
        }
        other => panic!("Expected provider error, got: {other:?}"),
    }
}

#[tokio::test]
async fn missing_holders_is_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let client = create_test_client(mock_server.uri());
    let result = client.top_holders(token(), 100).await;

    assert!(matches!(result, Err(ApiError::InvalidResponse { .. })));
}

#[tokio::test]
async fn rate_limited_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let client = create_test_client(mock_server.uri());
    let result = client.top_holders(token(), 100).await;

    assert!(matches!(result, Err(ApiError::RateLimitExceeded { .. })));
}

#[tokio::test]
async fn health_check_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getLastBlock"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"lastBlock": 19000000})))
        .mount(&mock_server)
        .await;

    let client = create_test_client(mock_server.uri());
    assert_eq!(client.health_check().await.unwrap(), HealthStatus::Up);
}

#[tokio::test]
async fn health_check_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getLastBlock"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let client = create_test_client(mock_server.uri());
    let status = client.health_check().await.unwrap();
    assert_eq!(
        status,
        HealthStatus::Down {
            reason: "Authentication failed".to_string()
        }
    );
}
