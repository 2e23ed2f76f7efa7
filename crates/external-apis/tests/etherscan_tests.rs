// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for `EtherscanClient`

use alloy_primitives::Address;
use api_client::{ApiClient, ApiError, HealthStatus, TransferHistoryProvider};
use external_apis::{EtherscanClient, EtherscanConfig};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

mod fixtures;
use fixtures::*;

fn create_test_client(base_url: String, api_key: Option<&str>) -> EtherscanClient {
    EtherscanClient::new(EtherscanConfig {
        base_url: format!("{base_url}/api"),
        api_key: api_key.map(ToString::to_string),
        chain_id: 1,
        timeout_seconds: 10,
        health_check_timeout_seconds: 5,
    })
    .unwrap()
}

fn token() -> Address {
    Address::from([0x42; 20])
}

fn holder() -> Address {
    Address::from([0x11; 20])
}

#[tokio::test]
async fn recent_transfers_success() {
    let mock_server = MockServer::start().await;
    let other = Address::from([0x22; 20]);

    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("chainid", "1"))
        .and(query_param("module", "account"))
        .and(query_param("action", "tokentx"))
        .and(query_param("contractaddress", token().to_string()))
        .and(query_param("address", holder().to_string()))
        .and(query_param("offset", "5"))
        .and(query_param("sort", "desc"))
        .and(query_param("apikey", "test-key"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(etherscan_transfers(&[(holder(), other), (other, holder())])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(mock_server.uri(), Some("test-key"));
    let transfers = client.recent_transfers(token(), holder(), 5).await.unwrap();

    assert_eq!(transfers.len(), 2);
    assert!(transfers[0].is_sent_by(holder()));
    assert!(transfers[1].is_received_by(holder()));
    assert_eq!(transfers[1].block_number, Some(19_000_001));
}

#[tokio::test]
async fn no_transactions_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(etherscan_empty()))
        .mount(&mock_server)
        .await;

    let client = create_test_client(mock_server.uri(), None);
    let transfers = client.recent_transfers(token(), holder(), 5).await.unwrap();
    assert!(transfers.is_empty());
}

#[tokio::test]
async fn soft_rate_limit_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(etherscan_rate_limited()))
        .mount(&mock_server)
        .await;

    let client = create_test_client(mock_server.uri(), Some("test-key"));
    let transfers = client.recent_transfers(token(), holder(), 5).await.unwrap();
    assert!(transfers.is_empty());
}

#[tokio::test]
async fn server_error_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(mock_server.uri(), None);
    let result = client.recent_transfers(token(), holder(), 5).await;
    assert!(matches!(result, Err(ApiError::Custom { .. })));
}

#[tokio::test]
async fn malformed_body_is_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(mock_server.uri(), None);
    let result = client.recent_transfers(token(), holder(), 5).await;
    assert!(matches!(result, Err(ApiError::InvalidResponse { .. })));
}

#[tokio::test]
async fn health_check_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("module", "proxy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "jsonrpc": "2.0", "id": 83, "result": "0x1234"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(mock_server.uri(), None);
    assert_eq!(client.health_check().await.unwrap(), HealthStatus::Up);
    assert_eq!(client.name(), "etherscan");
}
