// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0
#![allow(missing_docs, dead_code)]

//! Test fixtures for the supply endpoints
//!
//! Starts mocked upstream providers and a server wired to them.

use std::net::SocketAddr;

use alloy_primitives::{Address, U256, hex};
use alloy_sol_types::SolValue;
use api::{Server, ServerConfig, ShutdownConfig};
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string_contains, method, path, query_param},
};

pub const TOTAL_SUPPLY_SELECTOR: &str = "18160ddd";
pub const CAP_SELECTOR: &str = "355274ea";
pub const NAME_SELECTOR: &str = "06fdde03";
pub const SYMBOL_SELECTOR: &str = "95d89b41";
pub const DECIMALS_SELECTOR: &str = "313ce567";

/// Token every test resolves
pub fn token() -> Address {
    Address::repeat_byte(0x42)
}

/// Mocked blockchain node, holder-list provider and history provider
pub struct Upstreams {
    pub rpc: MockServer,
    pub ethplorer: MockServer,
    pub etherscan: MockServer,
}

impl Upstreams {
    pub async fn start() -> Self {
        Self {
            rpc: MockServer::start().await,
            ethplorer: MockServer::start().await,
            etherscan: MockServer::start().await,
        }
    }

    /// Answer `selector` calls with `body`
    pub async fn mock_call(&self, selector: &str, body: Value) {
        Mock::given(method("POST"))
            .and(body_string_contains(selector))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.rpc)
            .await;
    }

    /// A standard token: name, symbol, decimals and `totalSupply()`
    pub async fn mock_token(&self, total_supply: U256, decimals: u8) {
        self.mock_call(TOTAL_SUPPLY_SELECTOR, rpc_uint(total_supply))
            .await;
        self.mock_call(NAME_SELECTOR, rpc_string("Test Token")).await;
        self.mock_call(SYMBOL_SELECTOR, rpc_string("TT")).await;
        self.mock_call(DECIMALS_SELECTOR, rpc_uint(U256::from(decimals)))
            .await;
    }

    pub async fn mock_holders(&self, holders: &[(Address, f64)]) {
        Mock::given(method("GET"))
            .and(path(format!("/getTopTokenHolders/{}", token())))
            .respond_with(ResponseTemplate::new(200).set_body_json(ethplorer_holders(holders)))
            .mount(&self.ethplorer)
            .await;
    }

    pub async fn fail_holders(&self) {
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .mount(&self.ethplorer)
            .await;
    }

    pub async fn mock_transfers(&self, holder: Address, transfers: &[(Address, Address)]) {
        Mock::given(method("GET"))
            .and(path("/api"))
            .and(query_param("address", holder.to_string()))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(etherscan_transfers(transfers)),
            )
            .mount(&self.etherscan)
            .await;
    }

    pub async fn mock_no_transfers(&self, holder: Address) {
        Mock::given(method("GET"))
            .and(path("/api"))
            .and(query_param("address", holder.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "0",
                "message": "No transactions found",
                "result": [],
            })))
            .mount(&self.etherscan)
            .await;
    }

    /// Configuration pointing every provider at the mocks
    pub fn config(&self) -> ServerConfig {
        let mut config = ServerConfig::for_testing();
        config.token.default_address = token().to_string();
        config.providers.rpc.url = self.rpc.uri();
        config.providers.ethplorer.base_url = self.ethplorer.uri();
        config.providers.ethplorer.api_key = "test-key".to_string();
        config.providers.etherscan.base_url = format!("{}/api", self.etherscan.uri());
        config
    }

    /// Start a server wired to the mocks
    pub async fn spawn_server(&self) -> TestApp {
        let (addr, _) = Server::new(self.config(), ShutdownConfig::default())
            .expect("Failed to create server")
            .run_for_testing()
            .await
            .expect("Failed to start test server");

        TestApp {
            addr,
            client: reqwest::Client::new(),
        }
    }
}

/// Running server and a client for it
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn get(&self, path_and_query: &str) -> reqwest::Response {
        self.client
            .get(format!("http://{}{path_and_query}", self.addr))
            .send()
            .await
            .expect("Failed to send request")
    }

    pub async fn get_json(&self, path_and_query: &str) -> Value {
        let response = self.get(path_and_query).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        response.json().await.expect("Failed to parse JSON body")
    }

    pub async fn get_text(&self, path_and_query: &str) -> (reqwest::StatusCode, String) {
        let response = self.get(path_and_query).await;
        let status = response.status();
        (status, response.text().await.expect("Failed to read body"))
    }
}

pub fn rpc_result(data: &[u8]) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "result": hex::encode_prefixed(data),
    })
}

pub fn rpc_uint(value: U256) -> Value {
    rpc_result(&value.abi_encode())
}

pub fn rpc_string(value: &str) -> Value {
    rpc_result(&value.to_string().abi_encode())
}

pub fn rpc_revert() -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "error": { "code": 3, "message": "execution reverted" },
    })
}

pub fn ethplorer_holders(holders: &[(Address, f64)]) -> Value {
    let holders: Vec<Value> = holders
        .iter()
        .map(|(address, share)| {
            json!({
                "address": address.to_string().to_lowercase(),
                "balance": share * 1e4,
                "share": share,
            })
        })
        .collect();
    json!({ "holders": holders })
}

pub fn etherscan_transfers(transfers: &[(Address, Address)]) -> Value {
    let result: Vec<Value> = transfers
        .iter()
        .enumerate()
        .map(|(index, (from, to))| {
            json!({
                "blockNumber": (19_000_000 + index).to_string(),
                "timeStamp": (1_700_000_000 + index).to_string(),
                "hash": format!("0x{index:064x}"),
                "from": from.to_string().to_lowercase(),
                "to": to.to_string().to_lowercase(),
                "value": "100",
            })
        })
        .collect();
    json!({ "status": "1", "message": "OK", "result": result })
}
