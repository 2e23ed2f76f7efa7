// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Etherscan API integration
//!
//! This module provides an implementation of the `TransferHistoryProvider` trait
//! using the Etherscan `account/tokentx` endpoint. Etherscan signals "nothing
//! found" and soft failures such as rate limiting through a `status` field of
//! `"0"` rather than an HTTP status; both are reported as an empty history.

use std::time::{Duration, Instant};

use alloy_primitives::{Address, U256};
use api_client::{ApiClient, ApiError, HealthStatus, TokenTransfer, TransferHistoryProvider};
use chrono::DateTime;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::NonEmptyString;

const NO_TRANSACTIONS_MESSAGE: &str = "No transactions found";

/// Configuration for the Etherscan API client
#[derive(Debug, Clone)]
pub struct EtherscanConfig {
    /// Base URL for the Etherscan API
    pub base_url: String,
    /// API key, requests are sent without one when absent
    pub api_key: Option<String>,
    /// Chain queried through the multichain endpoint
    pub chain_id: u64,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Health check timeout in seconds
    pub health_check_timeout_seconds: u64,
}

impl Default for EtherscanConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.etherscan.io/v2/api".to_string(),
            api_key: None,
            chain_id: 1,
            timeout_seconds: 30,
            health_check_timeout_seconds: 5,
        }
    }
}

/// Etherscan API client implementation
#[derive(Debug, Clone)]
pub struct EtherscanClient {
    client: Client,
    api_key: Option<NonEmptyString>,
    config: EtherscanConfig,
}

/// Errors specific to the Etherscan API client
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum EtherscanError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned a non-success status
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Rate limit exceeded at the HTTP level
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Timeout error
    #[error("Request timeout")]
    Timeout { seconds: u64 },
}

impl From<EtherscanError> for ApiError {
    fn from(value: EtherscanError) -> Self {
        match value {
            EtherscanError::Http(error) => ApiError::Http {
                message: error.to_string(),
            },
            EtherscanError::Json(error) => ApiError::InvalidResponse {
                message: error.to_string(),
            },
            EtherscanError::ApiError { status, message } => ApiError::Custom {
                error: anyhow::Error::msg(format!("{status}: {message}")),
            },
            EtherscanError::RateLimited => ApiError::RateLimitExceeded {
                retry_after_seconds: 1,
            },
            EtherscanError::Config(message) => ApiError::Configuration { message },
            EtherscanError::Timeout { seconds } => ApiError::Timeout {
                timeout_seconds: seconds,
            },
        }
    }
}

/// Envelope shared by Etherscan account endpoints
#[derive(Debug, Deserialize)]
pub struct EtherscanResponse {
    /// `"1"` on success, `"0"` otherwise
    pub status: String,
    /// Short status message such as `OK` or `NOTOK`
    #[serde(default)]
    pub message: String,
    /// Transfers on success, an explanatory string otherwise
    #[serde(default)]
    pub result: Option<EtherscanResult>,
}

/// The `result` field changes type with `status`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum EtherscanResult {
    /// Transfer list
    Transfers(Vec<EtherscanTransfer>),
    /// Error or informational message
    Message(String),
}

/// Individual ERC-20 transfer event
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EtherscanTransfer {
    /// Block number as a decimal string
    #[serde(default)]
    pub block_number: String,
    /// Unix timestamp as a decimal string
    #[serde(default)]
    pub time_stamp: String,
    /// Transaction hash
    #[serde(default)]
    pub hash: String,
    /// Sender address
    pub from: Address,
    /// Recipient address
    pub to: Address,
    /// Raw amount as a decimal string
    #[serde(default)]
    pub value: String,
}

impl From<EtherscanTransfer> for TokenTransfer {
    fn from(transfer: EtherscanTransfer) -> Self {
        Self {
            value: transfer.value.parse::<U256>().ok(),
            block_number: transfer.block_number.parse().ok(),
            timestamp: transfer
                .time_stamp
                .parse::<i64>()
                .ok()
                .and_then(|secs| DateTime::from_timestamp(secs, 0)),
            hash: transfer.hash,
            from: transfer.from,
            to: transfer.to,
        }
    }
}

impl EtherscanClient {
    /// Create a new Etherscan API client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created or configuration is invalid
    pub fn new(config: EtherscanConfig) -> Result<Self, EtherscanError> {
        if config.base_url.trim().is_empty() {
            return Err(EtherscanError::Config(
                "Base URL cannot be empty".to_string(),
            ));
        }

        let api_key = NonEmptyString::optional(config.api_key.as_deref());
        if api_key.is_none() {
            warn!("no Etherscan API key configured, requests will use the keyless rate limit");
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("token-supply-api/0.1.0")
            .build()
            .map_err(EtherscanError::Http)?;

        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    /// Query parameters shared by every request
    fn base_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("chainid", self.config.chain_id.to_string())];
        if let Some(key) = &self.api_key {
            query.push(("apikey", key.to_string()));
        }
        query
    }

    /// Fetch the most recent ERC-20 transfers of `token` involving `holder`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed
    pub async fn get_token_transfers(
        &self,
        token: Address,
        holder: Address,
        limit: usize,
    ) -> Result<Vec<EtherscanTransfer>, EtherscanError> {
        let url = self.config.base_url.trim();

        debug!(url, %token, %holder, limit, "fetching token transfers from Etherscan");

        let mut query = self.base_query();
        query.extend([
            ("module", "account".to_string()),
            ("action", "tokentx".to_string()),
            ("contractaddress", token.to_string()),
            ("address", holder.to_string()),
            ("page", "1".to_string()),
            ("offset", limit.to_string()),
            ("sort", "desc".to_string()),
        ]);

        let request = self
            .client
            .get(url)
            .query(&query)
            .header("accept", "application/json");

        let response = timeout(
            Duration::from_secs(self.config.timeout_seconds),
            request.send(),
        )
        .await
        .map_err(|_| EtherscanError::Timeout {
            seconds: self.config.timeout_seconds,
        })?
        .map_err(EtherscanError::Http)?;

        match response.status() {
            StatusCode::OK => {
                let body = response.bytes().await?;
                let parsed: EtherscanResponse = serde_json::from_slice(&body)?;
                Ok(Self::into_transfers(parsed, holder))
            }
            StatusCode::TOO_MANY_REQUESTS => Err(EtherscanError::RateLimited),
            status => {
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                warn!("Etherscan API error: {} - {}", status.as_u16(), error_text);
                Err(EtherscanError::ApiError {
                    status: status.as_u16(),
                    message: error_text,
                })
            }
        }
    }

    fn into_transfers(response: EtherscanResponse, holder: Address) -> Vec<EtherscanTransfer> {
        match (response.status.as_str(), response.result) {
            ("1", Some(EtherscanResult::Transfers(transfers))) => transfers,
            (_, result) => {
                let detail = match result {
                    Some(EtherscanResult::Message(message)) => message,
                    _ => String::new(),
                };
                if response.message == NO_TRANSACTIONS_MESSAGE {
                    debug!(%holder, "no transfers found");
                } else {
                    warn!(
                        %holder,
                        status = %response.status,
                        message = %response.message,
                        detail = %detail,
                        "Etherscan returned no usable transfer list"
                    );
                }
                Vec::new()
            }
        }
    }
}

impl ApiClient for EtherscanClient {
    async fn health_check(&self) -> Result<HealthStatus, ApiError> {
        let url = self.config.base_url.trim();

        debug!(url, "performing health check on Etherscan API");

        let mut query = self.base_query();
        query.extend([
            ("module", "proxy".to_string()),
            ("action", "eth_blockNumber".to_string()),
        ]);

        let request = self.client.get(url).query(&query);

        let start_time = Instant::now();
        let response = timeout(
            Duration::from_secs(self.config.health_check_timeout_seconds),
            request.send(),
        )
        .await
        .map_err(|_| EtherscanError::Timeout {
            seconds: self.config.health_check_timeout_seconds,
        })?
        .map_err(EtherscanError::Http)?;

        let response_time = start_time.elapsed();

        match response.status() {
            StatusCode::OK => {
                info!("Etherscan API health check passed in {:?}", response_time);
                Ok(HealthStatus::Up)
            }
            StatusCode::TOO_MANY_REQUESTS => {
                warn!("Etherscan API health check failed: rate limited");
                Ok(HealthStatus::Degraded {
                    reason: "Rate limited".to_string(),
                })
            }
            status => {
                warn!("Etherscan API health check failed with status: {}", status);
                Ok(HealthStatus::Degraded {
                    reason: format!("API returned status {}", status.as_u16()),
                })
            }
        }
    }

    fn name(&self) -> &'static str {
        "etherscan"
    }
}

impl TransferHistoryProvider for EtherscanClient {
    async fn recent_transfers(
        &self,
        token: Address,
        holder: Address,
        limit: usize,
    ) -> Result<Vec<TokenTransfer>, ApiError> {
        let transfers = self.get_token_transfers(token, holder, limit).await?;
        Ok(transfers.into_iter().map(TokenTransfer::from).collect())
    }
}
