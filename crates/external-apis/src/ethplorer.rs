// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Ethplorer API integration
//!
//! This module provides an implementation of the `HolderListProvider` trait for
//! the Ethplorer API, which reports the top holders of an ERC-20 token together
//! with their share of total supply.

use std::time::{Duration, Instant};

use alloy_primitives::Address;
use api_client::{ApiClient, ApiError, HealthStatus, HolderListProvider, TopHolder};
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::NonEmptyString;

/// Ethplorer caps `getTopTokenHolders` at this many entries
pub const MAX_HOLDER_LIMIT: usize = 1000;

/// Configuration for the Ethplorer API client
#[derive(Debug, Clone)]
pub struct EthplorerConfig {
    /// Base URL for the Ethplorer API
    pub base_url: String,
    /// API key, `freekey` selects the public tier
    pub api_key: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Health check timeout in seconds
    pub health_check_timeout_seconds: u64,
}

impl Default for EthplorerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.ethplorer.io".to_string(),
            api_key: "freekey".to_string(),
            timeout_seconds: 30,
            health_check_timeout_seconds: 5,
        }
    }
}

/// Ethplorer API client implementation
#[derive(Debug, Clone)]
pub struct EthplorerClient {
    client: Client,
    base_url: String,
    api_key: NonEmptyString,
    config: EthplorerConfig,
}

/// Errors specific to the Ethplorer API client
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum EthplorerError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned a non-success status
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// API returned an error object in the body
    #[error("Ethplorer error {code}: {message}")]
    Provider { code: i64, message: String },

    /// Response carried neither holders nor an error
    #[error("response did not contain a holders list")]
    MissingHolders,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Authentication failed
    #[error("Authentication failed")]
    Unauthorized,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Timeout error
    #[error("Request timeout")]
    Timeout { seconds: u64 },
}

impl From<EthplorerError> for ApiError {
    fn from(value: EthplorerError) -> Self {
        match value {
            EthplorerError::Http(error) => ApiError::Http {
                message: error.to_string(),
            },
            EthplorerError::Json(error) => ApiError::InvalidResponse {
                message: error.to_string(),
            },
            EthplorerError::MissingHolders => ApiError::InvalidResponse {
                message: value.to_string(),
            },
            EthplorerError::ApiError { status, message } => ApiError::Custom {
                error: anyhow::Error::msg(format!("{status}: {message}")),
            },
            EthplorerError::Provider { .. } => ApiError::Custom {
                error: anyhow::Error::msg(value.to_string()),
            },
            EthplorerError::RateLimited => ApiError::RateLimitExceeded {
                retry_after_seconds: 2,
            },
            EthplorerError::Unauthorized => ApiError::Authentication {
                message: value.to_string(),
            },
            EthplorerError::Config(message) => ApiError::Configuration { message },
            EthplorerError::Timeout { seconds } => ApiError::Timeout {
                timeout_seconds: seconds,
            },
        }
    }
}

/// Response structure for the `getTopTokenHolders` endpoint
#[derive(Debug, Deserialize)]
pub struct EthplorerTopHoldersResponse {
    /// Holders ranked by balance, largest first
    pub holders: Option<Vec<EthplorerHolder>>,
    /// Error object returned instead of holders
    pub error: Option<EthplorerErrorBody>,
}

/// Individual holder entry
#[derive(Debug, Deserialize)]
pub struct EthplorerHolder {
    /// Holder address
    pub address: Address,
    /// Percentage of total supply
    pub share: Decimal,
}

/// Error object embedded in Ethplorer responses
#[derive(Debug, Deserialize)]
pub struct EthplorerErrorBody {
    /// Provider error code
    pub code: i64,
    /// Provider error message
    pub message: String,
}

impl EthplorerClient {
    /// Create a new Ethplorer API client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created or configuration is invalid
    pub fn new(config: EthplorerConfig) -> Result<Self, EthplorerError> {
        let api_key = NonEmptyString::new(config.api_key.as_str())
            .map_err(|_| EthplorerError::Config("API key cannot be empty".to_string()))?;

        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(EthplorerError::Config(
                "Base URL cannot be empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("token-supply-api/0.1.0")
            .build()
            .map_err(EthplorerError::Http)?;

        Ok(Self {
            client,
            base_url,
            api_key,
            config,
        })
    }

    /// Fetch the top holders of `token`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed
    pub async fn get_top_token_holders(
        &self,
        token: Address,
        limit: usize,
    ) -> Result<Vec<EthplorerHolder>, EthplorerError> {
        let url = format!("{}/getTopTokenHolders/{token}", self.base_url);
        let limit = limit.clamp(1, MAX_HOLDER_LIMIT);

        debug!(url, limit, "fetching top token holders from Ethplorer");

        let request = self
            .client
            .get(&url)
            .query(&[
                ("apiKey", self.api_key.as_str()),
                ("limit", &limit.to_string()),
            ])
            .header("accept", "application/json");

        let response = timeout(
            Duration::from_secs(self.config.timeout_seconds),
            request.send(),
        )
        .await
        .map_err(|_| EthplorerError::Timeout {
            seconds: self.config.timeout_seconds,
        })?
        .map_err(EthplorerError::Http)?;

        let status = response.status();
        match status {
            StatusCode::TOO_MANY_REQUESTS => return Err(EthplorerError::RateLimited),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(EthplorerError::Unauthorized);
            }
            _ => {}
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str::<EthplorerTopHoldersResponse>(&body);

        if !status.is_success() {
            // Ethplorer reports most failures as an error object, prefer it
            if let Ok(EthplorerTopHoldersResponse {
                error: Some(error), ..
            }) = parsed
            {
                return Err(EthplorerError::Provider {
                    code: error.code,
                    message: error.message,
                });
            }
            warn!(status = status.as_u16(), "Ethplorer API error");
            return Err(EthplorerError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed = parsed?;
        if let Some(error) = parsed.error {
            return Err(EthplorerError::Provider {
                code: error.code,
                message: error.message,
            });
        }

        let holders = parsed.holders.ok_or(EthplorerError::MissingHolders)?;
        debug!(count = holders.len(), %token, "received top holders");
        Ok(holders)
    }
}

impl ApiClient for EthplorerClient {
    async fn health_check(&self) -> Result<HealthStatus, ApiError> {
        let url = format!("{}/getLastBlock", self.base_url);

        debug!(url, "performing health check on Ethplorer API");

        let request = self
            .client
            .get(&url)
            .query(&[("apiKey", self.api_key.as_str())]);

        let start_time = Instant::now();
        let response = timeout(
            Duration::from_secs(self.config.health_check_timeout_seconds),
            request.send(),
        )
        .await
        .map_err(|_| EthplorerError::Timeout {
            seconds: self.config.health_check_timeout_seconds,
        })?
        .map_err(EthplorerError::Http)?;

        let response_time = start_time.elapsed();

        match response.status() {
            StatusCode::OK => {
                info!("Ethplorer API health check passed in {:?}", response_time);
                Ok(HealthStatus::Up)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                warn!("Ethplorer API health check failed: unauthorized");
                Ok(HealthStatus::Down {
                    reason: "Authentication failed".to_string(),
                })
            }
            StatusCode::TOO_MANY_REQUESTS => {
                warn!("Ethplorer API health check failed: rate limited");
                Ok(HealthStatus::Degraded {
                    reason: "Rate limited".to_string(),
                })
            }
            status => {
                warn!("Ethplorer API health check failed with status: {}", status);
                Ok(HealthStatus::Degraded {
                    reason: format!("API returned status {}", status.as_u16()),
                })
            }
        }
    }

    fn name(&self) -> &'static str {
        "ethplorer"
    }
}

impl HolderListProvider for EthplorerClient {
    async fn top_holders(&self, token: Address, limit: usize) -> Result<Vec<TopHolder>, ApiError> {
        let holders = self.get_top_token_holders(token, limit).await?;
        Ok(holders
            .into_iter()
            .map(|holder| TopHolder::new(holder.address, holder.share))
            .collect())
    }
}
