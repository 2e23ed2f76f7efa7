// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Blockchain node JSON-RPC integration
//!
//! This module provides an implementation of the `ContractReader` trait that
//! issues `eth_call` requests to an Ethereum JSON-RPC endpoint. Transient
//! failures (rate limiting, server errors) are retried with exponential backoff.

use std::time::{Duration, Instant};

use alloy_primitives::{Address, Bytes};
use api_client::{ApiClient, ApiError, ContractReader, HealthStatus};
use reqwest::{Client, StatusCode, header::CONTENT_TYPE};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tokio::time::timeout;
use tokio_retry::{
    Retry,
    strategy::{ExponentialBackoff, jitter},
};
use tracing::{debug, info, warn};
use url::Url;

/// Configuration for the JSON-RPC client
#[derive(Debug, Clone)]
pub struct RpcConfig {
    /// Endpoint URL of the blockchain node
    pub url: String,
    /// Request timeout in seconds, covering all retry attempts
    pub timeout_seconds: u64,
    /// Health check timeout in seconds
    pub health_check_timeout_seconds: u64,
    /// Maximum number of retry attempts after the first request
    pub max_retries: usize,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "https://eth.llamarpc.com".to_string(),
            timeout_seconds: 30,
            health_check_timeout_seconds: 5,
            max_retries: 3,
        }
    }
}

/// JSON-RPC client for read-only contract calls
#[derive(Debug, Clone)]
pub struct JsonRpcClient {
    client: Client,
    url: Url,
    config: RpcConfig,
}

/// Errors specific to the JSON-RPC client
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum RpcError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Endpoint returned a non-success HTTP status
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Node answered with a JSON-RPC error object
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// Node answered without a result or an error
    #[error("RPC response carried no result")]
    MissingResult,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Timeout error
    #[error("Request timeout")]
    Timeout { seconds: u64 },
}

impl From<RpcError> for ApiError {
    fn from(value: RpcError) -> Self {
        match value {
            RpcError::Http(error) => ApiError::Http {
                message: error.to_string(),
            },
            RpcError::Json(error) => ApiError::InvalidResponse {
                message: error.to_string(),
            },
            RpcError::MissingResult => ApiError::InvalidResponse {
                message: value.to_string(),
            },
            RpcError::ApiError { status, message } if status >= 500 => {
                ApiError::ServiceUnavailable {
                    message: format!("{status}: {message}"),
                }
            }
            RpcError::ApiError { status, message } => ApiError::Custom {
                error: anyhow::Error::msg(format!("{status}: {message}")),
            },
            RpcError::Rpc { .. } => ApiError::Custom {
                error: anyhow::Error::msg(value.to_string()),
            },
            RpcError::RateLimited => ApiError::RateLimitExceeded {
                retry_after_seconds: 1,
            },
            RpcError::Config(message) => ApiError::Configuration { message },
            RpcError::Timeout { seconds } => ApiError::Timeout {
                timeout_seconds: seconds,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a, P> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: P,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcErrorObject {
    code: i64,
    message: String,
}

/// Transaction object of an `eth_call`
#[derive(Debug, Serialize)]
struct CallRequest {
    to: Address,
    data: Bytes,
}

impl JsonRpcClient {
    /// Create a new JSON-RPC client
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client cannot be created
    pub fn new(config: RpcConfig) -> Result<Self, RpcError> {
        let url = Url::parse(config.url.trim())
            .map_err(|e| RpcError::Config(format!("invalid RPC URL {}: {e}", config.url)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("token-supply-api/0.1.0")
            .build()
            .map_err(RpcError::Http)?;

        Ok(Self {
            client,
            url,
            config,
        })
    }

    /// Execute `eth_call` against the latest block
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, times out, or the node reports
    /// an execution error
    pub async fn eth_call(&self, to: Address, data: Bytes) -> Result<Bytes, RpcError> {
        self.request(
            "eth_call",
            (CallRequest { to, data }, "latest"),
            self.config.timeout_seconds,
        )
        .await
    }

    /// Fetch the latest block number as a hex quantity
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or times out
    pub async fn block_number(&self) -> Result<String, RpcError> {
        self.request(
            "eth_blockNumber",
            Vec::<serde_json::Value>::new(),
            self.config.health_check_timeout_seconds,
        )
        .await
    }

    async fn request<P, T>(
        &self,
        method: &str,
        params: P,
        timeout_seconds: u64,
    ) -> Result<T, RpcError>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        let body = serde_json::to_vec(&JsonRpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        })?;

        debug!(url = %self.url, method, "sending JSON-RPC request");

        let response = timeout(
            Duration::from_secs(timeout_seconds),
            self.send_with_retry(method, body),
        )
        .await
        .map_err(|_| RpcError::Timeout {
            seconds: timeout_seconds,
        })??;

        match response.status() {
            StatusCode::OK => {
                let bytes = response.bytes().await?;
                let envelope: JsonRpcResponse<T> = serde_json::from_slice(&bytes)?;
                if let Some(error) = envelope.error {
                    debug!(method, code = error.code, message = %error.message, "node returned an RPC error");
                    return Err(RpcError::Rpc {
                        code: error.code,
                        message: error.message,
                    });
                }
                envelope.result.ok_or(RpcError::MissingResult)
            }
            StatusCode::TOO_MANY_REQUESTS => Err(RpcError::RateLimited),
            status => {
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                warn!(method, status = status.as_u16(), "JSON-RPC endpoint error");
                Err(RpcError::ApiError {
                    status: status.as_u16(),
                    message: error_text,
                })
            }
        }
    }

    /// Send the encoded request, retrying on retryable statuses
    async fn send_with_retry(
        &self,
        method: &str,
        body: Vec<u8>,
    ) -> Result<reqwest::Response, RpcError> {
        let retry_strategy = ExponentialBackoff::from_millis(100)
            .max_delay(Duration::from_secs(10))
            .take(self.config.max_retries)
            .map(jitter);

        Retry::spawn(retry_strategy, || {
            let body = body.clone();
            async move {
                let response = self
                    .client
                    .post(self.url.clone())
                    .header(CONTENT_TYPE, "application/json")
                    .body(body)
                    .send()
                    .await?;
                let status = response.status();

                if Self::should_retry_status(status.as_u16()) {
                    warn!(
                        method,
                        status = status.as_u16(),
                        "JSON-RPC request failed with retryable status, will retry"
                    );
                    return Err(RpcError::ApiError {
                        status: status.as_u16(),
                        message: "retryable error".to_string(),
                    });
                }

                Ok(response)
            }
        })
        .await
    }

    /// Determine if an HTTP status code should trigger a retry
    fn should_retry_status(status: u16) -> bool {
        matches!(status, 408 | 429 | 500..=599)
    }
}

impl ApiClient for JsonRpcClient {
    async fn health_check(&self) -> Result<HealthStatus, ApiError> {
        debug!(url = %self.url, "performing health check on JSON-RPC endpoint");

        let start_time = Instant::now();
        match self.block_number().await {
            Ok(block) => {
                info!(block = %block, elapsed = ?start_time.elapsed(), "JSON-RPC health check passed");
                Ok(HealthStatus::Up)
            }
            Err(RpcError::RateLimited) => {
                warn!("JSON-RPC health check failed: rate limited");
                Ok(HealthStatus::Degraded {
                    reason: "Rate limited".to_string(),
                })
            }
            Err(RpcError::Timeout { seconds }) => Err(ApiError::Timeout {
                timeout_seconds: seconds,
            }),
            Err(e) => {
                warn!(error = %e, "JSON-RPC health check failed");
                Ok(HealthStatus::Down {
                    reason: e.to_string(),
                })
            }
        }
    }

    fn name(&self) -> &'static str {
        "rpc"
    }
}

impl ContractReader for JsonRpcClient {
    async fn call(&self, contract: Address, calldata: Bytes) -> Result<Bytes, ApiError> {
        Ok(self.eth_call(contract, calldata).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation_rejects_invalid_url() {
        let config = RpcConfig {
            url: "not a url".to_string(),
            ..Default::default()
        };

        let client = JsonRpcClient::new(config);
        assert!(matches!(client, Err(RpcError::Config(_))));
    }

    #[test]
    fn should_retry_status_classification() {
        assert!(JsonRpcClient::should_retry_status(500));
        assert!(JsonRpcClient::should_retry_status(503));
        assert!(JsonRpcClient::should_retry_status(429));
        assert!(JsonRpcClient::should_retry_status(408));

        assert!(!JsonRpcClient::should_retry_status(400));
        assert!(!JsonRpcClient::should_retry_status(404));
        assert!(!JsonRpcClient::should_retry_status(200));
    }

    #[test]
    fn call_request_serialization() {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method: "eth_call",
            params: (
                CallRequest {
                    to: Address::from([0x11; 20]),
                    data: Bytes::from_static(&[0x18, 0x16, 0x0d, 0xdd]),
                },
                "latest",
            ),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["method"], "eth_call");
        assert_eq!(value["params"][0]["data"], "0x18160ddd");
        assert_eq!(value["params"][1], "latest");
    }

    #[test]
    fn rpc_error_maps_to_custom_api_error() {
        let error: ApiError = RpcError::Rpc {
            code: 3,
            message: "execution reverted".to_string(),
        }
        .into();
        assert!(matches!(error, ApiError::Custom { .. }));
        assert_eq!(error.to_string(), "RPC error 3: execution reverted");
    }
}
