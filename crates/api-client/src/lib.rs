// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Collaborator traits for blockchain and block-explorer data providers
//!
//! This crate provides the abstractions the supply engine is written against,
//! so the engine never depends on a concrete HTTP client.
//!
//! # Core Abstractions
//!
//! - **`ApiClient` Trait**: Health check and naming shared by every provider
//! - **`ContractReader` Trait**: Read-only contract calls against a blockchain node
//! - **`HolderListProvider` Trait**: Ranked top-holder snapshots for a token
//! - **`TransferHistoryProvider` Trait**: Recent token transfers involving an address
//! - **Error Handling**: `ApiError` variants for the failure modes of HTTP providers
//!
//! All operations return `impl Future + Send`, so implementations can be used
//! behind axum handlers without boxing.

use alloy_primitives::{Address, Bytes};
use thiserror::Error;

pub mod health;
pub mod types;

pub use health::*;
pub use types::*;

/// Base trait for external API clients
pub trait ApiClient: Send + Sync {
    /// Check the health of this API client
    ///
    /// # Errors
    ///
    /// Returns an error if the health check request itself cannot be performed
    fn health_check(&self) -> impl Future<Output = Result<HealthStatus, ApiError>> + Send;

    /// Get the name/identifier of this API client
    fn name(&self) -> &'static str;
}

/// Read-only access to contract state on a blockchain node
pub trait ContractReader: ApiClient {
    /// Execute a call against `contract` with ABI-encoded `calldata` and
    /// return the raw return data
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, timeout, or when the node
    /// reports an execution error such as a revert
    fn call(
        &self,
        contract: Address,
        calldata: Bytes,
    ) -> impl Future<Output = Result<Bytes, ApiError>> + Send;
}

/// Source of ranked top-holder snapshots
pub trait HolderListProvider: ApiClient {
    /// Fetch up to `limit` holders of `token`, largest share first
    ///
    /// # Errors
    ///
    /// Returns an error if the provider is unreachable or the response is malformed
    fn top_holders(
        &self,
        token: Address,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<TopHolder>, ApiError>> + Send;
}

/// Source of token transfer history
pub trait TransferHistoryProvider: ApiClient {
    /// Fetch up to `limit` of the most recent transfers of `token` that
    /// involve `holder`, newest first
    ///
    /// # Returns
    ///
    /// * `Ok(transfers)` with an empty list when the provider knows of no transfers
    /// * `Err(error)` when the lookup itself failed
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, timeout, or malformed responses
    fn recent_transfers(
        &self,
        token: Address,
        holder: Address,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<TokenTransfer>, ApiError>> + Send;
}

/// Common errors that can occur when working with API clients
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {message}")]
    Http { message: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_seconds} seconds")]
    RateLimitExceeded { retry_after_seconds: u64 },

    /// Authentication failed
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Invalid response format
    #[error("Invalid response format: {message}")]
    InvalidResponse { message: String },

    /// Service unavailable
    #[error("Service unavailable: {message}")]
    ServiceUnavailable { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Network timeout
    #[error("Request timeout after {timeout_seconds} seconds")]
    Timeout { timeout_seconds: u64 },

    /// Client independent error
    #[error(transparent)]
    Custom { error: anyhow::Error },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display() {
        let error = ApiError::Timeout { timeout_seconds: 5 };
        assert_eq!(error.to_string(), "Request timeout after 5 seconds");

        let error = ApiError::InvalidResponse {
            message: "missing holders".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid response format: missing holders"
        );

        let error = ApiError::Custom {
            error: anyhow::anyhow!("execution reverted"),
        };
        assert_eq!(error.to_string(), "execution reverted");
    }
}
