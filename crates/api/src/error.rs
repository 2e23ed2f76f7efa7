// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error handling module
//!
//! This module provides the error types for server operations and maps supply
//! failures onto the response shape each endpoint family uses.

use std::net::SocketAddr;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use external_apis::RegistryError;
use serde::Serialize;
use supply_engine::SupplyError;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

/// Endpoint family a supply failure happened in
///
/// Each family reports failures with its own message prefix, and the two
/// detailed endpoints answer with a JSON body instead of plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupplyContext {
    /// `/api/total-supply` and `/cmc/total`
    TotalSupply,
    /// `/api/circulating-supply` and `/cmc/circulating`
    CirculatingSupply,
    /// `/api/token-info`
    TokenInfo,
    /// `/api/circulating-calculation`
    CirculatingCalculation,
}

impl SupplyContext {
    /// Message prefix placed before the underlying failure
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::TotalSupply => "Error fetching total supply",
            Self::CirculatingSupply => "Error fetching circulating supply",
            Self::TokenInfo => "Error fetching token info",
            Self::CirculatingCalculation => "Error calculating circulating supply",
        }
    }

    /// Whether failures are reported as a JSON object
    pub const fn is_json(self) -> bool {
        matches!(self, Self::TokenInfo | Self::CirculatingCalculation)
    }
}

/// JSON failure body of `/api/token-info` and `/api/circulating-calculation`
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Always `true`
    pub error: bool,
    /// Prefixed failure message
    #[schema(example = "Error fetching token info: Invalid token address: 0x123")]
    pub message: String,
}

/// Comprehensive error types for server operations
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration validation errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Network binding errors
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        /// Socket address that failed to bind
        address: SocketAddr,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Server startup errors
    #[error("Server startup failed: {source}")]
    Startup {
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Server shutdown errors
    #[error("Server shutdown failed: {source}")]
    Shutdown {
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Task join errors for async operations
    #[error("Task join error: {source}")]
    TaskJoin {
        /// Underlying tokio join error
        #[source]
        source: tokio::task::JoinError,
    },

    /// Upstream clients could not be built
    #[error("Provider setup failed: {0}")]
    Registry(#[from] RegistryError),

    /// A token could not be resolved while serving a request
    #[error("{}: {source}", .context.prefix())]
    Supply {
        /// Endpoint family that failed
        context: SupplyContext,
        /// Underlying resolution failure
        #[source]
        source: SupplyError,
    },
}

impl ServerError {
    /// Wrap a supply failure for the given endpoint family
    pub fn supply(context: SupplyContext, source: SupplyError) -> Self {
        Self::Supply { context, source }
    }
}

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let message = self.to_string();
        error!(error = %message, "request failed");

        match &self {
            ServerError::Supply { context, .. } if context.is_json() => {
                let body = ErrorBody {
                    error: true,
                    message,
                };
                (status, Json(body)).into_response()
            }
            ServerError::Supply { .. } => (status, message).into_response(),
            _ => (
                status,
                Json(serde_json::json!({
                    "error": message,
                    "status": status.as_u16(),
                })),
            )
                .into_response(),
        }
    }
}

/// Convenient From implementations for common async error types
impl From<tokio::task::JoinError> for ServerError {
    fn from(source: tokio::task::JoinError) -> Self {
        Self::TaskJoin { source }
    }
}
