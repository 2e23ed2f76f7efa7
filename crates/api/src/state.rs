// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Server state management module
//!
//! This module provides shared application state for the token supply server:
//! configuration, the provider registry, the resolver and estimator built on
//! top of it, and the cancellation token used for coordinated shutdown.

use std::{collections::HashMap, sync::Arc, time::Instant};

use alloy_primitives::U256;
use external_apis::{EtherscanClient, EthplorerClient, JsonRpcClient, ProviderRegistry};
use serde::{Deserialize, Serialize};
use supply_engine::{
    CirculatingSupplyEstimator, ManualPercentage, SupplyBreakdown, SupplyResult, TokenDescriptor,
    TokenDescriptorResolver,
};
use tokio_util::sync::CancellationToken;
use tracing::info;
use utoipa::ToSchema;

use crate::{
    config::{Environment, ServerConfig},
    error::ServerResult,
    metrics,
};

/// Resolver reading token metadata over JSON-RPC
pub type Resolver = TokenDescriptorResolver<JsonRpcClient>;

/// Estimator backed by the holder-list and transaction-history providers
pub type Estimator = CirculatingSupplyEstimator<EthplorerClient, EtherscanClient>;

/// Shared application state with cancellation token support
#[derive(Debug, Clone)]
pub struct ServerState {
    /// Server configuration
    config: ServerConfig,
    /// Upstream provider clients
    registry: Arc<ProviderRegistry>,
    resolver: Arc<Resolver>,
    estimator: Arc<Estimator>,
    /// Cancellation token for coordinated shutdown
    pub cancellation_token: CancellationToken,
}

impl ServerState {
    /// Create new server state
    ///
    /// The resolver and estimator share the registry's clients.
    pub fn new(
        config: ServerConfig,
        registry: Arc<ProviderRegistry>,
        cancellation_token: CancellationToken,
    ) -> Self {
        let resolver =
            TokenDescriptorResolver::new(registry.rpc_client().clone(), config.token.default_decimals);
        let estimator = CirculatingSupplyEstimator::new(
            registry.holder_client().clone(),
            registry.transfer_client().clone(),
        )
        .with_lookup_concurrency(config.providers.lookup_concurrency);

        Self {
            config,
            registry,
            resolver: Arc::new(resolver),
            estimator: Arc::new(estimator),
            cancellation_token,
        }
    }

    /// Server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Upstream provider clients
    pub fn registry(&self) -> &Arc<ProviderRegistry> {
        &self.registry
    }

    /// Resolve `token`, or the configured default when it is absent or blank
    pub async fn resolve(&self, token: Option<&str>) -> SupplyResult<TokenDescriptor> {
        let token = token
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .unwrap_or(self.config.token.default_address.as_str());

        let start = Instant::now();
        let result = self.resolver.resolve(token).await;
        let label = match &result {
            Ok(_) => "success",
            Err(e) if e.is_invalid_address() => "invalid_address",
            Err(_) => "unavailable",
        };
        metrics::observe_resolution_duration(label, start.elapsed().as_secs_f64());

        result
    }

    /// Estimate the circulating supply of a resolved token
    pub async fn estimate(&self, descriptor: &TokenDescriptor) -> SupplyBreakdown {
        let start = Instant::now();
        let breakdown = self
            .estimator
            .estimate(
                descriptor.address,
                descriptor.total_supply,
                descriptor.decimals,
            )
            .await;

        let outcome = if breakdown.degraded {
            "fallback"
        } else {
            "computed"
        };
        metrics::observe_estimation_duration(outcome, start.elapsed().as_secs_f64());
        metrics::record_classifications(&breakdown.classification_counts());

        breakdown
    }

    /// Circulating supply in base units, from the manual percentage when given
    pub async fn circulating_supply(
        &self,
        descriptor: &TokenDescriptor,
        manual: Option<ManualPercentage>,
    ) -> U256 {
        match manual {
            Some(percentage) => {
                info!(token = %descriptor.address, %percentage, "using manual circulating percentage");
                percentage.apply(descriptor.total_supply)
            }
            None => self.estimate(descriptor).await.circulating_supply,
        }
    }

    /// Perform health check operations
    pub async fn health_check(&self) -> ServerResult<HealthCheck> {
        let upstream = self.registry.get_overall_health().await;
        let status = overall_status(&upstream);
        let api_clients = upstream
            .into_iter()
            .map(|(name, status)| (name, HealthStatus::from(status)))
            .collect();

        Ok(HealthCheck {
            status,
            version: Box::from(env!("CARGO_PKG_VERSION")),
            environment: self.config.environment,
            timestamp: chrono::Utc::now().to_rfc3339(),
            api_clients,
        })
    }
}

/// Degraded when any upstream provider is down, naming each one and why
fn overall_status(upstream: &HashMap<String, api_client::HealthStatus>) -> HealthStatus {
    let mut down: Vec<String> = upstream
        .iter()
        .filter(|(_, status)| status.is_down())
        .map(|(name, status)| format!("{name}: {}", status.description()))
        .collect();

    if down.is_empty() {
        return HealthStatus::Up;
    }
    down.sort();
    HealthStatus::Degraded {
        reason: down.join("; ").into_boxed_str(),
    }
}

/// Health status of a service or dependency
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum HealthStatus {
    /// Service is fully operational and responding normally
    Up,

    /// Service is not operational or has critical failures
    Down {
        /// Human-readable explanation of why the service is down
        reason: Box<str>,
    },

    /// Service is operational but experiencing performance issues or partial failures
    Degraded {
        /// Human-readable explanation of the degradation condition
        reason: Box<str>,
    },
}

impl From<api_client::HealthStatus> for HealthStatus {
    fn from(status: api_client::HealthStatus) -> Self {
        match status {
            api_client::HealthStatus::Up => Self::Up,
            api_client::HealthStatus::Degraded { reason } => Self::Degraded {
                reason: reason.into_boxed_str(),
            },
            api_client::HealthStatus::Down { reason } => Self::Down {
                reason: reason.into_boxed_str(),
            },
        }
    }
}

/// Health check status
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthCheck {
    /// Service status
    pub status: HealthStatus,
    /// Service version
    pub version: Box<str>,
    /// Environment
    pub environment: Environment,
    /// Timestamp
    pub timestamp: String,
    /// Status of individual upstream providers
    #[schema(value_type = Object)]
    pub api_clients: HashMap<String, HealthStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(config: &ServerConfig) -> Arc<ProviderRegistry> {
        Arc::new(
            ProviderRegistry::from_configs(
                config.providers.rpc.client_config(),
                config.providers.ethplorer.client_config(),
                config.providers.etherscan.client_config(),
            )
            .unwrap(),
        )
    }

    #[test]
    fn server_state_creation() {
        let config = ServerConfig::for_testing();
        let state = ServerState::new(config.clone(), registry(&config), CancellationToken::new());

        assert!(!state.cancellation_token.is_cancelled());
        assert_eq!(state.registry().client_names().len(), 3);
    }

    #[test]
    fn server_state_with_cancellation_token() {
        let config = ServerConfig::for_testing();
        let token = CancellationToken::new();
        let state = ServerState::new(config.clone(), registry(&config), token.clone());

        assert!(!state.cancellation_token.is_cancelled());

        // Test that the tokens are linked
        token.cancel();
        assert!(state.cancellation_token.is_cancelled());
    }

    #[tokio::test]
    async fn blank_token_is_rejected_before_any_call() {
        let mut config = ServerConfig::for_testing();
        config.token.default_address = "not-an-address".to_string();
        let state = ServerState::new(config.clone(), registry(&config), CancellationToken::new());

        let error = state.resolve(Some("   ")).await.unwrap_err();
        assert!(error.is_invalid_address());
        assert!(error.to_string().contains("not-an-address"));
    }

    #[test]
    fn health_status_conversion() {
        let status = HealthStatus::from(api_client::HealthStatus::Down {
            reason: "boom".to_string(),
        });
        assert_eq!(
            status,
            HealthStatus::Down {
                reason: Box::from("boom")
            }
        );
    }

    #[test]
    fn overall_status_names_down_providers() {
        let mut upstream = HashMap::from([
            ("rpc".to_string(), api_client::HealthStatus::Up),
            (
                "etherscan".to_string(),
                api_client::HealthStatus::Degraded {
                    reason: "rate limited".to_string(),
                },
            ),
        ]);
        assert_eq!(overall_status(&upstream), HealthStatus::Up);

        upstream.insert(
            "ethplorer".to_string(),
            api_client::HealthStatus::Down {
                reason: "invalid API key".to_string(),
            },
        );
        upstream.insert(
            "rpc".to_string(),
            api_client::HealthStatus::Down {
                reason: "timeout".to_string(),
            },
        );
        assert_eq!(
            overall_status(&upstream),
            HealthStatus::Degraded {
                reason: Box::from("ethplorer: invalid API key; rpc: timeout")
            }
        );
    }
}
