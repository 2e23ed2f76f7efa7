// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Provider registry for the supply data collaborators
//!
//! This module owns one client per collaborator role and reports their health
//! together. Clients are cheap to clone, so the supply engine receives clones
//! of the same clients the registry monitors.

use std::collections::HashMap;

use api_client::{ApiClient, HealthStatus};
use thiserror::Error;
use tracing::debug;

use crate::{
    EthplorerClient, EthplorerConfig, EthplorerError, EtherscanClient, EtherscanConfig,
    EtherscanError, JsonRpcClient, RpcConfig, RpcError,
};

/// Registry holding the RPC, holder-list and transfer-history clients
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    rpc_client: JsonRpcClient,
    holder_client: EthplorerClient,
    transfer_client: EtherscanClient,
}

/// Error type for registry construction
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The JSON-RPC client could not be created
    #[error("failed to create RPC client: {0}")]
    Rpc(#[from] RpcError),

    /// The Ethplorer client could not be created
    #[error("failed to create Ethplorer client: {0}")]
    Ethplorer(#[from] EthplorerError),

    /// The Etherscan client could not be created
    #[error("failed to create Etherscan client: {0}")]
    Etherscan(#[from] EtherscanError),
}

impl ProviderRegistry {
    /// Create a registry from already constructed clients
    pub fn with_clients(
        rpc_client: JsonRpcClient,
        holder_client: EthplorerClient,
        transfer_client: EtherscanClient,
    ) -> Self {
        Self {
            rpc_client,
            holder_client,
            transfer_client,
        }
    }

    /// Build every client from its configuration
    ///
    /// # Errors
    ///
    /// Returns the first client construction failure
    pub fn from_configs(
        rpc: RpcConfig,
        ethplorer: EthplorerConfig,
        etherscan: EtherscanConfig,
    ) -> Result<Self, RegistryError> {
        Ok(Self::with_clients(
            JsonRpcClient::new(rpc)?,
            EthplorerClient::new(ethplorer)?,
            EtherscanClient::new(etherscan)?,
        ))
    }

    /// Client used for contract reads
    pub fn rpc_client(&self) -> &JsonRpcClient {
        &self.rpc_client
    }

    /// Client used for top-holder snapshots
    pub fn holder_client(&self) -> &EthplorerClient {
        &self.holder_client
    }

    /// Client used for transfer history
    pub fn transfer_client(&self) -> &EtherscanClient {
        &self.transfer_client
    }

    /// Get the overall health status of all registered clients
    ///
    /// Health checks are performed concurrently.
    pub async fn get_overall_health(&self) -> HashMap<String, HealthStatus> {
        let (rpc, holders, transfers) = tokio::join!(
            Self::check(&self.rpc_client),
            Self::check(&self.holder_client),
            Self::check(&self.transfer_client),
        );

        HashMap::from([rpc, holders, transfers])
    }

    async fn check<C: ApiClient>(client: &C) -> (String, HealthStatus) {
        let status = match client.health_check().await {
            Ok(status) => status,
            Err(e) => HealthStatus::Down {
                reason: format!("Health check failed: {e}"),
            },
        };
        debug!(client = client.name(), ?status, "health check finished");
        (client.name().to_string(), status)
    }

    /// Get the names of all registered clients
    pub fn client_names(&self) -> Vec<&'static str> {
        vec![
            self.rpc_client.name(),
            self.holder_client.name(),
            self.transfer_client.name(),
        ]
    }
}
