// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Server configuration module
//!
//! This module provides configuration structures and logic for the token supply
//! server, supporting different environments and validation of configuration
//! parameters. Configuration is loaded once at start-up and passed down
//! immutably.

use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    time::Duration,
};

use anyhow::{Result, anyhow, ensure};
use config::{Config, ConfigError, Environment as ConfigEnv, File};
use external_apis::{EtherscanConfig, EthplorerConfig, RpcConfig};
use serde::{Deserialize, Deserializer, Serialize, de};
use supply_engine::parse_token_address;
use utoipa::ToSchema;

use crate::error::{ServerError, ServerResult};

/// Token served when a request carries no `token` parameter
pub const DEFAULT_TOKEN_ADDRESS: &str = "0xf4A509313437dfC64E2EFeD14e2b607B1AED30c5";

const DEFAULT_RPC_URL: &str = "https://eth.llamarpc.com";
const DEFAULT_ETHPLORER_URL: &str = "https://api.ethplorer.io";
const DEFAULT_ETHPLORER_KEY: &str = "freekey";
const DEFAULT_ETHERSCAN_URL: &str = "https://api.etherscan.io/v2/api";

/// Legacy environment variables and the configuration keys they override
const LEGACY_OVERRIDES: [(&str, &str); 5] = [
    ("PORT", "port"),
    ("RPC_URL", "providers.rpc.url"),
    ("DEFAULT_TOKEN", "token.default_address"),
    ("TOKEN_DECIMALS", "token.default_decimals"),
    ("ETHERSCAN_API_KEY", "providers.etherscan.api_key"),
];

/// A validated server port that ensures the value is appropriate for the environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServerPort {
    port: u16,
    environment: Environment,
}

impl ServerPort {
    /// Create a new `ServerPort`, ensuring it's valid for the given environment
    ///
    /// # Errors
    ///
    /// Returns an error if the port is 0 in non-testing environments
    pub fn new(port: u16, environment: Environment) -> Result<Self> {
        if port == 0 && environment != Environment::Testing {
            return Err(anyhow!("port cannot be 0 in non-testing environments"));
        }
        Ok(Self { port, environment })
    }

    /// Default port for development
    pub const fn default_development() -> Self {
        Self {
            port: 3000,
            environment: Environment::Development,
        }
    }

    /// Testing port (port 0)
    pub const fn testing() -> Self {
        Self {
            port: 0,
            environment: Environment::Testing,
        }
    }

    /// Get the port value
    pub fn value(&self) -> u16 {
        self.port
    }
}

impl<'de> Deserialize<'de> for ServerPort {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let port = u16::deserialize(deserializer)?;
        // Re-validated in `ServerConfig::load` once the environment is known
        Ok(Self {
            port,
            environment: Environment::Development,
        })
    }
}

/// A validated timeout duration in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeoutSeconds(Duration);

impl TimeoutSeconds {
    /// Create a new `TimeoutSeconds`, ensuring the value is within valid bounds
    ///
    /// # Errors
    ///
    /// Returns an error if timeout is 0 or greater than 300 seconds
    pub fn new(seconds: u64) -> Result<Self> {
        ensure!(seconds != 0, "timeout must be greater than 0");
        ensure!(seconds <= 300, "timeout cannot exceed 300");
        Ok(Self(Duration::from_secs(seconds)))
    }

    /// Default timeout (30 seconds)
    pub const fn default_value() -> Self {
        Self(Duration::from_secs(30))
    }

    /// Testing timeout (5 seconds)
    pub const fn testing() -> Self {
        Self(Duration::from_secs(5))
    }

    /// Get the timeout value
    pub fn value(&self) -> Duration {
        self.0
    }

    /// Get the timeout value in whole seconds
    pub fn as_secs(&self) -> u64 {
        self.0.as_secs()
    }
}

impl<'de> Deserialize<'de> for TimeoutSeconds {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let seconds = u64::deserialize(deserializer)?;
        Self::new(seconds).map_err(|e| de::Error::custom(e.to_string()))
    }
}

impl Default for TimeoutSeconds {
    fn default() -> Self {
        Self::default_value()
    }
}

/// Environment types for configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Production environment
    Production,
    /// Development environment
    Development,
    /// Testing environment
    Testing,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Production => write!(f, "production"),
            Environment::Development => write!(f, "development"),
            Environment::Testing => write!(f, "testing"),
        }
    }
}

/// Token defaults applied to requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Token resolved when a request names none
    pub default_address: String,
    /// Precision used when a token does not expose `decimals()`
    pub default_decimals: u8,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            default_address: DEFAULT_TOKEN_ADDRESS.to_string(),
            default_decimals: 18,
        }
    }
}

/// Blockchain node settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcSettings {
    /// JSON-RPC endpoint URL
    pub url: String,
    /// Per-call timeout
    pub timeout_seconds: TimeoutSeconds,
    /// Retries after a 408, 429 or 5xx answer
    pub max_retries: usize,
}

impl Default for RpcSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_RPC_URL.to_string(),
            timeout_seconds: TimeoutSeconds::default(),
            max_retries: 3,
        }
    }
}

impl RpcSettings {
    /// Client configuration for [`external_apis::JsonRpcClient`]
    pub fn client_config(&self) -> RpcConfig {
        RpcConfig {
            url: self.url.clone(),
            timeout_seconds: self.timeout_seconds.as_secs(),
            max_retries: self.max_retries,
            ..RpcConfig::default()
        }
    }
}

/// Holder-list provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EthplorerSettings {
    /// API base URL
    pub base_url: String,
    /// API key
    #[serde(skip_serializing)]
    pub api_key: String,
    /// Per-request timeout
    pub timeout_seconds: TimeoutSeconds,
}

impl Default for EthplorerSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ETHPLORER_URL.to_string(),
            api_key: DEFAULT_ETHPLORER_KEY.to_string(),
            timeout_seconds: TimeoutSeconds::default(),
        }
    }
}

impl EthplorerSettings {
    /// Client configuration for [`external_apis::EthplorerClient`]
    pub fn client_config(&self) -> EthplorerConfig {
        EthplorerConfig {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            timeout_seconds: self.timeout_seconds.as_secs(),
            ..EthplorerConfig::default()
        }
    }
}

/// Transaction-history provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EtherscanSettings {
    /// API base URL
    pub base_url: String,
    /// API key, optional
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Chain queried through the multichain endpoint
    pub chain_id: u64,
    /// Per-request timeout
    pub timeout_seconds: TimeoutSeconds,
}

impl Default for EtherscanSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ETHERSCAN_URL.to_string(),
            api_key: None,
            chain_id: 1,
            timeout_seconds: TimeoutSeconds::default(),
        }
    }
}

impl EtherscanSettings {
    /// Client configuration for [`external_apis::EtherscanClient`]
    pub fn client_config(&self) -> EtherscanConfig {
        EtherscanConfig {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            chain_id: self.chain_id,
            timeout_seconds: self.timeout_seconds.as_secs(),
            ..EtherscanConfig::default()
        }
    }
}

/// Upstream data providers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// Blockchain node
    pub rpc: RpcSettings,
    /// Holder-list provider
    pub ethplorer: EthplorerSettings,
    /// Transaction-history provider
    pub etherscan: EtherscanSettings,
    /// Transfer-history lookups issued together per estimate
    pub lookup_concurrency: usize,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            rpc: RpcSettings::default(),
            ethplorer: EthplorerSettings::default(),
            etherscan: EtherscanSettings::default(),
            lookup_concurrency: 1,
        }
    }
}

/// Server configuration for different environments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: IpAddr,
    /// Server port (validated for environment compatibility)
    pub port: ServerPort,
    /// Request timeout in seconds (validated range: 1-300)
    pub timeout_seconds: TimeoutSeconds,
    /// Environment type
    pub environment: Environment,
    /// Token defaults
    pub token: TokenConfig,
    /// Upstream providers
    pub providers: ProvidersConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: ServerPort::default_development(),
            timeout_seconds: TimeoutSeconds::default(),
            environment: Environment::Development,
            token: TokenConfig::default(),
            providers: ProvidersConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Create configuration from environment variables and optional configuration files
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Config` if configuration is invalid or cannot be loaded.
    pub fn from_env() -> ServerResult<Self> {
        Self::load().map_err(|e| ServerError::Config {
            message: format!("failed to load configuration: {e}"),
        })
    }

    /// Load configuration using the config crate with hierarchical sources
    ///
    /// Configuration is loaded in the following order (later sources override earlier ones):
    /// 1. Default values
    /// 2. Configuration file (config.json)
    /// 3. Environment-specific files (config.{env}.json)
    /// 4. Environment variables with `SERVER_` prefix, `__` between nested keys
    /// 5. `PORT`, `RPC_URL`, `DEFAULT_TOKEN`, `TOKEN_DECIMALS` and `ETHERSCAN_API_KEY`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let env_var = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let mut config_builder = Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 3000)?
            .set_default("timeout_seconds", 30)?
            .set_default("environment", "development")?
            .set_default("token.default_address", DEFAULT_TOKEN_ADDRESS)?
            .set_default("token.default_decimals", 18)?
            .set_default("providers.rpc.url", DEFAULT_RPC_URL)?
            .set_default("providers.rpc.timeout_seconds", 30)?
            .set_default("providers.rpc.max_retries", 3)?
            .set_default("providers.ethplorer.base_url", DEFAULT_ETHPLORER_URL)?
            .set_default("providers.ethplorer.api_key", DEFAULT_ETHPLORER_KEY)?
            .set_default("providers.ethplorer.timeout_seconds", 30)?
            .set_default("providers.etherscan.base_url", DEFAULT_ETHERSCAN_URL)?
            .set_default("providers.etherscan.chain_id", 1)?
            .set_default("providers.etherscan.timeout_seconds", 30)?
            .set_default("providers.lookup_concurrency", 1)?
            .add_source(File::with_name("config.json").required(false))
            .add_source(
                File::with_name(&format!("config.{}.json", env_var.to_lowercase())).required(false),
            )
            .add_source(
                ConfigEnv::with_prefix("SERVER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        for (variable, key) in LEGACY_OVERRIDES {
            config_builder = config_builder.set_override_option(key, std::env::var(variable).ok())?;
        }

        if std::env::var("ENVIRONMENT").is_ok() {
            config_builder = config_builder.set_override("environment", env_var.to_lowercase())?;
        }

        let config = config_builder.build()?;
        let mut server_config: Self = config.try_deserialize()?;

        // Fix the ServerPort to have the correct environment context
        server_config.port = ServerPort::new(server_config.port.value(), server_config.environment)
            .map_err(|e| ConfigError::Message(format!("invalid port configuration: {e}")))?;

        server_config.validate().map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(server_config)
    }

    /// Check values that cannot be expressed in the field types
    ///
    /// # Errors
    ///
    /// Returns an error if the default token is not a valid address or the
    /// lookup concurrency is zero.
    pub fn validate(&self) -> Result<()> {
        parse_token_address(&self.token.default_address)
            .map_err(|e| anyhow!("invalid default token: {e}"))?;
        ensure!(
            self.providers.lookup_concurrency > 0,
            "lookup_concurrency must be at least 1"
        );
        Ok(())
    }

    /// Create configuration optimized for testing
    pub fn for_testing() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: ServerPort::testing(), // let OS choose available port
            timeout_seconds: TimeoutSeconds::testing(),
            environment: Environment::Testing,
            token: TokenConfig::default(),
            providers: ProvidersConfig {
                rpc: RpcSettings {
                    timeout_seconds: TimeoutSeconds::testing(),
                    max_retries: 0,
                    ..RpcSettings::default()
                },
                ethplorer: EthplorerSettings {
                    timeout_seconds: TimeoutSeconds::testing(),
                    ..EthplorerSettings::default()
                },
                etherscan: EtherscanSettings {
                    timeout_seconds: TimeoutSeconds::testing(),
                    ..EtherscanSettings::default()
                },
                lookup_concurrency: 1,
            },
        }
    }

    /// Get socket address for binding
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port.value())
    }
}
