// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Token descriptor resolution
//!
//! Resolution reads the token's labels and precision, then walks the total
//! supply accessors in [`SupplyMethod::FALLBACK_ORDER`] until one answers.
//! Label and precision failures are absorbed with defaults; only a malformed
//! address or an exhausted accessor chain is reported to the caller.

use alloy_primitives::{Address, Bytes, U256};
use api_client::{ApiError, ContractReader};
use shared_types::SupplyMethod;
use tracing::{debug, info, instrument, warn};

use crate::{
    abi,
    error::{SupplyError, SupplyResult},
    types::TokenDescriptor,
};

/// Label used when `name()` or `symbol()` cannot be read
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Parse a token identifier into an address
///
/// Accepts 40 hex digits with an optional `0x` prefix. Mixed-case input must
/// carry a valid EIP-55 checksum.
pub fn parse_token_address(input: &str) -> SupplyResult<Address> {
    let trimmed = input.trim();
    let hex = trimmed.strip_prefix("0x").unwrap_or(trimmed);

    let has_lower = hex.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = hex.chars().any(|c| c.is_ascii_uppercase());

    let parsed = if has_lower && has_upper {
        Address::parse_checksummed(format!("0x{hex}"), None).ok()
    } else {
        hex.parse::<Address>().ok()
    };

    parsed
        .filter(|_| hex.len() == 40)
        .ok_or_else(|| SupplyError::invalid_address(trimmed))
}

/// Resolves token metadata and total supply through a [`ContractReader`]
#[derive(Debug, Clone)]
pub struct TokenDescriptorResolver<R> {
    reader: R,
    default_decimals: u8,
}

impl<R: ContractReader> TokenDescriptorResolver<R> {
    /// Create a resolver that falls back to `default_decimals`
    pub fn new(reader: R, default_decimals: u8) -> Self {
        Self {
            reader,
            default_decimals,
        }
    }

    /// Resolve a token identifier into a [`TokenDescriptor`]
    ///
    /// # Errors
    ///
    /// Returns [`SupplyError::InvalidAddress`] before any contract call when the
    /// identifier is malformed, and [`SupplyError::SupplyUnavailable`] when every
    /// total supply accessor fails.
    #[instrument(skip(self))]
    pub async fn resolve(&self, token: &str) -> SupplyResult<TokenDescriptor> {
        let address = parse_token_address(token)?;

        let (name, symbol, decimals) = tokio::join!(
            self.read_label(address, "name", abi::name_calldata()),
            self.read_label(address, "symbol", abi::symbol_calldata()),
            self.read_decimals(address),
        );

        let (total_supply_method, total_supply) = self.discover_total_supply(address).await?;

        if total_supply.is_zero() {
            warn!(%address, method = %total_supply_method, "token reports a total supply of zero");
        }

        Ok(TokenDescriptor {
            address,
            name,
            symbol,
            decimals,
            total_supply,
            total_supply_method,
        })
    }

    async fn discover_total_supply(
        &self,
        address: Address,
    ) -> SupplyResult<(SupplyMethod, U256)> {
        let mut attempts = Vec::with_capacity(SupplyMethod::FALLBACK_ORDER.len());

        for method in SupplyMethod::FALLBACK_ORDER {
            debug!(
                %address,
                strategy = method.strategy_number(),
                method = %method,
                "trying total supply accessor"
            );

            let outcome = self
                .reader
                .call(address, abi::supply_calldata(method))
                .await
                .and_then(|data| {
                    abi::decode_uint256(&data).map_err(|e| ApiError::InvalidResponse {
                        message: e.to_string(),
                    })
                });

            match outcome {
                Ok(total_supply) => {
                    info!(%address, method = %method, %total_supply, "resolved total supply");
                    return Ok((method, total_supply));
                }
                Err(e) => {
                    warn!(%address, method = %method, error = %e, "total supply accessor failed");
                    attempts.push(format!("{method}: {e}"));
                }
            }
        }

        Err(SupplyError::SupplyUnavailable {
            address: address.to_string(),
            attempts,
        })
    }

    async fn read_label(&self, address: Address, field: &'static str, calldata: Bytes) -> String {
        match self.reader.call(address, calldata).await {
            Ok(data) => abi::decode_label(&data).unwrap_or_else(|| {
                warn!(%address, field, "could not decode token label");
                UNKNOWN_LABEL.to_string()
            }),
            Err(e) => {
                warn!(%address, field, error = %e, "token label call failed");
                UNKNOWN_LABEL.to_string()
            }
        }
    }

    async fn read_decimals(&self, address: Address) -> u8 {
        match self.reader.call(address, abi::decimals_calldata()).await {
            Ok(data) => abi::decode_decimals(&data).unwrap_or_else(|| {
                warn!(%address, default = self.default_decimals, "unusable decimals, using default");
                self.default_decimals
            }),
            Err(e) => {
                warn!(
                    %address,
                    error = %e,
                    default = self.default_decimals,
                    "decimals call failed, using default"
                );
                self.default_decimals
            }
        }
    }
}
