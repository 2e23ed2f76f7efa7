// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Response bodies of the supply endpoints

use std::collections::BTreeMap;

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::Serialize;
use shared_types::HolderClass;
use supply_engine::{ClassBreakdown, SupplyBreakdown, TokenDescriptor};
use tracing::error;
use utoipa::ToSchema;

/// JSON body rendered with two-space indentation
#[derive(Debug)]
pub struct PrettyJson<T>(pub T);

impl<T: Serialize> IntoResponse for PrettyJson<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec_pretty(&self.0) {
            Ok(body) => (
                [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
                body,
            )
                .into_response(),
            Err(e) => {
                error!(error = %e, "failed to serialize response body");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server Error").into_response()
            }
        }
    }
}

fn percent_of_total(value: Decimal) -> String {
    format!("{value:.2}%")
}

/// Token identity shared by every JSON response
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenSummary {
    /// Checksummed contract address
    #[schema(example = "0xf4A509313437dfC64E2EFeD14e2b607B1AED30c5")]
    pub address: String,
    /// Token name, `Unknown` when unreadable
    pub name: String,
    /// Token symbol, `Unknown` when unreadable
    pub symbol: String,
    /// Token precision
    #[schema(example = 18)]
    pub decimals: u8,
}

impl From<&TokenDescriptor> for TokenSummary {
    fn from(descriptor: &TokenDescriptor) -> Self {
        Self {
            address: descriptor.address.to_string(),
            name: descriptor.name.clone(),
            symbol: descriptor.symbol.clone(),
            decimals: descriptor.decimals,
        }
    }
}

/// A quantity in base units and in whole tokens
#[derive(Debug, Serialize, ToSchema)]
pub struct SupplyAmount {
    /// Base-unit integer
    #[schema(example = "1000000000000000000000")]
    pub raw: String,
    /// Decimal rendering
    #[schema(example = "1000.0")]
    pub formatted: String,
}

impl SupplyAmount {
    fn new(descriptor: &TokenDescriptor, amount: alloy_primitives::U256) -> Self {
        Self {
            raw: amount.to_string(),
            formatted: descriptor.format(amount),
        }
    }
}

/// Body of `/api/total-supply`
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TotalSupplyResponse {
    #[serde(flatten)]
    #[schema(inline)]
    token: TokenSummary,
    /// Total supply of the token
    total_supply: SupplyAmount,
}

impl TotalSupplyResponse {
    /// Build the body for a resolved token
    pub fn new(descriptor: &TokenDescriptor) -> Self {
        Self {
            token: descriptor.into(),
            total_supply: SupplyAmount::new(descriptor, descriptor.total_supply),
        }
    }
}

/// Circulating quantity as reported by `/api/circulating-supply`
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CirculatingAmount {
    /// Base-unit integer
    pub raw: String,
    /// Decimal rendering
    pub formatted_supply: String,
}

/// Body of `/api/circulating-supply`
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CirculatingSupplyResponse {
    #[serde(flatten)]
    #[schema(inline)]
    token: TokenSummary,
    /// Circulating supply of the token
    circulating_supply: CirculatingAmount,
}

impl CirculatingSupplyResponse {
    /// Build the body for a resolved token and its circulating quantity
    pub fn new(descriptor: &TokenDescriptor, circulating: alloy_primitives::U256) -> Self {
        Self {
            token: descriptor.into(),
            circulating_supply: CirculatingAmount {
                raw: circulating.to_string(),
                formatted_supply: descriptor.format(circulating),
            },
        }
    }
}

/// A quantity together with its share of total supply
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplyShare {
    /// Base-unit integer
    pub raw: String,
    /// Decimal rendering
    pub formatted: String,
    /// Share of total supply, e.g. `55.00%`
    #[schema(example = "55.00%")]
    pub percent_of_total: String,
}

/// Non-circulating groups keyed by classification
#[derive(Debug, Serialize, ToSchema)]
pub struct NonCirculatingGroups {
    /// Holders per non-circulating classification
    #[schema(value_type = Object)]
    pub breakdown: BTreeMap<HolderClass, ClassBreakdown>,
}

/// Non-circulating total, its share and its groups
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NonCirculatingSupply {
    /// Base-unit integer
    pub raw: String,
    /// Decimal rendering
    pub formatted: String,
    /// Share of total supply
    pub percent_of_total: String,
    /// Holders per non-circulating classification
    #[schema(value_type = Object)]
    pub breakdown: BTreeMap<HolderClass, ClassBreakdown>,
}

/// Body of `/api/token-info`
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfoResponse {
    #[serde(flatten)]
    #[schema(inline)]
    token: TokenSummary,
    /// Total supply of the token
    total_supply: SupplyAmount,
    /// Present when `calculate=true`
    #[serde(skip_serializing_if = "Option::is_none")]
    circulating_supply: Option<SupplyShare>,
    /// Present when `calculate=true`
    #[serde(skip_serializing_if = "Option::is_none")]
    non_circulating_supply: Option<NonCirculatingGroups>,
}

impl TokenInfoResponse {
    /// Build the body, with the estimate when one was computed
    pub fn new(descriptor: &TokenDescriptor, breakdown: Option<SupplyBreakdown>) -> Self {
        let (circulating_supply, non_circulating_supply) = match breakdown {
            Some(breakdown) => (
                Some(SupplyShare {
                    raw: breakdown.circulating_supply.to_string(),
                    formatted: descriptor.format(breakdown.circulating_supply),
                    percent_of_total: percent_of_total(breakdown.circulating_percentage),
                }),
                Some(NonCirculatingGroups {
                    breakdown: breakdown.non_circulating_breakdown,
                }),
            ),
            None => (None, None),
        };

        Self {
            token: descriptor.into(),
            total_supply: SupplyAmount::new(descriptor, descriptor.total_supply),
            circulating_supply,
            non_circulating_supply,
        }
    }
}

/// Body of `/api/circulating-calculation`
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CirculatingCalculationResponse {
    #[serde(flatten)]
    #[schema(inline)]
    token: TokenSummary,
    /// Total supply of the token
    total_supply: SupplyAmount,
    /// Estimated circulating supply
    circulating_supply: SupplyShare,
    /// Estimated non-circulating supply
    non_circulating_supply: NonCirculatingSupply,
}

impl CirculatingCalculationResponse {
    /// Build the body from a resolved token and its estimate
    pub fn new(descriptor: &TokenDescriptor, breakdown: SupplyBreakdown) -> Self {
        let non_circulating = breakdown.non_circulating_supply(descriptor.total_supply);

        Self {
            token: descriptor.into(),
            total_supply: SupplyAmount::new(descriptor, descriptor.total_supply),
            circulating_supply: SupplyShare {
                raw: breakdown.circulating_supply.to_string(),
                formatted: descriptor.format(breakdown.circulating_supply),
                percent_of_total: percent_of_total(breakdown.circulating_percentage),
            },
            non_circulating_supply: NonCirculatingSupply {
                raw: non_circulating.to_string(),
                formatted: descriptor.format(non_circulating),
                percent_of_total: percent_of_total(breakdown.non_circulating_percentage()),
                breakdown: breakdown.non_circulating_breakdown,
            },
        }
    }
}
