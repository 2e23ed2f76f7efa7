// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP request handlers module
//!
//! This module provides the supply endpoints, the CoinMarketCap plain-text
//! variants, and the health check.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use supply_engine::ManualPercentage;
use tracing::{debug, instrument};
use utoipa::IntoParams;

use crate::{
    error::{ErrorBody, ServerError, SupplyContext},
    metrics,
    responses::{
        CirculatingCalculationResponse, CirculatingSupplyResponse, PrettyJson, TokenInfoResponse,
        TotalSupplyResponse,
    },
    state::{HealthCheck, ServerState},
};

/// Query parameters accepted by the supply endpoints
///
/// Values are taken as raw strings so that malformed input never rejects the
/// request: an unusable `percentage` falls back to estimation and any
/// `calculate` other than `true` is off.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SupplyQuery {
    /// Token contract address, the configured default when omitted
    #[param(example = "0xf4A509313437dfC64E2EFeD14e2b607B1AED30c5")]
    pub token: Option<String>,
    /// Manual circulating percentage in `[0, 100]`
    #[param(example = "42.5")]
    pub percentage: Option<String>,
    /// `true` to include the circulating estimate in `/api/token-info`
    #[param(example = "true")]
    pub calculate: Option<String>,
}

impl SupplyQuery {
    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn manual_percentage(&self) -> Option<ManualPercentage> {
        let raw = self.percentage.as_deref()?;
        let parsed = ManualPercentage::parse(raw);
        if parsed.is_none() {
            debug!(percentage = raw, "ignoring unusable manual percentage");
        }
        parsed
    }

    fn calculate(&self) -> bool {
        self.calculate.as_deref() == Some("true")
    }
}

/// Health check endpoint handler
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    summary = "Health check endpoint",
    description = "Returns the current health status of the service including version, environment information, and status of the RPC, holder-list and transaction-history providers.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthCheck),
        (status = 503, description = "Service unavailable", body = String)
    )
)]
pub async fn health_handler(
    State(state): State<ServerState>,
) -> Result<impl IntoResponse, ServerError> {
    let health = state.health_check().await?;
    Ok(Json(health))
}

/// Total supply of a token
#[utoipa::path(
    get,
    path = "/api/total-supply",
    tag = "supply",
    params(SupplyQuery),
    responses(
        (status = 200, description = "Token descriptor with total supply", body = TotalSupplyResponse),
        (status = 500, description = "Token could not be resolved", body = String, content_type = "text/plain")
    )
)]
#[instrument(skip(state))]
pub async fn total_supply_handler(
    State(state): State<ServerState>,
    Query(query): Query<SupplyQuery>,
) -> Result<PrettyJson<TotalSupplyResponse>, ServerError> {
    metrics::inc_requests("total_supply");

    let descriptor = state
        .resolve(query.token())
        .await
        .map_err(|e| ServerError::supply(SupplyContext::TotalSupply, e))?;

    Ok(PrettyJson(TotalSupplyResponse::new(&descriptor)))
}

/// Circulating supply of a token
#[utoipa::path(
    get,
    path = "/api/circulating-supply",
    tag = "supply",
    params(SupplyQuery),
    responses(
        (status = 200, description = "Token descriptor with circulating supply", body = CirculatingSupplyResponse),
        (status = 500, description = "Token could not be resolved", body = String, content_type = "text/plain")
    )
)]
#[instrument(skip(state))]
pub async fn circulating_supply_handler(
    State(state): State<ServerState>,
    Query(query): Query<SupplyQuery>,
) -> Result<PrettyJson<CirculatingSupplyResponse>, ServerError> {
    metrics::inc_requests("circulating_supply");

    let descriptor = state
        .resolve(query.token())
        .await
        .map_err(|e| ServerError::supply(SupplyContext::CirculatingSupply, e))?;
    let circulating = state
        .circulating_supply(&descriptor, query.manual_percentage())
        .await;

    Ok(PrettyJson(CirculatingSupplyResponse::new(
        &descriptor,
        circulating,
    )))
}

/// Token descriptor, optionally with the circulating estimate
#[utoipa::path(
    get,
    path = "/api/token-info",
    tag = "supply",
    params(SupplyQuery),
    responses(
        (status = 200, description = "Token descriptor", body = TokenInfoResponse),
        (status = 500, description = "Token could not be resolved", body = ErrorBody)
    )
)]
#[instrument(skip(state))]
pub async fn token_info_handler(
    State(state): State<ServerState>,
    Query(query): Query<SupplyQuery>,
) -> Result<PrettyJson<TokenInfoResponse>, ServerError> {
    metrics::inc_requests("token_info");

    let descriptor = state
        .resolve(query.token())
        .await
        .map_err(|e| ServerError::supply(SupplyContext::TokenInfo, e))?;

    let breakdown = if query.calculate() {
        Some(state.estimate(&descriptor).await)
    } else {
        None
    };

    Ok(PrettyJson(TokenInfoResponse::new(&descriptor, breakdown)))
}

/// Full circulating supply calculation with the non-circulating breakdown
#[utoipa::path(
    get,
    path = "/api/circulating-calculation",
    tag = "supply",
    params(SupplyQuery),
    responses(
        (status = 200, description = "Circulating and non-circulating supply", body = CirculatingCalculationResponse),
        (status = 500, description = "Token could not be resolved", body = ErrorBody)
    )
)]
#[instrument(skip(state))]
pub async fn circulating_calculation_handler(
    State(state): State<ServerState>,
    Query(query): Query<SupplyQuery>,
) -> Result<PrettyJson<CirculatingCalculationResponse>, ServerError> {
    metrics::inc_requests("circulating_calculation");

    let descriptor = state
        .resolve(query.token())
        .await
        .map_err(|e| ServerError::supply(SupplyContext::CirculatingCalculation, e))?;
    let breakdown = state.estimate(&descriptor).await;

    Ok(PrettyJson(CirculatingCalculationResponse::new(
        &descriptor,
        breakdown,
    )))
}

/// Circulating supply in base units, as plain text
#[utoipa::path(
    get,
    path = "/cmc/circulating",
    tag = "cmc",
    params(SupplyQuery),
    responses(
        (status = 200, description = "Base-unit integer", body = String, content_type = "text/plain"),
        (status = 500, description = "Token could not be resolved", body = String, content_type = "text/plain")
    )
)]
#[instrument(skip(state))]
pub async fn cmc_circulating_handler(
    State(state): State<ServerState>,
    Query(query): Query<SupplyQuery>,
) -> Result<String, ServerError> {
    metrics::inc_requests("cmc_circulating");

    let descriptor = state
        .resolve(query.token())
        .await
        .map_err(|e| ServerError::supply(SupplyContext::CirculatingSupply, e))?;
    let circulating = state
        .circulating_supply(&descriptor, query.manual_percentage())
        .await;

    Ok(circulating.to_string())
}

/// Total supply in whole tokens, as plain text
#[utoipa::path(
    get,
    path = "/cmc/total",
    tag = "cmc",
    params(SupplyQuery),
    responses(
        (status = 200, description = "Decimal rendering of total supply", body = String, content_type = "text/plain"),
        (status = 500, description = "Token could not be resolved", body = String, content_type = "text/plain")
    )
)]
#[instrument(skip(state))]
pub async fn cmc_total_handler(
    State(state): State<ServerState>,
    Query(query): Query<SupplyQuery>,
) -> Result<String, ServerError> {
    metrics::inc_requests("cmc_total");

    let descriptor = state
        .resolve(query.token())
        .await
        .map_err(|e| ServerError::supply(SupplyContext::TotalSupply, e))?;

    Ok(descriptor.formatted_total_supply())
}

/// Fallback for unknown routes
pub async fn not_found_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn query(percentage: Option<&str>, calculate: Option<&str>) -> SupplyQuery {
        SupplyQuery {
            token: None,
            percentage: percentage.map(str::to_string),
            calculate: calculate.map(str::to_string),
        }
    }

    #[test]
    fn manual_percentage_parsing() {
        assert_eq!(
            query(Some("42.5"), None).manual_percentage().map(ManualPercentage::value),
            Some(Decimal::new(425, 1))
        );
        assert!(query(Some("150"), None).manual_percentage().is_none());
        assert!(query(Some("abc"), None).manual_percentage().is_none());
        assert!(query(None, None).manual_percentage().is_none());
    }

    #[test]
    fn calculate_flag_is_exact() {
        assert!(query(None, Some("true")).calculate());
        assert!(!query(None, Some("TRUE")).calculate());
        assert!(!query(None, Some("1")).calculate());
        assert!(!query(None, None).calculate());
    }
}
