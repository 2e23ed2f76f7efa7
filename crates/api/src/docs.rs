// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! `OpenAPI` document for the token supply server

use shared_types::{HolderClass, SupplyMethod};
use utoipa::OpenApi;

use crate::{
    error::ErrorBody,
    responses::{
        CirculatingAmount, CirculatingCalculationResponse, CirculatingSupplyResponse,
        NonCirculatingGroups, NonCirculatingSupply, SupplyAmount, SupplyShare, TokenInfoResponse,
        TokenSummary, TotalSupplyResponse,
    },
    routes::handlers,
    state::{HealthCheck, HealthStatus},
};

/// Generated `OpenAPI` specification
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "Token Supply API",
        description = "Total and circulating supply of ERC-20 tokens, with CoinMarketCap compatible plain-text endpoints."
    ),
    paths(
        handlers::health_handler,
        handlers::total_supply_handler,
        handlers::circulating_supply_handler,
        handlers::token_info_handler,
        handlers::circulating_calculation_handler,
        handlers::cmc_circulating_handler,
        handlers::cmc_total_handler,
    ),
    components(schemas(
        HealthCheck,
        HealthStatus,
        ErrorBody,
        TokenSummary,
        SupplyAmount,
        CirculatingAmount,
        SupplyShare,
        NonCirculatingGroups,
        NonCirculatingSupply,
        TotalSupplyResponse,
        CirculatingSupplyResponse,
        TokenInfoResponse,
        CirculatingCalculationResponse,
        HolderClass,
        SupplyMethod,
    )),
    tags(
        (name = "health", description = "Service and provider health"),
        (name = "supply", description = "Token supply figures"),
        (name = "cmc", description = "Plain-text figures for CoinMarketCap"),
    )
)]
pub struct ApiDoc;
