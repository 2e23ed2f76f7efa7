// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Routes module
//!
//! This module provides route configuration for the token supply server.

pub mod handlers;

use axum::{Router, routing::get};
use handlers::{
    circulating_calculation_handler, circulating_supply_handler, cmc_circulating_handler,
    cmc_total_handler, health_handler, not_found_handler, token_info_handler,
    total_supply_handler,
};

use crate::{
    metrics::metrics_handler,
    openapi::{openapi_spec, swagger_ui},
    state::ServerState,
};

/// Create application routes
pub fn create_routes() -> Router<ServerState> {
    let operational_routes = Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler));

    let docs_routes = Router::new()
        .route("/api-doc/openapi.json", get(openapi_spec))
        .route("/swagger-ui", get(swagger_ui));

    let supply_routes = Router::new()
        .route("/api/total-supply", get(total_supply_handler))
        .route("/api/circulating-supply", get(circulating_supply_handler))
        .route("/api/token-info", get(token_info_handler))
        .route(
            "/api/circulating-calculation",
            get(circulating_calculation_handler),
        );

    // CoinMarketCap polls these and expects bare text bodies
    let cmc_routes = Router::new()
        .route("/cmc/circulating", get(cmc_circulating_handler))
        .route("/cmc/total", get(cmc_total_handler));

    Router::new()
        .merge(operational_routes)
        .merge(docs_routes)
        .merge(supply_routes)
        .merge(cmc_routes)
        .fallback(not_found_handler)
}
