// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Token Supply API Server Implementation
//!
//! This crate provides the HTTP server for the token supply service, built with
//! Axum. It reports total and circulating supply of ERC-20 tokens as JSON and as
//! the bare-text figures CoinMarketCap polls for.
//!
//! # Module Structure
//!
//! - [`config`]: Server configuration and environment management with hierarchical loading
//! - [`error`]: Error types and the per-endpoint failure bodies
//! - [`state`]: Shared application state wiring the resolver and estimator to the providers
//! - [`server`]: Main server implementation, lifecycle, and coordinated shutdown
//! - [`routes`]: Route configuration and HTTP request handlers
//! - [`responses`]: JSON bodies of the supply endpoints
//! - [`metrics`]: Prometheus counters and histograms
//! - [`openapi`]: `OpenAPI` specification and Swagger UI endpoints for API documentation
//!
//! # Key Features
//!
//! - **Supply Discovery**: Reads `totalSupply()` and its alternates over JSON-RPC
//! - **Circulating Estimates**: Classifies top holders from their recent transfers
//! - **Graceful Shutdown**: Coordinated termination using `CancellationToken` with timeouts
//! - **Health Monitoring**: Aggregated health checks across every upstream provider

pub mod config;
pub mod docs;
pub mod error;
pub mod metrics;
pub mod openapi;
pub mod responses;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{Environment, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use server::{Server, ShutdownConfig};
pub use state::{HealthCheck, ServerState};
