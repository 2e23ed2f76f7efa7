// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Blockchain node and block-explorer integrations
//!
//! This crate provides implementations of the `api-client` collaborator traits
//! backed by real HTTP services, along with a registry that monitors them.
//!
//! # Architecture
//!
//! - **Client Implementations**: [`rpc`] (contract reads), [`ethplorer`] (top holders),
//!   [`etherscan`] (transfer history)
//! - **Registry Pattern**: [`registry::ProviderRegistry`] - owns the clients and aggregates health
//! - **Validation Utilities**: [`non_empty_string::NonEmptyString`] - non-blank credentials
//!
//! # Features
//!
//! - **Bounded Latency**: every outbound request is wrapped in a timeout
//! - **Retries**: JSON-RPC calls retry 408, 429 and 5xx responses with jittered backoff
//! - **Concurrent Health Checks**: Uses `tokio::join!` across all providers
//! - **Testing Support**: wiremock-based integration tests for every client

pub mod etherscan;
pub mod ethplorer;
pub mod non_empty_string;
pub mod registry;
pub mod rpc;

pub use etherscan::*;
pub use ethplorer::*;
pub use non_empty_string::NonEmptyString;
pub use registry::*;
pub use rpc::*;
