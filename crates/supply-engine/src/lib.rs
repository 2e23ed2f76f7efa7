// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Total and circulating supply computation for ERC-20 tokens
//!
//! This crate holds the decision logic of the service. It talks to the outside
//! world only through the collaborator traits of `api-client`, so every
//! component can be driven by in-memory fakes in tests.
//!
//! # Architecture
//!
//! - [`resolver`]: [`TokenDescriptorResolver`], which reads token labels and
//!   discovers total supply through an ordered accessor fallback chain
//! - [`estimator`]: [`CirculatingSupplyEstimator`], which samples top holders,
//!   classifies them and aggregates a [`SupplyBreakdown`]
//! - [`classify`]: the pure holder classification heuristics
//! - [`manual`]: [`ManualPercentage`], the caller-supplied override
//! - [`units`]: fixed-point formatting and percentage arithmetic
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use external_apis::{EtherscanClient, EthplorerClient, JsonRpcClient};
//! use supply_engine::{CirculatingSupplyEstimator, TokenDescriptorResolver};
//!
//! # async fn example(
//! #     rpc: JsonRpcClient,
//! #     holders: EthplorerClient,
//! #     transfers: EtherscanClient,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = TokenDescriptorResolver::new(rpc, 18);
//! let estimator = CirculatingSupplyEstimator::new(holders, transfers);
//!
//! let token = resolver
//!     .resolve("0xc944E90C64B2c07662A292be6244BDf05Cda44a7")
//!     .await?;
//! let breakdown = estimator
//!     .estimate(token.address, token.total_supply, token.decimals)
//!     .await;
//!
//! println!("{} circulating", token.format(breakdown.circulating_supply));
//! # Ok(())
//! # }
//! ```

pub mod abi;
pub mod classify;
pub mod error;
pub mod estimator;
pub mod manual;
pub mod resolver;
pub mod types;
pub mod units;

pub use classify::{BURN_ADDRESSES, classify, is_burn_address};
pub use error::{SupplyError, SupplyResult};
pub use estimator::{
    CirculatingSupplyEstimator, MAX_HOLDERS_CLASSIFIED, MAX_HOLDERS_FETCHED, TRANSFERS_PER_HOLDER,
};
pub use manual::ManualPercentage;
pub use resolver::{TokenDescriptorResolver, UNKNOWN_LABEL, parse_token_address};
pub use types::{ClassBreakdown, HolderRecord, HolderShare, SupplyBreakdown, TokenDescriptor};
pub use units::format_units;
