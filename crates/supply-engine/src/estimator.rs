// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Circulating supply estimation
//!
//! The estimator samples the largest holders of a token, classifies each one
//! from its recent transfer history, and subtracts the holdings that cannot
//! reach the market. Upstream failures never escape: a failed holder lookup
//! yields the fully circulating default and a failed history lookup marks
//! only that holder as [`HolderClass::Error`].

use alloy_primitives::{Address, U256};
use api_client::{HolderListProvider, TopHolder, TransferHistoryProvider};
use futures::future::join_all;
use shared_types::HolderClass;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    classify::{classify, is_burn_address},
    types::{HolderRecord, SupplyBreakdown},
    units::{estimate_quantity, format_units},
};

/// Holders requested from the holder-list provider
pub const MAX_HOLDERS_FETCHED: usize = 100;

/// Holders classified per estimate, ranks below this are left circulating
pub const MAX_HOLDERS_CLASSIFIED: usize = 20;

/// Transfers inspected per holder
pub const TRANSFERS_PER_HOLDER: usize = 5;

/// Estimates circulating supply from top holders and their transfer history
#[derive(Debug, Clone)]
pub struct CirculatingSupplyEstimator<H, T> {
    holders: H,
    transfers: T,
    lookup_concurrency: usize,
}

impl<H, T> CirculatingSupplyEstimator<H, T>
where
    H: HolderListProvider,
    T: TransferHistoryProvider,
{
    /// Create an estimator that looks up transfer history one holder at a time
    pub fn new(holders: H, transfers: T) -> Self {
        Self {
            holders,
            transfers,
            lookup_concurrency: 1,
        }
    }

    /// Run up to `concurrency` history lookups at once
    #[must_use]
    pub fn with_lookup_concurrency(mut self, concurrency: usize) -> Self {
        self.lookup_concurrency = concurrency.max(1);
        self
    }

    /// History lookups issued together
    pub fn lookup_concurrency(&self) -> usize {
        self.lookup_concurrency
    }

    /// Estimate the circulating supply of `token`
    ///
    /// Infallible by contract. When the holder list cannot be fetched the
    /// result is [`SupplyBreakdown::fallback`].
    #[instrument(skip(self, total_supply), fields(%total_supply))]
    pub async fn estimate(
        &self,
        token: Address,
        total_supply: U256,
        decimals: u8,
    ) -> SupplyBreakdown {
        let holders = match self.holders.top_holders(token, MAX_HOLDERS_FETCHED).await {
            Ok(holders) => holders,
            Err(e) => {
                error!(%token, error = %e, "failed to fetch top holders");
                warn!(%token, "assuming the full supply circulates");
                return SupplyBreakdown::fallback(total_supply);
            }
        };

        debug!(
            %token,
            fetched = holders.len(),
            classified = holders.len().min(MAX_HOLDERS_CLASSIFIED),
            "classifying top holders"
        );

        let sampled: Vec<TopHolder> = holders.into_iter().take(MAX_HOLDERS_CLASSIFIED).collect();
        let mut records = Vec::with_capacity(sampled.len());
        for group in sampled.chunks(self.lookup_concurrency) {
            let lookups = group
                .iter()
                .map(|holder| self.classify_holder(token, total_supply, holder));
            records.extend(join_all(lookups).await);
        }

        let breakdown = SupplyBreakdown::aggregate(total_supply, records);

        info!(
            %token,
            circulating = %format_units(breakdown.circulating_supply, decimals),
            percentage = %breakdown.circulating_percentage,
            "calculated circulating supply"
        );

        breakdown
    }

    async fn classify_holder(
        &self,
        token: Address,
        total_supply: U256,
        holder: &TopHolder,
    ) -> HolderRecord {
        let classification = if is_burn_address(holder.address) {
            HolderClass::Burn
        } else {
            match self
                .transfers
                .recent_transfers(token, holder.address, TRANSFERS_PER_HOLDER)
                .await
            {
                Ok(transfers) => classify(holder.address, &transfers),
                Err(e) => {
                    warn!(holder = %holder.address, error = %e, "transfer history lookup failed");
                    HolderClass::Error
                }
            }
        };

        debug!(holder = %holder.address, share = %holder.share, %classification, "classified holder");

        HolderRecord {
            address: holder.address,
            share_percent: holder.share,
            estimated_quantity: estimate_quantity(holder.share, total_supply),
            classification,
        }
    }
}
