// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Request-scoped supply models
//!
//! Every value here is built for a single request and discarded afterwards.
//! Quantities are raw base units; percentages are shares of total supply.

use std::collections::BTreeMap;

use alloy_primitives::{Address, U256};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_with::{DisplayFromStr, serde_as};
use shared_types::{HolderClass, SupplyMethod};

use crate::units::{
    circulating_percentage, format_units, round_percentage, serialize_percentage,
};

/// Canonical description of a token, resolved from its contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenDescriptor {
    /// Contract address
    pub address: Address,
    /// `name()`, or `"Unknown"` when the call failed
    pub name: String,
    /// `symbol()`, or `"Unknown"` when the call failed
    pub symbol: String,
    /// `decimals()`, or the configured default
    pub decimals: u8,
    /// Total supply in base units
    pub total_supply: U256,
    /// Accessor that produced `total_supply`
    pub total_supply_method: SupplyMethod,
}

impl TokenDescriptor {
    /// Total supply scaled by `decimals`
    pub fn formatted_total_supply(&self) -> String {
        format_units(self.total_supply, self.decimals)
    }

    /// Render any amount of this token scaled by `decimals`
    pub fn format(&self, amount: U256) -> String {
        format_units(amount, self.decimals)
    }
}

/// One sampled top holder after classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolderRecord {
    /// Holder address
    pub address: Address,
    /// Provider-reported share of total supply, 0 to 100
    pub share_percent: Decimal,
    /// `floor(share_percent * total_supply / 100)`
    pub estimated_quantity: U256,
    /// Outcome of the transfer-history classifier
    pub classification: HolderClass,
}

/// A non-circulating holder as reported in a breakdown
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HolderShare {
    /// Holder address
    #[serde_as(as = "DisplayFromStr")]
    pub address: Address,
    /// Estimated raw balance
    #[serde_as(as = "DisplayFromStr")]
    pub quantity: U256,
    /// Provider-reported share of total supply
    #[serde(with = "rust_decimal::serde::float")]
    pub percentage: Decimal,
}

impl From<&HolderRecord> for HolderShare {
    fn from(record: &HolderRecord) -> Self {
        Self {
            address: record.address,
            quantity: record.estimated_quantity,
            percentage: record.share_percent,
        }
    }
}

/// Holders sharing one non-circulating classification
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassBreakdown {
    /// Holders in this classification, in sampling order
    pub addresses: Vec<HolderShare>,
    /// Sum of the holders' estimated quantities
    #[serde_as(as = "DisplayFromStr")]
    pub total_quantity: U256,
    /// Sum of the holders' shares
    #[serde(serialize_with = "serialize_percentage")]
    pub total_percentage: Decimal,
}

impl ClassBreakdown {
    fn push(&mut self, record: &HolderRecord) {
        self.addresses.push(HolderShare::from(record));
        self.total_quantity = self
            .total_quantity
            .saturating_add(record.estimated_quantity);
        self.total_percentage += record.share_percent;
    }
}

/// Result of circulating supply estimation
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyBreakdown {
    /// Total supply minus every non-circulating quantity
    #[serde_as(as = "DisplayFromStr")]
    pub circulating_supply: U256,
    /// Share of total supply that circulates, two decimal places
    #[serde(serialize_with = "serialize_percentage")]
    pub circulating_percentage: Decimal,
    /// Non-circulating holders grouped by classification
    pub non_circulating_breakdown: BTreeMap<HolderClass, ClassBreakdown>,
    /// Every sampled holder, in rank order
    #[serde(skip)]
    pub holders: Vec<HolderRecord>,
    /// Set when estimation fell back to the fully circulating default
    #[serde(skip)]
    pub degraded: bool,
}

impl SupplyBreakdown {
    /// Breakdown that treats the whole supply as circulating
    pub fn fully_circulating(total_supply: U256) -> Self {
        Self {
            circulating_supply: total_supply,
            circulating_percentage: round_percentage(Decimal::ONE_HUNDRED),
            non_circulating_breakdown: BTreeMap::new(),
            holders: Vec::new(),
            degraded: false,
        }
    }

    /// The fully circulating default used when estimation fails
    pub fn fallback(total_supply: U256) -> Self {
        Self {
            degraded: true,
            ..Self::fully_circulating(total_supply)
        }
    }

    /// Aggregate classified holders into a breakdown
    ///
    /// Only [`HolderClass::is_non_circulating`] holders are subtracted. Sums
    /// use integer and decimal accumulators, so the result does not depend on
    /// holder order.
    pub fn aggregate(total_supply: U256, holders: Vec<HolderRecord>) -> Self {
        let mut breakdown: BTreeMap<HolderClass, ClassBreakdown> = BTreeMap::new();
        for record in holders
            .iter()
            .filter(|record| record.classification.is_non_circulating())
        {
            breakdown
                .entry(record.classification)
                .or_default()
                .push(record);
        }

        let non_circulating = breakdown
            .values()
            .fold(U256::ZERO, |sum, class| sum.saturating_add(class.total_quantity));

        Self {
            circulating_supply: total_supply.saturating_sub(non_circulating),
            circulating_percentage: circulating_percentage(non_circulating, total_supply),
            non_circulating_breakdown: breakdown,
            holders,
            degraded: false,
        }
    }

    /// Sum of every non-circulating group
    pub fn non_circulating_supply(&self, total_supply: U256) -> U256 {
        total_supply.saturating_sub(self.circulating_supply)
    }

    /// `100 - circulating_percentage`, two decimal places
    pub fn non_circulating_percentage(&self) -> Decimal {
        round_percentage(Decimal::ONE_HUNDRED - self.circulating_percentage)
    }

    /// Number of sampled holders per classification
    pub fn classification_counts(&self) -> BTreeMap<HolderClass, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.holders {
            *counts.entry(record.classification).or_insert(0) += 1;
        }
        counts
    }

    /// Whether every sampled holder was classified from real history
    pub fn is_conclusive(&self) -> bool {
        !self
            .holders
            .iter()
            .any(|record| record.classification.is_inconclusive())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::units::estimate_quantity;

    fn record(byte: u8, share: Decimal, total: U256, classification: HolderClass) -> HolderRecord {
        HolderRecord {
            address: Address::repeat_byte(byte),
            share_percent: share,
            estimated_quantity: estimate_quantity(share, total),
            classification,
        }
    }

    #[test]
    fn fully_circulating_shape() {
        let breakdown = SupplyBreakdown::fully_circulating(U256::from(1000u64));
        assert_eq!(breakdown.circulating_supply, U256::from(1000u64));
        assert_eq!(breakdown.circulating_percentage.to_string(), "100.00");
        assert!(breakdown.non_circulating_breakdown.is_empty());
        assert!(!breakdown.degraded);
        assert!(SupplyBreakdown::fallback(U256::from(1000u64)).degraded);
    }

    #[test]
    fn aggregate_subtracts_only_non_circulating() {
        let total = U256::from(1_000_000u64);
        let holders = vec![
            record(0x01, dec!(10), total, HolderClass::Burn),
            record(0x02, dec!(5.5), total, HolderClass::TreasuryTeam),
            record(0x03, dec!(4.5), total, HolderClass::TreasuryTeam),
            record(0x04, dec!(3), total, HolderClass::LockVesting),
            record(0x05, dec!(20), total, HolderClass::Unknown),
            record(0x06, dec!(2), total, HolderClass::NoTransactions),
            record(0x07, dec!(1), total, HolderClass::Error),
        ];

        let breakdown = SupplyBreakdown::aggregate(total, holders);

        assert_eq!(breakdown.circulating_supply, U256::from(770_000u64));
        assert_eq!(breakdown.circulating_percentage, dec!(77.00));
        assert_eq!(breakdown.non_circulating_percentage().to_string(), "23.00");
        assert_eq!(
            breakdown.non_circulating_supply(total),
            U256::from(230_000u64)
        );

        let keys: Vec<HolderClass> = breakdown.non_circulating_breakdown.keys().copied().collect();
        assert_eq!(
            keys,
            vec![
                HolderClass::Burn,
                HolderClass::TreasuryTeam,
                HolderClass::LockVesting
            ]
        );

        let treasury = &breakdown.non_circulating_breakdown[&HolderClass::TreasuryTeam];
        assert_eq!(treasury.addresses.len(), 2);
        assert_eq!(treasury.total_quantity, U256::from(100_000u64));
        assert_eq!(treasury.total_percentage, dec!(10.0));
        assert!(!breakdown.is_conclusive());
    }

    #[test]
    fn aggregate_conserves_total_supply() {
        let total = U256::from(10u64).pow(U256::from(26u64)) + U256::from(7u64);
        let holders = vec![
            record(0x01, dec!(12.3456789), total, HolderClass::Burn),
            record(0x02, dec!(0.0001), total, HolderClass::LockVesting),
            record(0x03, dec!(33.3333333), total, HolderClass::TreasuryTeam),
        ];

        let breakdown = SupplyBreakdown::aggregate(total, holders);
        let subtracted = breakdown
            .non_circulating_breakdown
            .values()
            .fold(U256::ZERO, |sum, class| sum + class.total_quantity);

        assert!(breakdown.is_conclusive());
        assert_eq!(breakdown.circulating_supply + subtracted, total);
    }

    #[test]
    fn aggregate_saturates_when_shares_exceed_total() {
        let total = U256::from(100u64);
        let holders = vec![
            record(0x01, dec!(80), total, HolderClass::Burn),
            record(0x02, dec!(80), total, HolderClass::LockVesting),
        ];

        let breakdown = SupplyBreakdown::aggregate(total, holders);
        assert_eq!(breakdown.circulating_supply, U256::ZERO);
        assert_eq!(breakdown.circulating_percentage.to_string(), "0.00");
    }

    #[test]
    fn classification_counts_include_circulating_holders() {
        let total = U256::from(100u64);
        let breakdown = SupplyBreakdown::aggregate(
            total,
            vec![
                record(0x01, dec!(1), total, HolderClass::Unknown),
                record(0x02, dec!(1), total, HolderClass::Unknown),
                record(0x03, dec!(1), total, HolderClass::Burn),
            ],
        );

        let counts = breakdown.classification_counts();
        assert_eq!(counts[&HolderClass::Unknown], 2);
        assert_eq!(counts[&HolderClass::Burn], 1);
        assert!(!counts.contains_key(&HolderClass::Error));
    }

    #[test]
    fn breakdown_wire_format() {
        let total = U256::from(1000u64);
        let breakdown = SupplyBreakdown::aggregate(
            total,
            vec![record(0x00, dec!(12.5), total, HolderClass::Burn)],
        );

        let value = serde_json::to_value(&breakdown).unwrap();
        assert_eq!(value["circulatingSupply"], "875");
        assert_eq!(value["circulatingPercentage"], "87.50");
        let burn = &value["nonCirculatingBreakdown"]["BURN"];
        assert_eq!(burn["totalQuantity"], "125");
        assert_eq!(burn["totalPercentage"], "12.50");
        assert_eq!(
            burn["addresses"][0]["address"],
            "0x0000000000000000000000000000000000000000"
        );
        assert_eq!(burn["addresses"][0]["quantity"], "125");
        assert_eq!(burn["addresses"][0]["percentage"], 12.5);
        assert!(value.get("holders").is_none());
    }

    #[test]
    fn token_descriptor_formatting() {
        let descriptor = TokenDescriptor {
            address: Address::repeat_byte(0x42),
            name: "Test".to_string(),
            symbol: "TST".to_string(),
            decimals: 18,
            total_supply: U256::from(500u64) * U256::from(10u64).pow(U256::from(18u64)),
            total_supply_method: SupplyMethod::TotalSupply,
        };
        assert_eq!(descriptor.formatted_total_supply(), "500.0");
        assert_eq!(descriptor.format(U256::from(10u64).pow(U256::from(17u64))), "0.1");
    }
}
