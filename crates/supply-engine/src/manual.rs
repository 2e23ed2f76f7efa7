// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Caller-supplied circulating percentage

use std::{fmt, str::FromStr};

use alloy_primitives::U256;
use rust_decimal::Decimal;

use crate::units::floor_basis_points;

const BASIS_POINTS_PER_WHOLE: u64 = 10_000;

/// A circulating percentage in `[0, 100]` that replaces the estimator
///
/// The value is quantized to whole basis points before it is applied, so
/// `33.335` behaves exactly like `33.33`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManualPercentage(Decimal);

impl ManualPercentage {
    /// Parse a query-string value
    ///
    /// Anything that is not a plain decimal in range yields `None`, in which
    /// case the caller falls back to estimation.
    pub fn parse(input: &str) -> Option<Self> {
        let value = Decimal::from_str(input.trim()).ok()?;
        (Decimal::ZERO..=Decimal::ONE_HUNDRED)
            .contains(&value)
            .then_some(Self(value))
    }

    /// The percentage as supplied
    pub fn value(self) -> Decimal {
        self.0
    }

    /// `floor(percentage * 100)`
    pub fn basis_points(self) -> u32 {
        floor_basis_points(self.0)
    }

    /// `total * basis_points / 10000`
    ///
    /// Divides first when the product would not fit in 256 bits.
    pub fn apply(self, total: U256) -> U256 {
        let basis_points = U256::from(self.basis_points());
        let denominator = U256::from(BASIS_POINTS_PER_WHOLE);

        match total.checked_mul(basis_points) {
            Some(product) => product / denominator,
            None => total / denominator * basis_points,
        }
    }
}

impl fmt::Display for ManualPercentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
