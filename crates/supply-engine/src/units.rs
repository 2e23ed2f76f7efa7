// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Fixed-point helpers for token quantities and percentages
//!
//! Quantities stay in `U256` base units and percentages in `Decimal`; no value
//! passes through floating point on its way to a response.

use alloy_primitives::U256;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::Serializer;

/// Precision, in decimal places, of intermediate percentage arithmetic
const PERCENT_SCALE: u32 = 8;

/// Render `value` base units with `decimals` places
///
/// Trailing fractional zeros are trimmed, but at least one fractional digit is
/// kept (`500.0`). With zero decimals only the integer part is printed.
pub fn format_units(value: U256, decimals: u8) -> String {
    let digits = value.to_string();
    if decimals == 0 {
        return digits;
    }

    let decimals = usize::from(decimals);
    let padded = if digits.len() <= decimals {
        format!("{}{digits}", "0".repeat(decimals + 1 - digits.len()))
    } else {
        digits
    };

    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        format!("{whole}.0")
    } else {
        format!("{whole}.{fraction}")
    }
}

/// `floor(share * total / 100)` in integer arithmetic
///
/// Negative shares yield zero.
pub fn estimate_quantity(share: Decimal, total: U256) -> U256 {
    if share.is_sign_negative() || share.is_zero() {
        return U256::ZERO;
    }

    let mantissa = U256::from(share.mantissa().unsigned_abs());
    let divisor = U256::from(100u64) * U256::from(10u64).pow(U256::from(share.scale()));

    match total.checked_mul(mantissa) {
        Some(product) => product / divisor,
        None => (total / divisor).saturating_mul(mantissa),
    }
}

/// Percentage of `total` that remains after removing `non_circulating`
///
/// Computed at 10^-8 precision and rounded to two places, half away from
/// zero. A zero total is reported as fully circulating.
pub fn circulating_percentage(non_circulating: U256, total: U256) -> Decimal {
    if total.is_zero() {
        return round_percentage(Decimal::ONE_HUNDRED);
    }

    let (mut part, mut whole) = (non_circulating.min(total), total);
    let scale = U256::from(100u64) * U256::from(10u64).pow(U256::from(PERCENT_SCALE));

    let scaled = loop {
        if let Some(product) = part.checked_mul(scale) {
            break product / whole;
        }
        part /= U256::from(10u64);
        whole /= U256::from(10u64);
    };

    let removed = i64::try_from(scaled)
        .map_or(Decimal::ONE_HUNDRED, |units| Decimal::new(units, PERCENT_SCALE));

    round_percentage(Decimal::ONE_HUNDRED - removed)
}

/// Round to two places, half away from zero, keeping both places
pub fn round_percentage(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Serialize a percentage as a two-place string
pub fn serialize_percentage<S: Serializer>(
    value: &Decimal,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&round_percentage(*value))
}

/// Floor a percentage to whole basis points
pub(crate) fn floor_basis_points(percentage: Decimal) -> u32 {
    (percentage * Decimal::ONE_HUNDRED)
        .floor()
        .to_u32()
        .unwrap_or_default()
}
