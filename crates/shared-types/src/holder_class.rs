// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Holder classification types

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Classification assigned to a sampled top holder of a token
///
/// The variant order is the order in which non-circulating groups are
/// reported, so `Ord` is load-bearing for deterministic output.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
pub enum HolderClass {
    /// Known burn address, tokens are permanently removed
    #[serde(rename = "BURN")]
    Burn,
    /// Funds only flow out of the address within the sampled window
    #[serde(rename = "TREASURY/TEAM")]
    TreasuryTeam,
    /// Funds only flow into the address within the sampled window
    #[serde(rename = "LOCK/VESTING")]
    LockVesting,
    /// Mixed inbound and outbound transfers
    #[serde(rename = "UNKNOWN")]
    Unknown,
    /// The history provider reported no transfers
    #[serde(rename = "NO_TRANSACTIONS")]
    NoTransactions,
    /// The history lookup failed
    #[serde(rename = "ERROR")]
    Error,
}

impl HolderClass {
    /// Every classification, in reporting order
    pub const ALL: [Self; 6] = [
        Self::Burn,
        Self::TreasuryTeam,
        Self::LockVesting,
        Self::Unknown,
        Self::NoTransactions,
        Self::Error,
    ];

    /// Whether holdings with this classification are subtracted from circulating supply
    pub const fn is_non_circulating(self) -> bool {
        matches!(self, Self::Burn | Self::TreasuryTeam | Self::LockVesting)
    }

    /// Whether this classification came from a failed or empty history lookup
    pub const fn is_inconclusive(self) -> bool {
        matches!(self, Self::NoTransactions | Self::Error)
    }

    /// Wire label used in breakdown maps and metrics
    pub const fn label(self) -> &'static str {
        match self {
            Self::Burn => "BURN",
            Self::TreasuryTeam => "TREASURY/TEAM",
            Self::LockVesting => "LOCK/VESTING",
            Self::Unknown => "UNKNOWN",
            Self::NoTransactions => "NO_TRANSACTIONS",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for HolderClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
