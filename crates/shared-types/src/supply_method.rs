// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Total supply entry points
//!
//! Token contracts do not agree on how total supply is exposed. This module
//! names the candidate accessors and fixes the order in which they are tried.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Contract accessor that produced a token's total supply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum SupplyMethod {
    /// Standard ERC-20 `totalSupply()`
    #[serde(rename = "totalSupply()")]
    TotalSupply,
    /// Alternate `getSupply()` accessor
    #[serde(rename = "getSupply()")]
    GetSupply,
    /// Alternate bare `supply()` accessor
    #[serde(rename = "supply()")]
    Supply,
    /// `cap()` accessor of capped-supply designs
    #[serde(rename = "cap()")]
    Cap,
}

impl SupplyMethod {
    /// Discovery order, first success wins
    pub const FALLBACK_ORDER: [Self; 4] = [
        Self::TotalSupply,
        Self::GetSupply,
        Self::Supply,
        Self::Cap,
    ];

    /// Solidity signature of the accessor
    pub const fn signature(self) -> &'static str {
        match self {
            Self::TotalSupply => "totalSupply()",
            Self::GetSupply => "getSupply()",
            Self::Supply => "supply()",
            Self::Cap => "cap()",
        }
    }

    /// Position in the fallback chain, starting at 1
    pub const fn strategy_number(self) -> u8 {
        match self {
            Self::TotalSupply => 1,
            Self::GetSupply => 2,
            Self::Supply => 3,
            Self::Cap => 4,
        }
    }
}

impl fmt::Display for SupplyMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.signature())
    }
}
