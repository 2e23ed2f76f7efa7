// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for supply resolution
//!
//! Only token resolution can fail outward. Estimation degrades to a fully
//! circulating result instead of returning an error.

use thiserror::Error;

/// Result type alias for supply operations
pub type SupplyResult<T> = Result<T, SupplyError>;

/// Errors surfaced by [`crate::TokenDescriptorResolver`]
#[derive(Debug, Error)]
pub enum SupplyError {
    /// The token identifier is not a valid chain address
    #[error("Invalid token address: {input}")]
    InvalidAddress { input: String },

    /// Every total supply accessor failed
    #[error("Unable to determine total supply for {address} (tried {})", .attempts.join(", "))]
    SupplyUnavailable {
        address: String,
        /// One entry per failed accessor, `signature: cause`
        attempts: Vec<String>,
    },
}

impl SupplyError {
    /// Create an invalid address error
    pub fn invalid_address<T: ToString>(input: T) -> Self {
        Self::InvalidAddress {
            input: input.to_string(),
        }
    }

    /// Whether the caller supplied a malformed token identifier
    pub fn is_invalid_address(&self) -> bool {
        matches!(self, Self::InvalidAddress { .. })
    }
}
