// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Data returned by holder-list and transfer-history providers

use alloy_primitives::{Address, U256};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One entry of a top-holder snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopHolder {
    /// Holder address
    pub address: Address,
    /// Percentage of total supply held, 0 to 100, as reported by the provider
    pub share: Decimal,
}

impl TopHolder {
    /// Create a new holder entry
    pub fn new(address: Address, share: Decimal) -> Self {
        Self { address, share }
    }
}

/// A single token transfer involving a holder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTransfer {
    /// Transaction hash
    pub hash: String,
    /// Sender of the tokens
    pub from: Address,
    /// Recipient of the tokens
    pub to: Address,
    /// Raw amount transferred, if the provider reported a parseable value
    pub value: Option<U256>,
    /// Block the transfer was included in
    pub block_number: Option<u64>,
    /// Block timestamp
    pub timestamp: Option<DateTime<Utc>>,
}

impl TokenTransfer {
    /// Minimal transfer with only the endpoints known
    pub fn between(from: Address, to: Address) -> Self {
        Self {
            hash: String::new(),
            from,
            to,
            value: None,
            block_number: None,
            timestamp: None,
        }
    }

    /// Whether `address` sent this transfer
    pub fn is_sent_by(&self, address: Address) -> bool {
        self.from == address
    }

    /// Whether `address` received this transfer
    pub fn is_received_by(&self, address: Address) -> bool {
        self.to == address
    }
}
