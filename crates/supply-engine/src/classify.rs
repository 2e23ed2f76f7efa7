// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Holder classification heuristics

use alloy_primitives::{Address, address};
use api_client::TokenTransfer;
use shared_types::HolderClass;

/// Addresses with no known private key, used as token sinks
pub const BURN_ADDRESSES: [Address; 4] = [
    Address::ZERO,
    address!("0x000000000000000000000000000000000000dead"),
    address!("0xdead000000000000000042069420694206942069"),
    address!("0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee"),
];

/// Whether `address` is a known burn address
pub fn is_burn_address(address: Address) -> bool {
    BURN_ADDRESSES.contains(&address)
}

/// Classify a non-burn holder from its most recent transfers
///
/// Returns [`HolderClass::NoTransactions`] for an empty sample. Failed lookups
/// never reach this function; the caller records them as
/// [`HolderClass::Error`].
pub fn classify(holder: Address, transfers: &[TokenTransfer]) -> HolderClass {
    if transfers.is_empty() {
        HolderClass::NoTransactions
    } else if transfers.iter().all(|transfer| transfer.is_sent_by(holder)) {
        HolderClass::TreasuryTeam
    } else if transfers
        .iter()
        .all(|transfer| transfer.is_received_by(holder))
    {
        HolderClass::LockVesting
    } else {
        HolderClass::Unknown
    }
}
