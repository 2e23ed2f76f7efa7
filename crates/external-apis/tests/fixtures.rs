// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0
#![allow(missing_docs, dead_code)]

//! Provider response fixtures
//!
//! Builds the JSON bodies returned by the mocked blockchain node and block
//! explorers.

use alloy_primitives::{Address, U256, hex};
use alloy_sol_types::SolValue;
use serde_json::{Value, json};

/// JSON-RPC success envelope around ABI-encoded return data
pub fn rpc_result(data: &[u8]) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "result": hex::encode_prefixed(data),
    })
}

/// JSON-RPC success envelope returning a single `uint256`
pub fn rpc_uint(value: U256) -> Value {
    rpc_result(&value.abi_encode())
}

/// JSON-RPC success envelope returning a single `string`
pub fn rpc_string(value: &str) -> Value {
    rpc_result(&value.to_string().abi_encode())
}

/// JSON-RPC revert
pub fn rpc_revert() -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "error": { "code": 3, "message": "execution reverted" },
    })
}

/// Ethplorer `getTopTokenHolders` body
pub fn ethplorer_holders(holders: &[(Address, f64)]) -> Value {
    let holders: Vec<Value> = holders
        .iter()
        .map(|(address, share)| {
            json!({
                "address": address.to_string().to_lowercase(),
                "balance": share * 1e22,
                "share": share,
            })
        })
        .collect();
    json!({ "holders": holders })
}

/// Etherscan `tokentx` success body
pub fn etherscan_transfers(transfers: &[(Address, Address)]) -> Value {
    let result: Vec<Value> = transfers
        .iter()
        .enumerate()
        .map(|(index, (from, to))| {
            json!({
                "blockNumber": (19_000_000 + index).to_string(),
                "timeStamp": (1_700_000_000 + index).to_string(),
                "hash": format!("0x{index:064x}"),
                "from": from.to_string().to_lowercase(),
                "to": to.to_string().to_lowercase(),
                "value": "1000000000000000000",
            })
        })
        .collect();
    json!({ "status": "1", "message": "OK", "result": result })
}

/// Etherscan body for an address without transfers
pub fn etherscan_empty() -> Value {
    json!({ "status": "0", "message": "No transactions found", "result": [] })
}

/// Etherscan soft failure body
pub fn etherscan_rate_limited() -> Value {
    json!({ "status": "0", "message": "NOTOK", "result": "Max rate limit reached" })
}
