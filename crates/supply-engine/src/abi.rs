// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Calldata and return-data codecs for the token read calls

use alloy_primitives::{Bytes, FixedBytes, U256};
use alloy_sol_types::{SolCall, SolValue, sol};
use shared_types::SupplyMethod;

sol! {
    /// Read-only accessors probed on a token contract
    interface IErc20Supply {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function totalSupply() external view returns (uint256);
        function getSupply() external view returns (uint256);
        function supply() external view returns (uint256);
        function cap() external view returns (uint256);
    }
}

/// Calldata for `name()`
pub fn name_calldata() -> Bytes {
    IErc20Supply::nameCall {}.abi_encode().into()
}

/// Calldata for `symbol()`
pub fn symbol_calldata() -> Bytes {
    IErc20Supply::symbolCall {}.abi_encode().into()
}

/// Calldata for `decimals()`
pub fn decimals_calldata() -> Bytes {
    IErc20Supply::decimalsCall {}.abi_encode().into()
}

/// Calldata for one of the total supply accessors
pub fn supply_calldata(method: SupplyMethod) -> Bytes {
    match method {
        SupplyMethod::TotalSupply => IErc20Supply::totalSupplyCall {}.abi_encode(),
        SupplyMethod::GetSupply => IErc20Supply::getSupplyCall {}.abi_encode(),
        SupplyMethod::Supply => IErc20Supply::supplyCall {}.abi_encode(),
        SupplyMethod::Cap => IErc20Supply::capCall {}.abi_encode(),
    }
    .into()
}

/// Decode a `uint256` return value
pub fn decode_uint256(data: &[u8]) -> Result<U256, alloy_sol_types::Error> {
    U256::abi_decode(data)
}

/// Decode a `decimals()` return value
///
/// Some contracts declare a wider integer type, so the word is read as
/// `uint256` and rejected when it does not fit in a `u8`.
pub fn decode_decimals(data: &[u8]) -> Option<u8> {
    let value = decode_uint256(data).ok()?;
    u8::try_from(value).ok()
}

/// Decode a `string` return value, accepting legacy `bytes32` encodings
pub fn decode_label(data: &[u8]) -> Option<String> {
    if let Ok(label) = String::abi_decode(data) {
        return Some(label);
    }

    let raw = FixedBytes::<32>::abi_decode(data).ok()?;
    let end = raw.iter().rposition(|byte| *byte != 0).map_or(0, |i| i + 1);
    String::from_utf8(raw[..end].to_vec()).ok()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn selectors_match_erc20() {
        assert_eq!(name_calldata().to_string(), "0x06fdde03");
        assert_eq!(symbol_calldata().to_string(), "0x95d89b41");
        assert_eq!(decimals_calldata().to_string(), "0x313ce567");
        assert_eq!(
            supply_calldata(SupplyMethod::TotalSupply).to_string(),
            "0x18160ddd"
        );
        assert_eq!(supply_calldata(SupplyMethod::Cap).to_string(), "0x355274ea");
    }

    #[test]
    fn every_supply_method_has_distinct_calldata() {
        let calldata: HashSet<Bytes> = SupplyMethod::FALLBACK_ORDER
            .iter()
            .map(|method| supply_calldata(*method))
            .collect();
        assert_eq!(calldata.len(), 4);
        assert!(calldata.iter().all(|data| data.len() == 4));
    }

    #[test]
    fn decode_uint256_rejects_empty_return_data() {
        assert!(decode_uint256(&[]).is_err());
        let encoded = U256::from(42).abi_encode();
        assert_eq!(decode_uint256(&encoded).unwrap(), U256::from(42));
    }

    #[test]
    fn decode_decimals_out_of_range() {
        assert_eq!(decode_decimals(&U256::from(6).abi_encode()), Some(6));
        assert_eq!(decode_decimals(&U256::from(256).abi_encode()), None);
        assert_eq!(decode_decimals(&[]), None);
    }

    #[test]
    fn decode_label_string_and_bytes32() {
        let encoded = "Graph Token".to_string().abi_encode();
        assert_eq!(decode_label(&encoded).as_deref(), Some("Graph Token"));

        let mut word = [0u8; 32];
        word[..3].copy_from_slice(b"MKR");
        assert_eq!(decode_label(&word).as_deref(), Some("MKR"));

        assert_eq!(decode_label(&[]), None);
    }
}
