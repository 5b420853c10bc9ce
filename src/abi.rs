// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Minimal contract ABI helpers for the anchor read.
//!
//! The anchor getter takes no arguments and returns a single `bytes32`, so call
//! data is just the 4-byte selector and the return data is exactly one word.

use crate::error::{KernelError, KernelResult};
use crate::fingerprint::{keccak256, strip_hex_prefix, Fingerprint};

/// First four bytes of the Keccak-256 of a function signature.
pub fn function_selector(signature: &str) -> [u8; 4] {
    let digest = keccak256(signature.as_bytes());
    [digest[0], digest[1], digest[2], digest[3]]
}

/// Hex call data (`0x` + selector) for a parameterless call.
pub fn encode_call(signature: &str) -> String {
    format!("0x{}", hex::encode(function_selector(signature)))
}

/// Decodes the hex return data of a `view returns (bytes32)` call.
pub fn decode_bytes32(result: &str) -> KernelResult<Fingerprint> {
    let raw = strip_hex_prefix(result.trim());
    if raw.len() != 64 {
        return Err(KernelError::InvalidCallResult(format!(
            "expected 32-byte word, found {} hex digits",
            raw.len()
        )));
    }
    raw.parse().map_err(|e: KernelError| KernelError::InvalidCallResult(e.to_string()))
}

/// Checks that an address is `0x` followed by 40 hex digits.
pub fn validate_address(address: &str) -> KernelResult<()> {
    let raw = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .ok_or_else(|| KernelError::InvalidAddress(address.to_string()))?;
    if raw.len() != 40 || !raw.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(KernelError::InvalidAddress(address.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_matches_known_erc20_selector() {
        // Well-known selector of `totalSupply()`.
        assert_eq!(encode_call("totalSupply()"), "0x18160ddd");
    }

    #[test]
    fn test_anchor_selector_is_stable() {
        let a = function_selector(crate::config::ANCHOR_FUNCTION_SIGNATURE);
        let b = function_selector("CORE_AXIOM_HASH()");
        assert_eq!(a, b);
        assert_eq!(encode_call("CORE_AXIOM_HASH()").len(), 10);
    }

    #[test]
    fn test_decode_word() {
        let word = format!("0x{}", "Ab".repeat(32));
        let fp = decode_bytes32(&word).unwrap();
        assert_eq!(fp.0, [0xab; 32]);
    }

    #[test]
    fn test_decode_rejects_empty_and_long_results() {
        // Calls against an address without code return "0x".
        assert!(matches!(decode_bytes32("0x"), Err(KernelError::InvalidCallResult(_))));
        let long = format!("0x{}", "00".repeat(64));
        assert!(decode_bytes32(&long).is_err());
    }

    #[test]
    fn test_address_validation() {
        assert!(validate_address("0x5FbDB2315678afecb367f032d93F642f64180aa3").is_ok());
        assert!(validate_address("5FbDB2315678afecb367f032d93F642f64180aa3").is_err());
        assert!(validate_address("0x1234").is_err());
        assert!(validate_address("").is_err());
    }
}
