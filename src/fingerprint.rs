// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Keccak-256 fingerprints of the axiom configuration.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};

use crate::axioms::AxiomConfiguration;
use crate::canonical::canonical_serialization;
use crate::error::KernelError;

/// A 256-bit digest, either computed locally or read from the ledger.
///
/// Displays and serializes as lowercase `0x`-prefixed hex. Parsing accepts any
/// hex case, with or without the prefix.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Fingerprint(pub [u8; 32]);

impl Fingerprint {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.to_hex())
    }
}

impl FromStr for Fingerprint {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = strip_hex_prefix(s.trim());
        let bytes = hex::decode(raw).map_err(|e| KernelError::InvalidHash(format!("{}: {}", s, e)))?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|b: Vec<u8>| KernelError::InvalidHash(format!("expected 32 bytes, found {}", b.len())))?;
        Ok(Self(arr))
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Fingerprint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

pub(crate) fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s)
}

/// Keccak-256 with the original Keccak padding (the ledger's native hash),
/// not the NIST SHA3-256 variant.
pub fn keccak256(bytes: &[u8]) -> [u8; 32] {
    Keccak256::digest(bytes).into()
}

/// Computes the local fingerprint of a configuration.
///
/// Pure: the result depends only on the weight values and their order.
pub fn compute_fingerprint(config: &AxiomConfiguration) -> Fingerprint {
    let encoded = canonical_serialization(config);
    Fingerprint(keccak256(encoded.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak_known_vector() {
        // Keccak-256 of the empty string.
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_hex_parsing_is_case_insensitive() {
        let lower: Fingerprint = format!("0x{}", "ab".repeat(32)).parse().unwrap();
        let upper: Fingerprint = format!("0X{}", "AB".repeat(32)).parse().unwrap();
        let bare: Fingerprint = "aB".repeat(32).parse().unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower, bare);
        assert_eq!(upper.to_string(), format!("0x{}", "ab".repeat(32)));
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!("0x1234".parse::<Fingerprint>().is_err());
        assert!("0xzz".parse::<Fingerprint>().is_err());
    }

    #[test]
    fn test_serde_as_hex_string() {
        let fp = Fingerprint([7u8; 32]);
        let json = serde_json::to_string(&fp).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "07".repeat(32)));
        let back: Fingerprint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fp);
    }
}
