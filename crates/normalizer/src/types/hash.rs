// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 256-bit hash (transaction hash, message hash, state hash, account id part).
///
/// This provides a single source of truth for how hashes are formatted in
/// serialized entities: 64 lowercase hex characters, no prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Bits256(pub [u8; 32]);

impl Bits256 {
    /// Get the hash as bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl From<[u8; 32]> for Bits256 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Bits256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for Bits256 {
    type Err = String;

    /// Parse from hex string (with or without "0x" prefix)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex_str = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(hex_str).map_err(|e| e.to_string())?;

        if bytes.len() != 32 {
            return Err(format!("Expected 32 bytes, got {}", bytes.len()));
        }

        let mut hash_bytes = [0u8; 32];
        hash_bytes.copy_from_slice(&bytes);
        Ok(Bits256(hash_bytes))
    }
}

impl Serialize for Bits256 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Bits256 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits256_display() {
        let hash = Bits256([0x42; 32]);

        assert_eq!(
            hash.to_string(),
            "4242424242424242424242424242424242424242424242424242424242424242"
        );
    }

    #[test]
    fn test_bits256_serialize() {
        let hash = Bits256([0x0a; 32]);
        let json = serde_json::to_string(&hash).unwrap();

        assert_eq!(
            json,
            "\"0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a\""
        );
    }

    #[test]
    fn test_bits256_deserialize_with_prefix() {
        let json = "\"0x4242424242424242424242424242424242424242424242424242424242424242\"";
        let hash: Bits256 = serde_json::from_str(json).unwrap();

        assert_eq!(hash.0, [0x42; 32]);
    }

    #[test]
    fn test_bits256_deserialize_wrong_length() {
        let json = "\"4242\"";
        let result: Result<Bits256, _> = serde_json::from_str(json);

        assert!(result.is_err());
    }

    #[test]
    fn test_bits256_is_zero() {
        assert!(Bits256::default().is_zero());
        assert!(!Bits256([1; 32]).is_zero());
    }
}
