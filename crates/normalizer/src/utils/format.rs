// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Formatting utilities for hex encoding of binary blobs.

/// Format bytes as hex string with "0x" prefix
pub fn hex_with_prefix(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}

/// Serde adapter for `Vec<u8>` as a lowercase hex string.
pub mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        hex::decode(s.trim_start_matches("0x")).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for `Option<Vec<u8>>` as an optional lowercase hex string.
pub mod opt_hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(bytes) => serializer.serialize_some(&hex::encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|s| hex::decode(s.trim_start_matches("0x")).map_err(serde::de::Error::custom))
            .transpose()
    }
}

/// Serde adapter for an optional 32-bit operation code as `0x`-prefixed hex.
pub mod opt_opcode {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(op) => serializer.serialize_some(&format!("0x{:08x}", op)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|s| u32::from_str_radix(s.trim_start_matches("0x"), 16).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Blob {
        #[serde(with = "hex_bytes")]
        raw: Vec<u8>,
        #[serde(default, with = "opt_hex_bytes")]
        extra: Option<Vec<u8>>,
    }

    #[test]
    fn test_hex_with_prefix() {
        assert_eq!(hex_with_prefix(&[0xde, 0xad]), "0xdead");
        assert_eq!(hex_with_prefix(&[]), "0x");
    }

    #[test]
    fn test_hex_adapters() {
        let blob = Blob {
            raw: vec![0xca, 0xfe],
            extra: None,
        };
        let json = serde_json::to_string(&blob).unwrap();
        assert_eq!(json, r#"{"raw":"cafe","extra":null}"#);

        let parsed: Blob = serde_json::from_str(r#"{"raw":"0xCAFE"}"#).unwrap();
        assert_eq!(parsed, blob);
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Op {
        #[serde(default, with = "opt_opcode")]
        op: Option<u32>,
    }

    #[test]
    fn test_opcode_keeps_leading_zeros() {
        let json = serde_json::to_string(&Op { op: Some(0x0f8a7ea5) }).unwrap();
        assert_eq!(json, r#"{"op":"0x0f8a7ea5"}"#);

        let parsed: Op = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.op, Some(0x0f8a7ea5));
    }
}
