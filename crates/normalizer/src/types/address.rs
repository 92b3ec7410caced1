// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Account identifiers.
//!
//! An `AccountId` is a workchain plus a 256-bit address. It accepts both the
//! raw form (`0:de9d...00de`) and the 48-character user-friendly form
//! (`EQDend...3siV`), and always serializes to the raw form.

use super::Bits256;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tonlib_core::TonAddress;

const FRIENDLY_LEN: usize = 48;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressParseError {
    #[error("Invalid address format: {0}")]
    InvalidFormat(String),

    #[error("Invalid workchain '{0}'")]
    InvalidWorkchain(String),

    #[error("Invalid address hash: {0}")]
    InvalidHash(String),

    #[error("Invalid user-friendly address '{address}': {reason}")]
    InvalidFriendly { address: String, reason: String },
}

/// Account address: workchain + 256-bit hash. Equality is byte-exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct AccountId {
    pub workchain: i32,
    pub address: Bits256,
}

impl AccountId {
    pub fn new(workchain: i32, address: [u8; 32]) -> Self {
        Self {
            workchain,
            address: Bits256(address),
        }
    }

    /// Raw form: `<workchain>:<64 hex chars>`
    pub fn to_raw(&self) -> String {
        format!("{}:{}", self.workchain, self.address)
    }

    fn parse_raw(s: &str) -> Result<Self, AddressParseError> {
        let (workchain, hash) = s
            .split_once(':')
            .ok_or_else(|| AddressParseError::InvalidFormat(s.to_string()))?;
        let workchain = workchain
            .parse::<i32>()
            .map_err(|_| AddressParseError::InvalidWorkchain(workchain.to_string()))?;
        let address = hash.parse::<Bits256>().map_err(AddressParseError::InvalidHash)?;
        Ok(Self { workchain, address })
    }

    /// Base64 or base64url; tag and CRC16 checksum are verified by `TonAddress`.
    fn parse_friendly(s: &str) -> Result<Self, AddressParseError> {
        let url_safe = s.replace('+', "-").replace('/', "_");
        let parsed = TonAddress::from_base64_url(&url_safe).map_err(|e| {
            AddressParseError::InvalidFriendly {
                address: s.to_string(),
                reason: e.to_string(),
            }
        })?;

        let address: [u8; 32] = parsed
            .hash_part
            .as_slice()
            .try_into()
            .map_err(|_| AddressParseError::InvalidHash(s.to_string()))?;
        Ok(Self::new(parsed.workchain, address))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.workchain, self.address)
    }
}

impl FromStr for AccountId {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.contains(':') {
            Self::parse_raw(s)
        } else if s.len() == FRIENDLY_LEN {
            Self::parse_friendly(s)
        } else {
            Err(AddressParseError::InvalidFormat(s.to_string()))
        }
    }
}

impl Serialize for AccountId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_raw())
    }
}

impl<'de> Deserialize<'de> for AccountId {
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

    const FRIENDLY: &str = "EQDendoireMDFMufOUzkqNpFIay83GnjV2tgGMbA64wA3siV";
    const RAW: &str = "0:de9dda22ade30314cb9f394ce4a8da4521acbcdc69e3576b6018c6c0eb8c00de";

    #[test]
    fn test_parse_friendly_matches_raw() {
        let friendly: AccountId = FRIENDLY.parse().unwrap();
        let raw: AccountId = RAW.parse().unwrap();

        assert_eq!(friendly, raw);
        assert_eq!(friendly.to_string(), RAW);
    }

    #[test]
    fn test_parse_non_bounceable_and_std_base64() {
        let raw: AccountId = RAW.parse().unwrap();
        let non_bounceable: AccountId = "UQDendoireMDFMufOUzkqNpFIay83GnjV2tgGMbA64wA3pVQ"
            .parse()
            .unwrap();
        assert_eq!(non_bounceable, raw);

        let url_safe: AccountId = "EQBxuFfnP5UVFIeWBiZJ9UStEGEVW_DqIgETU36GSkrhWuzD".parse().unwrap();
        let standard: AccountId = "EQBxuFfnP5UVFIeWBiZJ9UStEGEVW/DqIgETU36GSkrhWuzD".parse().unwrap();
        assert_eq!(url_safe, standard);
        assert_eq!(url_safe.workchain, 0);
    }

    #[test]
    fn test_parse_masterchain_raw() {
        let id: AccountId = "-1:3333333333333333333333333333333333333333333333333333333333333333"
            .parse()
            .unwrap();

        assert_eq!(id.workchain, -1);
        assert_eq!(id.address, Bits256([0x33; 32]));
    }

    #[test]
    fn test_bad_checksum_rejected() {
        // last character altered
        let result = "EQDendoireMDFMufOUzkqNpFIay83GnjV2tgGMbA64wA3siW".parse::<AccountId>();

        assert!(matches!(
            result,
            Err(AddressParseError::InvalidFriendly { .. })
        ));
    }

    #[test]
    fn test_invalid_inputs() {
        assert!("".parse::<AccountId>().is_err());
        assert!("0:abcd".parse::<AccountId>().is_err());
        assert!("x:de9dda22ade30314cb9f394ce4a8da4521acbcdc69e3576b6018c6c0eb8c00de"
            .parse::<AccountId>()
            .is_err());
    }

    #[test]
    fn test_serde_uses_raw_form() {
        let id: AccountId = FRIENDLY.parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", RAW));

        let back: AccountId = serde_json::from_str(&format!("\"{}\"", FRIENDLY)).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_ordering_is_workchain_then_hash() {
        let a = AccountId::new(-1, [0xff; 32]);
        let b = AccountId::new(0, [0x00; 32]);
        assert!(a < b);
    }
}
