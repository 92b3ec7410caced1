// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arbitrary-precision numeric helpers.
//!
//! This module provides:
//! - serde adapters that write `BigUint` / `BigInt` as decimal strings and
//!   read them from either strings or JSON numbers
//! - width checks mirroring the `VarUInteger n` field limits of the ledger schema

use crate::error::DecodeError;
use num_bigint::{BigInt, BigUint};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Fail with `DecodeError::Overflow` when `value` needs more than `max_bits` bits.
pub fn check_width(field: &'static str, value: &BigUint, max_bits: u64) -> Result<(), DecodeError> {
    let bits = value.bits();
    if bits > max_bits {
        return Err(DecodeError::Overflow {
            field,
            bits,
            max_bits,
        });
    }
    Ok(())
}

pub fn check_width_opt(
    field: &'static str,
    value: Option<&BigUint>,
    max_bits: u64,
) -> Result<(), DecodeError> {
    match value {
        Some(value) => check_width(field, value, max_bits),
        None => Ok(()),
    }
}

struct BigUintVisitor;

impl Visitor<'_> for BigUintVisitor {
    type Value = BigUint;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an unsigned integer or a decimal string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<BigUint, E> {
        Ok(BigUint::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<BigUint, E> {
        u64::try_from(v)
            .map(BigUint::from)
            .map_err(|_| E::custom(format!("negative value {} for unsigned field", v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<BigUint, E> {
        v.trim()
            .parse::<BigUint>()
            .map_err(|e| E::custom(format!("invalid unsigned integer '{}': {}", v, e)))
    }
}

struct BigIntVisitor;

impl Visitor<'_> for BigIntVisitor {
    type Value = BigInt;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer or a decimal string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<BigInt, E> {
        Ok(BigInt::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<BigInt, E> {
        Ok(BigInt::from(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<BigInt, E> {
        v.trim()
            .parse::<BigInt>()
            .map_err(|e| E::custom(format!("invalid integer '{}': {}", v, e)))
    }
}

/// `BigUint` as a decimal string.
pub mod biguint_string {
    use super::*;

    pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        deserializer.deserialize_any(BigUintVisitor)
    }
}

/// `Option<BigUint>` as an optional decimal string.
pub mod opt_biguint_string {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<BigUint>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_some(&v.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<BigUint>, D::Error> {
        Ok(Option::<Repr>::deserialize(deserializer)?.map(|r| r.0))
    }
}

/// `BigInt` as a decimal string.
pub mod bigint_string {
    use super::*;

    pub fn serialize<S: Serializer>(value: &BigInt, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigInt, D::Error> {
        deserializer.deserialize_any(BigIntVisitor)
    }
}

/// `BTreeMap<u32, BigUint>` with decimal-string values.
pub mod biguint_map {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &BTreeMap<u32, BigUint>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        value
            .iter()
            .map(|(k, v)| (*k, v.to_string()))
            .collect::<BTreeMap<_, _>>()
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<u32, BigUint>, D::Error> {
        currency_keys::<D>(BTreeMap::<String, Repr>::deserialize(deserializer)?)
    }
}

/// `Option<BTreeMap<u32, BigUint>>` with decimal-string values.
pub mod opt_biguint_map {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<BTreeMap<u32, BigUint>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(map) => serializer.serialize_some(
                &map.iter()
                    .map(|(k, v)| (*k, v.to_string()))
                    .collect::<BTreeMap<_, _>>(),
            ),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<BTreeMap<u32, BigUint>>, D::Error> {
        Option::<BTreeMap<String, Repr>>::deserialize(deserializer)?
            .map(currency_keys::<D>)
            .transpose()
    }
}

/// Currency ids arrive as map keys, so they are strings even in self-describing buffers.
fn currency_keys<'de, D: Deserializer<'de>>(
    map: BTreeMap<String, Repr>,
) -> Result<BTreeMap<u32, BigUint>, D::Error> {
    map.into_iter()
        .map(|(k, v)| {
            k.parse::<u32>()
                .map(|id| (id, v.0))
                .map_err(|_| serde::de::Error::custom(format!("invalid currency id '{}'", k)))
        })
        .collect()
}

struct Repr(BigUint);

impl<'de> Deserialize<'de> for Repr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(BigUintVisitor).map(Repr)
    }
}
