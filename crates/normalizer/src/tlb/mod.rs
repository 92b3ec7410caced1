// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Schema-typed ledger records.
//!
//! These are the records produced by the block schema decoder and consumed by
//! the converters. They are plain serde types so that fixtures and RPC
//! payloads can be loaded straight from JSON:
//! - `ShardAccount` / `AccountRecord` for account state
//! - `TransactionRecord` with its `TransactionDescr` and phases
//! - `MessageRecord` with `CommonMsgInfo`
//!
//! Field names follow the schema (snake_case); numeric fields wider than 64
//! bits travel as decimal strings.

pub mod account;
pub mod message;
pub mod transaction;

pub use account::{AccountRecord, AccountStateRecord, AccountStorage, ShardAccount, StorageInfoRecord, StorageUsed};
pub use message::{CommonMsgInfo, MessageRecord};
pub use transaction::{
    AccStatusChange, AccountStatusRecord, ActionPhase, BlockRef, BouncePhase, ComputePhase,
    ComputeSkipReason, CreditPhase, SplitMergeInfo, StoragePhase, StorageUsedShort,
    TransactionDescr, TransactionRecord,
};

use crate::cell::dict::load_dict;
use crate::cell::{boc_hex, opt_boc_hex, Cell, CellError, CellSlice};
use crate::types::{AccountId, Bits256};
use crate::utils::format::hex_bytes;
use crate::utils::numeric::{biguint_map, biguint_string};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ================================================================================================
// Currency
// ================================================================================================

/// `CurrencyCollection`: native grams plus extra currencies keyed by currency id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyCollection {
    #[serde(with = "biguint_string")]
    pub grams: BigUint,
    #[serde(default, with = "biguint_map")]
    pub other: BTreeMap<u32, BigUint>,
}

impl CurrencyCollection {
    pub fn from_grams(grams: impl Into<BigUint>) -> Self {
        Self {
            grams: grams.into(),
            other: BTreeMap::new(),
        }
    }

    /// `grams:Grams other:ExtraCurrencyCollection`
    pub fn load(slice: &mut CellSlice<'_>) -> Result<Self, CellError> {
        let grams = slice.load_coins()?;
        let mut other = BTreeMap::new();
        if let Some(root) = slice.load_maybe_reference()? {
            for (id, value) in load_dict(root, 32)? {
                let amount = CellSlice::new(&value).load_var_uint(5)?;
                other.insert(id as u32, amount);
            }
        }
        Ok(Self { grams, other })
    }
}

// ================================================================================================
// Addresses
// ================================================================================================

/// `MsgAddress` in any of its four encodings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MsgAddress {
    None,
    External {
        bits: u16,
        #[serde(with = "hex_bytes")]
        address: Vec<u8>,
    },
    Std {
        address: AccountId,
    },
    Var {
        workchain: i32,
        bits: u16,
        #[serde(with = "hex_bytes")]
        address: Vec<u8>,
    },
}

impl MsgAddress {
    pub fn load(slice: &mut CellSlice<'_>) -> Result<Self, CellError> {
        match slice.load_uint(2)? {
            0b00 => Ok(MsgAddress::None),
            0b01 => {
                let bits = slice.load_uint(9)? as u16;
                let address = slice.load_bits(bits as usize)?;
                Ok(MsgAddress::External { bits, address })
            }
            0b10 => {
                skip_anycast(slice)?;
                let workchain = slice.load_i8()? as i32;
                let hash = slice.load_bytes::<32>()?;
                Ok(MsgAddress::Std {
                    address: AccountId::new(workchain, hash),
                })
            }
            _ => {
                skip_anycast(slice)?;
                let bits = slice.load_uint(9)? as u16;
                let workchain = slice.load_i32()?;
                let address = slice.load_bits(bits as usize)?;
                Ok(MsgAddress::Var {
                    workchain,
                    bits,
                    address,
                })
            }
        }
    }

    /// The internal account address, if this is one.
    ///
    /// A variable-length address with exactly 256 bits is treated as standard.
    pub fn account_id(&self) -> Option<AccountId> {
        match self {
            MsgAddress::Std { address } => Some(*address),
            MsgAddress::Var {
                workchain,
                bits: 256,
                address,
            } => {
                let mut hash = [0u8; 32];
                hash.copy_from_slice(address.get(..32)?);
                Some(AccountId::new(*workchain, hash))
            }
            _ => None,
        }
    }

    /// Hex of an external address, if this is one.
    pub fn external(&self) -> Option<String> {
        match self {
            MsgAddress::External { address, .. } => Some(hex::encode(address)),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, MsgAddress::None)
    }
}

/// `anycast_info$_ depth:(#<= 30) rewrite_pfx:(bits depth)` behind a Maybe bit.
fn skip_anycast(slice: &mut CellSlice<'_>) -> Result<(), CellError> {
    if slice.load_bit()? {
        let depth = slice.load_uint(5)? as usize;
        slice.skip_bits(depth)?;
    }
    Ok(())
}

// ================================================================================================
// State init
// ================================================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickTock {
    pub tick: bool,
    pub tock: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleLib {
    pub public: bool,
    #[serde(with = "boc_hex")]
    pub root: Cell,
}

/// `StateInit`: optional code, data and libraries of a contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateInit {
    #[serde(default)]
    pub split_depth: Option<u8>,
    #[serde(default)]
    pub special: Option<TickTock>,
    #[serde(default, with = "opt_boc_hex")]
    pub code: Option<Cell>,
    #[serde(default, with = "opt_boc_hex")]
    pub data: Option<Cell>,
    #[serde(default)]
    pub libraries: BTreeMap<Bits256, SimpleLib>,
}

impl StateInit {
    /// `split_depth:(Maybe (## 5)) special:(Maybe TickTock) code:(Maybe ^Cell)
    /// data:(Maybe ^Cell) library:(HashmapE 256 SimpleLib)`
    ///
    /// The library dictionary is skipped over, not read.
    pub fn load(slice: &mut CellSlice<'_>) -> Result<Self, CellError> {
        let split_depth = if slice.load_bit()? {
            Some(slice.load_uint(5)? as u8)
        } else {
            None
        };
        let special = if slice.load_bit()? {
            Some(TickTock {
                tick: slice.load_bit()?,
                tock: slice.load_bit()?,
            })
        } else {
            None
        };
        let code = slice.load_maybe_reference()?.map(|c| c.as_ref().clone());
        let data = slice.load_maybe_reference()?.map(|c| c.as_ref().clone());
        slice.load_maybe_reference()?;

        Ok(Self {
            split_depth,
            special,
            code,
            data,
            libraries: BTreeMap::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::testing::{store_bit, store_coins, store_std_address, store_var_uint};
    use crate::cell::{ArcCell, CellBuilder};

    const RAW: &str = "0:de9dda22ade30314cb9f394ce4a8da4521acbcdc69e3576b6018c6c0eb8c00de";

    #[test]
    fn test_load_std_address() {
        let id: AccountId = RAW.parse().unwrap();
        let mut builder = CellBuilder::new();
        store_std_address(&mut builder, 0, id.address.as_bytes());
        let cell = builder.build().unwrap();

        let mut slice = CellSlice::new(&cell);
        let address = MsgAddress::load(&mut slice).unwrap();
        assert_eq!(address.account_id(), Some(id));
        assert!(slice.is_exhausted());
    }

    #[test]
    fn test_load_none_and_external() {
        let mut builder = CellBuilder::new();
        builder
            .store_u8(2, 0b00)
            .unwrap()
            .store_u8(2, 0b01)
            .unwrap()
            .store_u32(9, 12)
            .unwrap()
            .store_u32(12, 0xabc)
            .unwrap();
        let cell = builder.build().unwrap();

        let mut slice = CellSlice::new(&cell);
        assert!(MsgAddress::load(&mut slice).unwrap().is_none());
        let external = MsgAddress::load(&mut slice).unwrap();
        assert_eq!(external.external(), Some("abc0".to_string()));
        assert_eq!(external.account_id(), None);
    }

    #[test]
    fn test_currency_collection_with_extra() {
        let mut entry = CellBuilder::new();
        // single entry: hml_long$10 n=32, key 239, VarUInteger 32 value 1000
        entry
            .store_u8(2, 0b10)
            .unwrap()
            .store_u8(6, 32)
            .unwrap()
            .store_u32(32, 239)
            .unwrap();
        store_var_uint(&mut entry, 5, &BigUint::from(1000u32));
        let dict = ArcCell::new(entry.build().unwrap());

        let mut builder = CellBuilder::new();
        store_coins(&mut builder, &BigUint::from(5u8));
        store_bit(&mut builder, true);
        builder.store_reference(&dict).unwrap();
        let cell = builder.build().unwrap();

        let value = CurrencyCollection::load(&mut CellSlice::new(&cell)).unwrap();
        assert_eq!(value.grams, BigUint::from(5u8));
        assert_eq!(value.other.get(&239), Some(&BigUint::from(1000u32)));
    }

    #[test]
    fn test_state_init_keeps_code_and_data() {
        let code = ArcCell::new(crate::cell::testing::cell(&[0xff, 0x00], 16, &[]));
        let mut builder = CellBuilder::new();
        // no split_depth, no special, code, no data, no libraries
        builder.store_u8(3, 0b001).unwrap().store_reference(&code).unwrap();
        builder.store_u8(2, 0b00).unwrap();
        let cell = builder.build().unwrap();

        let init = StateInit::load(&mut CellSlice::new(&cell)).unwrap();
        assert_eq!(init.code.as_ref(), Some(code.as_ref()));
        assert_eq!(init.data, None);

        let json = serde_json::to_value(&init).unwrap();
        assert!(json["code"].as_str().unwrap().starts_with("b5ee9c72"));
        let back: StateInit = serde_json::from_value(json).unwrap();
        assert_eq!(back, init);
    }

    #[test]
    fn test_msg_address_json_shape() {
        let json = serde_json::json!({ "kind": "std", "address": RAW });
        let address: MsgAddress = serde_json::from_value(json).unwrap();
        assert_eq!(address.account_id().map(|a| a.to_string()), Some(RAW.to_string()));

        let none: MsgAddress = serde_json::from_value(serde_json::json!({ "kind": "none" })).unwrap();
        assert!(none.is_none());
    }
}
