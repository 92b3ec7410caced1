// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{CurrencyCollection, StateInit};
use crate::types::{AccountId, Bits256};
use crate::utils::numeric::{biguint_string, opt_biguint_string};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// `ShardAccount`: the account (if any) plus the last transaction that touched it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardAccount {
    #[serde(default)]
    pub account: Option<AccountRecord>,
    pub last_trans_hash: Bits256,
    pub last_trans_lt: u64,
}

/// `account$1 addr:MsgAddressInt storage_stat:StorageInfo storage:AccountStorage`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    #[serde(default)]
    pub address: Option<AccountId>,
    #[serde(default)]
    pub storage_stat: Option<StorageInfoRecord>,
    pub storage: AccountStorage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageInfoRecord {
    pub used: StorageUsed,
    pub last_paid: u32,
    #[serde(default, with = "opt_biguint_string")]
    pub due_payment: Option<BigUint>,
}

/// `storage_used$_ cells:(VarUInteger 7) bits:(VarUInteger 7) public_cells:(VarUInteger 7)`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageUsed {
    #[serde(with = "biguint_string")]
    pub cells: BigUint,
    #[serde(with = "biguint_string")]
    pub bits: BigUint,
    #[serde(default, with = "biguint_string")]
    pub public_cells: BigUint,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountStorage {
    pub last_trans_lt: u64,
    pub balance: CurrencyCollection,
    pub state: AccountStateRecord,
}

/// `AccountState`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AccountStateRecord {
    Uninit,
    Active { state_init: StateInit },
    Frozen { state_hash: Bits256 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shard_account_from_json() {
        let json = serde_json::json!({
            "account": {
                "storage_stat": {
                    "used": { "cells": "46", "bits": 13485, "public_cells": "0" },
                    "last_paid": 1663270333u32
                },
                "storage": {
                    "last_trans_lt": 31236013000006u64,
                    "balance": { "grams": "989109352" },
                    "state": {
                        "kind": "frozen",
                        "state_hash": "1111111111111111111111111111111111111111111111111111111111111111"
                    }
                }
            },
            "last_trans_hash": "2222222222222222222222222222222222222222222222222222222222222222",
            "last_trans_lt": 31236013000006u64
        });

        let shard: ShardAccount = serde_json::from_value(json).unwrap();
        let account = shard.account.unwrap();
        let stat = account.storage_stat.unwrap();

        assert_eq!(stat.used.cells, BigUint::from(46u8));
        assert_eq!(stat.used.bits, BigUint::from(13485u32));
        assert_eq!(stat.due_payment, None);
        assert!(account.storage.balance.other.is_empty());
        assert_eq!(
            account.storage.state,
            AccountStateRecord::Frozen {
                state_hash: Bits256([0x11; 32])
            }
        );
    }

    #[test]
    fn test_missing_account_is_none() {
        let json = serde_json::json!({
            "last_trans_hash": "0000000000000000000000000000000000000000000000000000000000000000",
            "last_trans_lt": 0
        });
        let shard: ShardAccount = serde_json::from_value(json).unwrap();
        assert!(shard.account.is_none());
    }
}
