// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::types::{AccountId, Bits256};
use crate::utils::format::{hex_bytes, opt_hex_bytes};
use crate::utils::numeric::{biguint_string, opt_biguint_map};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Frozen,
    Uninit,
    Nonexist,
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AccountStatus::Active => "active",
            AccountStatus::Frozen => "frozen",
            AccountStatus::Uninit => "uninit",
            AccountStatus::Nonexist => "nonexist",
        };
        f.write_str(s)
    }
}

/// Storage usage and payment state of an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageInfo {
    #[serde(with = "biguint_string")]
    pub used_cells: BigUint,
    #[serde(with = "biguint_string")]
    pub used_bits: BigUint,
    #[serde(with = "biguint_string")]
    pub used_public_cells: BigUint,
    pub last_paid: u32,
    #[serde(with = "biguint_string")]
    pub due_payment: BigUint,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountLibrary {
    pub hash: Bits256,
    pub public: bool,
    #[serde(with = "hex_bytes")]
    pub root: Vec<u8>,
}

/// Normalized account state.
///
/// - `nonexist` accounts have a zero balance, no code/data and default storage
/// - `code` and `data` are present only for active accounts that carry them
/// - `extra_balances` is `None` rather than an empty map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub address: AccountId,
    pub status: AccountStatus,
    #[serde(with = "biguint_string")]
    pub balance: BigUint,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_biguint_map")]
    pub extra_balances: Option<BTreeMap<u32, BigUint>>,
    pub last_transaction_lt: u64,
    pub last_transaction_hash: Bits256,
    pub storage: StorageInfo,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_hex_bytes")]
    pub code: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_hex_bytes")]
    pub data: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frozen_hash: Option<Bits256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub libraries: Option<Vec<AccountLibrary>>,
}

impl Account {
    /// An account that has never been created or has been deleted.
    pub fn nonexistent(address: AccountId, last_transaction_lt: u64, last_transaction_hash: Bits256) -> Self {
        Self {
            address,
            status: AccountStatus::Nonexist,
            balance: BigUint::default(),
            extra_balances: None,
            last_transaction_lt,
            last_transaction_hash,
            storage: StorageInfo::default(),
            code: None,
            data: None,
            frozen_hash: None,
            libraries: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nonexistent_serialization_omits_optional_keys() {
        let account = Account::nonexistent(AccountId::default(), 0, Bits256::default());
        let json = serde_json::to_value(&account).unwrap();

        assert_eq!(json["status"], "nonexist");
        assert_eq!(json["balance"], "0");
        assert!(json.get("extraBalances").is_none());
        assert!(json.get("code").is_none());
        assert!(json.get("data").is_none());
        assert_eq!(json["storage"]["usedCells"], "0");
    }
}
