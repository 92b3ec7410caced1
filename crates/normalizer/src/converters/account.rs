// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{EXTRA_CURRENCY_MAX_BITS, GRAMS_MAX_BITS, STORAGE_USED_MAX_BITS};
use crate::cell::to_boc;
use crate::error::DecodeError;
use crate::models::{Account, AccountLibrary, AccountStatus, StorageInfo};
use crate::tlb::{AccountStateRecord, ShardAccount};
use crate::types::AccountId;
use crate::utils::{check_width, check_width_opt};

/// Convert a shard account record into an `Account`.
///
/// A shard record without an account yields a `nonexist` account that still
/// carries the last transaction reference.
pub fn convert_account(address: AccountId, shard: &ShardAccount) -> Result<Account, DecodeError> {
    let Some(record) = &shard.account else {
        tracing::debug!(account = %address, "Account does not exist");
        return Ok(Account::nonexistent(
            address,
            shard.last_trans_lt,
            shard.last_trans_hash,
        ));
    };

    if let Some(recorded) = record.address
        && recorded != address
    {
        tracing::warn!(
            account = %address,
            recorded = %recorded,
            "Account record address differs from requested address"
        );
    }

    let stat = record
        .storage_stat
        .as_ref()
        .ok_or(DecodeError::MissingField {
            record: "Account",
            field: "storage_stat",
        })?;
    let balance = &record.storage.balance;

    check_width("balance", &balance.grams, GRAMS_MAX_BITS)?;
    for amount in balance.other.values() {
        check_width("extra_balance", amount, EXTRA_CURRENCY_MAX_BITS)?;
    }
    check_width("used_cells", &stat.used.cells, STORAGE_USED_MAX_BITS)?;
    check_width("used_bits", &stat.used.bits, STORAGE_USED_MAX_BITS)?;
    check_width("used_public_cells", &stat.used.public_cells, STORAGE_USED_MAX_BITS)?;
    check_width_opt("due_payment", stat.due_payment.as_ref(), GRAMS_MAX_BITS)?;

    let mut account = Account {
        address,
        status: AccountStatus::Uninit,
        balance: balance.grams.clone(),
        extra_balances: (!balance.other.is_empty()).then(|| balance.other.clone()),
        last_transaction_lt: shard.last_trans_lt,
        last_transaction_hash: shard.last_trans_hash,
        storage: StorageInfo {
            used_cells: stat.used.cells.clone(),
            used_bits: stat.used.bits.clone(),
            used_public_cells: stat.used.public_cells.clone(),
            last_paid: stat.last_paid,
            due_payment: stat.due_payment.clone().unwrap_or_default(),
        },
        code: None,
        data: None,
        frozen_hash: None,
        libraries: None,
    };

    match &record.storage.state {
        AccountStateRecord::Uninit => {}
        AccountStateRecord::Frozen { state_hash } => {
            account.status = AccountStatus::Frozen;
            account.frozen_hash = Some(*state_hash);
        }
        AccountStateRecord::Active { state_init } => {
            account.status = AccountStatus::Active;
            account.code = state_init.code.as_ref().map(to_boc).transpose()?;
            account.data = state_init.data.as_ref().map(to_boc).transpose()?;
            if !state_init.libraries.is_empty() {
                account.libraries = Some(
                    state_init
                        .libraries
                        .iter()
                        .map(|(hash, lib)| {
                            Ok(AccountLibrary {
                                hash: *hash,
                                public: lib.public,
                                root: to_boc(&lib.root)?,
                            })
                        })
                        .collect::<Result<_, DecodeError>>()?,
                );
            }
        }
    }

    tracing::debug!(account = %address, status = %account.status, "Converted account");
    Ok(account)
}
