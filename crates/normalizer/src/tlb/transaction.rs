// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{CurrencyCollection, MessageRecord};
use crate::types::Bits256;
use crate::utils::numeric::{biguint_string, opt_biguint_string};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// `Transaction` as produced by the schema decoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub hash: Bits256,
    pub workchain: i32,
    pub account_addr: Bits256,
    pub lt: u64,
    pub prev_trans_hash: Bits256,
    pub prev_trans_lt: u64,
    pub now: u32,
    pub orig_status: AccountStatusRecord,
    pub end_status: AccountStatusRecord,
    #[serde(default)]
    pub in_msg: Option<MessageRecord>,
    #[serde(default)]
    pub out_msgs: Vec<MessageRecord>,
    pub total_fees: CurrencyCollection,
    pub description: TransactionDescr,
    #[serde(default)]
    pub block: Option<BlockRef>,
}

/// Block that contains a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRef {
    pub workchain: i32,
    /// Shard prefix as 16 hex digits
    pub shard: String,
    pub seqno: u32,
}

/// `AccountStatus`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatusRecord {
    Uninit,
    Frozen,
    Active,
    Nonexist,
}

/// `TransactionDescr`
///
/// Unknown kinds deserialize to `Unrecognized` so the converter can reject them
/// with the transaction hash attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransactionDescr {
    Ord {
        #[serde(default)]
        credit_first: bool,
        #[serde(default)]
        storage_ph: Option<StoragePhase>,
        #[serde(default)]
        credit_ph: Option<CreditPhase>,
        compute_ph: ComputePhase,
        #[serde(default)]
        action: Option<ActionPhase>,
        aborted: bool,
        #[serde(default)]
        bounce: Option<BouncePhase>,
        destroyed: bool,
    },
    Storage {
        storage_ph: StoragePhase,
    },
    TickTock {
        is_tock: bool,
        storage_ph: StoragePhase,
        compute_ph: ComputePhase,
        #[serde(default)]
        action: Option<ActionPhase>,
        aborted: bool,
        destroyed: bool,
    },
    SplitPrepare {
        split_info: SplitMergeInfo,
        #[serde(default)]
        storage_ph: Option<StoragePhase>,
        compute_ph: ComputePhase,
        #[serde(default)]
        action: Option<ActionPhase>,
        aborted: bool,
        destroyed: bool,
    },
    SplitInstall {
        split_info: SplitMergeInfo,
        prepare_transaction: Bits256,
        installed: bool,
    },
    MergePrepare {
        split_info: SplitMergeInfo,
        storage_ph: StoragePhase,
        aborted: bool,
    },
    MergeInstall {
        split_info: SplitMergeInfo,
        prepare_transaction: Bits256,
        #[serde(default)]
        storage_ph: Option<StoragePhase>,
        #[serde(default)]
        credit_ph: Option<CreditPhase>,
        compute_ph: ComputePhase,
        #[serde(default)]
        action: Option<ActionPhase>,
        aborted: bool,
        destroyed: bool,
    },
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitMergeInfo {
    pub cur_shard_pfx_len: u8,
    pub acc_split_depth: u8,
    pub this_addr: Bits256,
    pub sibling_addr: Bits256,
}

/// `AccStatusChange`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccStatusChange {
    #[default]
    Unchanged,
    Frozen,
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoragePhase {
    #[serde(with = "biguint_string")]
    pub storage_fees_collected: BigUint,
    #[serde(default, with = "opt_biguint_string")]
    pub storage_fees_due: Option<BigUint>,
    #[serde(default)]
    pub status_change: AccStatusChange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditPhase {
    #[serde(default, with = "opt_biguint_string")]
    pub due_fees_collected: Option<BigUint>,
    pub credit: CurrencyCollection,
}

/// `ComputeSkipReason`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComputeSkipReason {
    NoState,
    BadState,
    NoGas,
    Suspended,
}

/// `TrComputePhase`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComputePhase {
    Skipped {
        reason: ComputeSkipReason,
    },
    Vm {
        success: bool,
        #[serde(default)]
        msg_state_used: bool,
        #[serde(default)]
        account_activated: bool,
        #[serde(with = "biguint_string")]
        gas_fees: BigUint,
        #[serde(with = "biguint_string")]
        gas_used: BigUint,
        #[serde(default, with = "biguint_string")]
        gas_limit: BigUint,
        #[serde(default, with = "opt_biguint_string")]
        gas_credit: Option<BigUint>,
        #[serde(default)]
        mode: i8,
        exit_code: i32,
        #[serde(default)]
        exit_arg: Option<i32>,
        vm_steps: u32,
        #[serde(default)]
        vm_init_state_hash: Bits256,
        #[serde(default)]
        vm_final_state_hash: Bits256,
    },
}

/// `StorageUsedShort`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageUsedShort {
    #[serde(with = "biguint_string")]
    pub cells: BigUint,
    #[serde(with = "biguint_string")]
    pub bits: BigUint,
}

/// `TrActionPhase`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPhase {
    pub success: bool,
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub no_funds: bool,
    #[serde(default)]
    pub status_change: AccStatusChange,
    #[serde(default, with = "opt_biguint_string")]
    pub total_fwd_fees: Option<BigUint>,
    #[serde(default, with = "opt_biguint_string")]
    pub total_action_fees: Option<BigUint>,
    pub result_code: i32,
    #[serde(default)]
    pub result_arg: Option<i32>,
    pub tot_actions: u16,
    #[serde(default)]
    pub spec_actions: u16,
    #[serde(default)]
    pub skipped_actions: u16,
    #[serde(default)]
    pub msgs_created: u16,
    #[serde(default)]
    pub action_list_hash: Bits256,
    #[serde(default)]
    pub tot_msg_size: StorageUsedShort,
}

/// `TrBouncePhase`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BouncePhase {
    NegFunds,
    NoFunds {
        msg_size: StorageUsedShort,
        #[serde(with = "biguint_string")]
        req_fwd_fees: BigUint,
    },
    Ok {
        msg_size: StorageUsedShort,
        #[serde(with = "biguint_string")]
        msg_fees: BigUint,
        #[serde(with = "biguint_string")]
        fwd_fees: BigUint,
    },
}
