// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{AccountStatus, Message};
use crate::types::{AccountId, Bits256};
use crate::utils::numeric::{bigint_string, biguint_string, opt_biguint_string};
use num_bigint::{BigInt, BigUint};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    TransOrd,
    TransStorage,
    TransTickTock,
    TransSplitPrepare,
    TransSplitInstall,
    TransMergePrepare,
    TransMergeInstall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusChange {
    Unchanged,
    Frozen,
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputePhase {
    pub skipped: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_biguint_string")]
    pub gas_fees: Option<BigUint>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_biguint_string")]
    pub gas_used: Option<BigUint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vm_steps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoragePhase {
    #[serde(with = "biguint_string")]
    pub fees_collected: BigUint,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_biguint_string")]
    pub fees_due: Option<BigUint>,
    pub status_change: StatusChange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditPhase {
    #[serde(with = "biguint_string")]
    pub fees_collected: BigUint,
    #[serde(with = "biguint_string")]
    pub credit: BigUint,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPhase {
    pub success: bool,
    pub result_code: i32,
    pub total_actions: u16,
    pub skipped_actions: u16,
    #[serde(with = "biguint_string")]
    pub fwd_fees: BigUint,
    #[serde(with = "biguint_string")]
    pub total_fees: BigUint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BouncePhase {
    NegFunds,
    NoFunds,
    Ok,
}

/// Block containing a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockId {
    pub workchain: i32,
    pub shard: String,
    pub seqno: u32,
}

/// Normalized transaction.
///
/// `logical_time` is always the ledger value; `batch_order` is the
/// interleaving index assigned by the caller's bias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub hash: Bits256,
    pub account_address: AccountId,
    pub logical_time: u64,
    pub batch_order: u64,
    pub prev_trans_hash: Bits256,
    pub prev_trans_lt: u64,
    pub utime: u32,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub success: bool,
    pub aborted: bool,
    pub destroyed: bool,
    pub orig_status: AccountStatus,
    pub end_status: AccountStatus,
    #[serde(with = "biguint_string")]
    pub total_fee: BigUint,
    #[serde(with = "biguint_string")]
    pub storage_fee: BigUint,
    #[serde(with = "biguint_string")]
    pub credit_fee: BigUint,
    #[serde(with = "bigint_string")]
    pub balance_change: BigInt,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute_phase: Option<ComputePhase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_phase: Option<StoragePhase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_phase: Option<CreditPhase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_phase: Option<ActionPhase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounce_phase: Option<BouncePhase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_msg: Option<Message>,
    pub out_msgs: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<BlockId>,
}
