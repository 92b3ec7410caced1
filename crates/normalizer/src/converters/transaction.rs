// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{GRAMS_MAX_BITS, Normalizer};
use crate::error::DecodeError;
use crate::models::{self, AccountStatus, BlockId, Message, StatusChange, Transaction, TransactionType};
use crate::tlb::{
    self, AccStatusChange, AccountStatusRecord, ComputeSkipReason, TransactionDescr, TransactionRecord,
};
use crate::types::AccountId;
use crate::utils::check_width;
use num_bigint::{BigInt, BigUint};

/// Phases of a transaction description, whatever its kind.
struct Phases<'r> {
    kind: TransactionType,
    storage: Option<&'r tlb::StoragePhase>,
    credit: Option<&'r tlb::CreditPhase>,
    compute: Option<&'r tlb::ComputePhase>,
    action: Option<&'r tlb::ActionPhase>,
    bounce: Option<&'r tlb::BouncePhase>,
    aborted: bool,
    destroyed: bool,
}

impl<'r> Phases<'r> {
    fn from_descr(record: &'r TransactionRecord) -> Result<Self, DecodeError> {
        let phases = match &record.description {
            TransactionDescr::Ord {
                storage_ph,
                credit_ph,
                compute_ph,
                action,
                aborted,
                bounce,
                destroyed,
                ..
            } => Phases {
                kind: TransactionType::TransOrd,
                storage: storage_ph.as_ref(),
                credit: credit_ph.as_ref(),
                compute: Some(compute_ph),
                action: action.as_ref(),
                bounce: bounce.as_ref(),
                aborted: *aborted,
                destroyed: *destroyed,
            },
            TransactionDescr::Storage { storage_ph } => Phases {
                kind: TransactionType::TransStorage,
                storage: Some(storage_ph),
                credit: None,
                compute: None,
                action: None,
                bounce: None,
                aborted: false,
                destroyed: false,
            },
            TransactionDescr::TickTock {
                storage_ph,
                compute_ph,
                action,
                aborted,
                destroyed,
                ..
            } => Phases {
                kind: TransactionType::TransTickTock,
                storage: Some(storage_ph),
                credit: None,
                compute: Some(compute_ph),
                action: action.as_ref(),
                bounce: None,
                aborted: *aborted,
                destroyed: *destroyed,
            },
            TransactionDescr::SplitPrepare {
                storage_ph,
                compute_ph,
                action,
                aborted,
                destroyed,
                ..
            } => Phases {
                kind: TransactionType::TransSplitPrepare,
                storage: storage_ph.as_ref(),
                credit: None,
                compute: Some(compute_ph),
                action: action.as_ref(),
                bounce: None,
                aborted: *aborted,
                destroyed: *destroyed,
            },
            TransactionDescr::SplitInstall { .. } => Phases {
                kind: TransactionType::TransSplitInstall,
                storage: None,
                credit: None,
                compute: None,
                action: None,
                bounce: None,
                aborted: false,
                destroyed: false,
            },
            TransactionDescr::MergePrepare {
                storage_ph, aborted, ..
            } => Phases {
                kind: TransactionType::TransMergePrepare,
                storage: Some(storage_ph),
                credit: None,
                compute: None,
                action: None,
                bounce: None,
                aborted: *aborted,
                destroyed: false,
            },
            TransactionDescr::MergeInstall {
                storage_ph,
                credit_ph,
                compute_ph,
                action,
                aborted,
                destroyed,
                ..
            } => Phases {
                kind: TransactionType::TransMergeInstall,
                storage: storage_ph.as_ref(),
                credit: credit_ph.as_ref(),
                compute: Some(compute_ph),
                action: action.as_ref(),
                bounce: None,
                aborted: *aborted,
                destroyed: *destroyed,
            },
            TransactionDescr::Unrecognized => {
                return Err(DecodeError::UnknownTransactionDescr(record.hash.to_string()));
            }
        };
        Ok(phases)
    }

    /// Not aborted, and every executed phase that reports success succeeded.
    fn success(&self) -> bool {
        if self.aborted {
            return false;
        }
        let compute_ok = match self.compute {
            Some(tlb::ComputePhase::Vm { success, .. }) => *success,
            _ => true,
        };
        let action_ok = self.action.is_none_or(|action| action.success);
        compute_ok && action_ok
    }
}

pub(super) fn convert(
    normalizer: &Normalizer<'_>,
    lt_bias: u64,
    record: &TransactionRecord,
) -> Result<Transaction, DecodeError> {
    let phases = Phases::from_descr(record)?;
    check_width("total_fees", &record.total_fees.grams, GRAMS_MAX_BITS)?;

    let in_msg = record
        .in_msg
        .as_ref()
        .map(|msg| normalizer.message(msg, record.lt))
        .transpose()?;

    let mut out_msgs = record
        .out_msgs
        .iter()
        .map(|msg| normalizer.message(msg, record.lt))
        .collect::<Result<Vec<_>, _>>()?;
    out_msgs.sort_by_key(|msg| msg.created_lt);

    let storage_fee = phases
        .storage
        .map(|ph| ph.storage_fees_collected.clone())
        .unwrap_or_default();
    let credit_fee = phases
        .credit
        .and_then(|ph| ph.due_fees_collected.clone())
        .unwrap_or_default();

    let transaction = Transaction {
        hash: record.hash,
        account_address: AccountId {
            workchain: record.workchain,
            address: record.account_addr,
        },
        logical_time: record.lt,
        batch_order: lt_bias,
        prev_trans_hash: record.prev_trans_hash,
        prev_trans_lt: record.prev_trans_lt,
        utime: record.now,
        transaction_type: phases.kind,
        success: phases.success(),
        aborted: phases.aborted,
        destroyed: phases.destroyed,
        orig_status: account_status(record.orig_status),
        end_status: account_status(record.end_status),
        total_fee: record.total_fees.grams.clone(),
        storage_fee,
        credit_fee,
        balance_change: balance_change(in_msg.as_ref(), &out_msgs, &record.total_fees.grams),
        compute_phase: phases.compute.map(compute_phase),
        storage_phase: phases.storage.map(storage_phase),
        credit_phase: phases.credit.map(credit_phase),
        action_phase: phases.action.map(action_phase),
        bounce_phase: phases.bounce.map(bounce_phase),
        in_msg,
        out_msgs,
        block: record.block.as_ref().map(|block| BlockId {
            workchain: block.workchain,
            shard: block.shard.clone(),
            seqno: block.seqno,
        }),
    };

    tracing::trace!(
        transaction = %transaction.hash,
        account = %transaction.account_address,
        lt = transaction.logical_time,
        batch_order = transaction.batch_order,
        "Converted transaction"
    );
    Ok(transaction)
}

/// Incoming internal value minus outgoing internal values and total fees.
fn balance_change(in_msg: Option<&Message>, out_msgs: &[Message], total_fees: &BigUint) -> BigInt {
    let mut change = BigInt::default();
    if let Some(msg) = in_msg.filter(|msg| msg.msg_type == models::MessageType::IntMsg) {
        change += BigInt::from(msg.value.clone());
    }
    for msg in out_msgs
        .iter()
        .filter(|msg| msg.msg_type == models::MessageType::IntMsg)
    {
        change -= BigInt::from(msg.value.clone());
    }
    change - BigInt::from(total_fees.clone())
}

fn account_status(status: AccountStatusRecord) -> AccountStatus {
    match status {
        AccountStatusRecord::Uninit => AccountStatus::Uninit,
        AccountStatusRecord::Frozen => AccountStatus::Frozen,
        AccountStatusRecord::Active => AccountStatus::Active,
        AccountStatusRecord::Nonexist => AccountStatus::Nonexist,
    }
}

fn status_change(change: AccStatusChange) -> StatusChange {
    match change {
        AccStatusChange::Unchanged => StatusChange::Unchanged,
        AccStatusChange::Frozen => StatusChange::Frozen,
        AccStatusChange::Deleted => StatusChange::Deleted,
    }
}

fn compute_phase(phase: &tlb::ComputePhase) -> models::ComputePhase {
    match phase {
        tlb::ComputePhase::Skipped { reason } => models::ComputePhase {
            skipped: true,
            skip_reason: Some(
                match reason {
                    ComputeSkipReason::NoState => "noState",
                    ComputeSkipReason::BadState => "badState",
                    ComputeSkipReason::NoGas => "noGas",
                    ComputeSkipReason::Suspended => "suspended",
                }
                .to_string(),
            ),
            success: None,
            gas_fees: None,
            gas_used: None,
            vm_steps: None,
            exit_code: None,
        },
        tlb::ComputePhase::Vm {
            success,
            gas_fees,
            gas_used,
            exit_code,
            vm_steps,
            ..
        } => models::ComputePhase {
            skipped: false,
            skip_reason: None,
            success: Some(*success),
            gas_fees: Some(gas_fees.clone()),
            gas_used: Some(gas_used.clone()),
            vm_steps: Some(*vm_steps),
            exit_code: Some(*exit_code),
        },
    }
}

fn storage_phase(phase: &tlb::StoragePhase) -> models::StoragePhase {
    models::StoragePhase {
        fees_collected: phase.storage_fees_collected.clone(),
        fees_due: phase.storage_fees_due.clone(),
        status_change: status_change(phase.status_change),
    }
}

fn credit_phase(phase: &tlb::CreditPhase) -> models::CreditPhase {
    models::CreditPhase {
        fees_collected: phase.due_fees_collected.clone().unwrap_or_default(),
        credit: phase.credit.grams.clone(),
    }
}

fn action_phase(phase: &tlb::ActionPhase) -> models::ActionPhase {
    models::ActionPhase {
        success: phase.success,
        result_code: phase.result_code,
        total_actions: phase.tot_actions,
        skipped_actions: phase.skipped_actions,
        fwd_fees: phase.total_fwd_fees.clone().unwrap_or_default(),
        total_fees: phase.total_action_fees.clone().unwrap_or_default(),
    }
}

fn bounce_phase(phase: &tlb::BouncePhase) -> models::BouncePhase {
    match phase {
        tlb::BouncePhase::NegFunds => models::BouncePhase::NegFunds,
        tlb::BouncePhase::NoFunds { .. } => models::BouncePhase::NoFunds,
        tlb::BouncePhase::Ok { .. } => models::BouncePhase::Ok,
    }
}
