// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Schema records to domain entities.
//!
//! This module provides:
//! - `convert_account` for `ShardAccount` records
//! - `convert_transaction` / `convert_transactions` for transaction records
//! - `convert_message` for single messages
//!
//! Conversions are pure: the same record always yields the same entity, and
//! either the whole entity is produced or an error is returned.
//!
//! Message bodies are classified with the default registries. Use
//! [`Normalizer`] to convert with registries built from configuration.

mod account;
mod message;
mod transaction;

pub use account::convert_account;

use crate::abi::{DEFAULT_EXT_IN_REGISTRY, DEFAULT_INTERNAL_REGISTRY, OperationRegistry};
use crate::error::DecodeError;
use crate::models::{Message, Transaction};
use crate::tlb::{MessageRecord, TransactionRecord};

/// `Grams` is `VarUInteger 16`: at most 15 value bytes.
pub const GRAMS_MAX_BITS: u64 = 120;

/// Storage counters are `VarUInteger 7`: at most 6 value bytes.
pub const STORAGE_USED_MAX_BITS: u64 = 48;

/// Extra currency amounts are `VarUInteger 32`: at most 31 value bytes.
pub const EXTRA_CURRENCY_MAX_BITS: u64 = 248;

/// Message-aware converters bound to a pair of operation registries.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'a> {
    ext_in: &'a OperationRegistry,
    internal: &'a OperationRegistry,
}

impl Default for Normalizer<'static> {
    fn default() -> Self {
        Self {
            ext_in: &DEFAULT_EXT_IN_REGISTRY,
            internal: &DEFAULT_INTERNAL_REGISTRY,
        }
    }
}

impl<'a> Normalizer<'a> {
    pub fn new(ext_in: &'a OperationRegistry, internal: &'a OperationRegistry) -> Self {
        Self { ext_in, internal }
    }

    pub fn ext_in_registry(&self) -> &'a OperationRegistry {
        self.ext_in
    }

    pub fn internal_registry(&self) -> &'a OperationRegistry {
        self.internal
    }

    /// Convert one transaction; `batch_order` is set to `lt_bias`.
    pub fn transaction(&self, lt_bias: u64, record: &TransactionRecord) -> Result<Transaction, DecodeError> {
        transaction::convert(self, lt_bias, record)
    }

    /// Convert a batch; the transaction at index `i` gets `batch_order = lt_bias + i`.
    ///
    /// The first failing record aborts the batch.
    pub fn transactions(
        &self,
        lt_bias: u64,
        records: &[TransactionRecord],
    ) -> Result<Vec<Transaction>, DecodeError> {
        records
            .iter()
            .enumerate()
            .map(|(index, record)| self.transaction(lt_bias.saturating_add(index as u64), record))
            .collect()
    }

    /// Convert a message seen in a transaction with logical time `tx_lt`.
    pub fn message(&self, record: &MessageRecord, tx_lt: u64) -> Result<Message, DecodeError> {
        message::convert(self, record, tx_lt)
    }
}

pub fn convert_transaction(lt_bias: u64, record: &TransactionRecord) -> Result<Transaction, DecodeError> {
    Normalizer::default().transaction(lt_bias, record)
}

pub fn convert_transactions(
    lt_bias: u64,
    records: &[TransactionRecord],
) -> Result<Vec<Transaction>, DecodeError> {
    Normalizer::default().transactions(lt_bias, records)
}

pub fn convert_message(record: &MessageRecord, tx_lt: u64) -> Result<Message, DecodeError> {
    Normalizer::default().message(record, tx_lt)
}
