// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cell::CellError;
use thiserror::Error;

/// Errors raised while turning ledger records or message bodies into domain values.
///
/// None of these are retryable: the same input always fails the same way.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Message body has {bits} bits, too short for an operation tag")]
    BodyTooShort { bits: usize },

    #[error("Body claimed by operation '{operation}' does not match its layout")]
    Malformed {
        operation: &'static str,
        #[source]
        source: Box<DecodeError>,
    },

    #[error("{record} is missing required field '{field}'")]
    MissingField {
        record: &'static str,
        field: &'static str,
    },

    #[error("Field '{field}' needs {bits} bits, at most {max_bits} allowed")]
    Overflow {
        field: &'static str,
        bits: u64,
        max_bits: u64,
    },

    #[error("Unrecognized transaction description in transaction {0}")]
    UnknownTransactionDescr(String),

    #[error("{0} left unread data after decoding")]
    TrailingData(&'static str),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Unsupported: {0}")]
    Unsupported(String),

    #[error("Cell read failed: {0}")]
    Cell(#[from] CellError),

    #[error("Failed to encode decoded body: {0}")]
    Encode(#[from] serde_json::Error),
}
