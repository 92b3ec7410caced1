// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::types::{AccountId, Bits256};
use crate::utils::format::{hex_bytes, opt_hex_bytes, opt_opcode};
use crate::utils::numeric::biguint_string;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageType {
    IntMsg,
    ExtInMsg,
    ExtOutMsg,
}

/// A recognized message body: the operation name and its decoded fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedMessageBody {
    pub operation: String,
    pub value: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageInit {
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_hex_bytes")]
    pub code: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_hex_bytes")]
    pub data: Option<Vec<u8>>,
}

/// Normalized message.
///
/// `op_code` is reported whenever the body carries 32 bits, even if no decoder
/// recognized it; `decoded_body` only when one did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub hash: Bits256,
    pub msg_type: MessageType,
    pub created_lt: u64,
    pub created_at: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<AccountId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<AccountId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_extern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_extern: Option<String>,
    #[serde(with = "biguint_string")]
    pub value: BigUint,
    #[serde(with = "biguint_string")]
    pub fwd_fee: BigUint,
    #[serde(with = "biguint_string")]
    pub ihr_fee: BigUint,
    #[serde(with = "biguint_string")]
    pub import_fee: BigUint,
    pub bounce: bool,
    pub bounced: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init: Option<MessageInit>,
    #[serde(with = "hex_bytes")]
    pub raw_body: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_opcode")]
    pub op_code: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decoded_body: Option<DecodedMessageBody>,
}
