// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{CurrencyCollection, MsgAddress, StateInit};
use crate::cell::{boc_hex, Cell};
use crate::types::Bits256;
use crate::utils::numeric::biguint_string;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// `Message Any`: header, optional state init and body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub hash: Bits256,
    pub info: CommonMsgInfo,
    #[serde(default)]
    pub init: Option<StateInit>,
    #[serde(default, with = "boc_hex")]
    pub body: Cell,
}

/// `CommonMsgInfo`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommonMsgInfo {
    IntMsg {
        #[serde(default)]
        ihr_disabled: bool,
        bounce: bool,
        #[serde(default)]
        bounced: bool,
        src: MsgAddress,
        dest: MsgAddress,
        value: CurrencyCollection,
        #[serde(default, with = "biguint_string")]
        ihr_fee: BigUint,
        #[serde(default, with = "biguint_string")]
        fwd_fee: BigUint,
        created_lt: u64,
        created_at: u32,
    },
    ExtInMsg {
        src: MsgAddress,
        dest: MsgAddress,
        #[serde(default, with = "biguint_string")]
        import_fee: BigUint,
    },
    ExtOutMsg {
        src: MsgAddress,
        dest: MsgAddress,
        created_lt: u64,
        created_at: u32,
    },
}

impl CommonMsgInfo {
    /// Value carried by an internal message; zero for external ones.
    pub fn value(&self) -> Option<&CurrencyCollection> {
        match self {
            CommonMsgInfo::IntMsg { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, CommonMsgInfo::IntMsg { .. })
    }
}
