// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! NFT item messages.

use super::common::{address, coins, either_cell, finish, maybe_cell};
use super::{FnOperation, OperationDecoder};
use crate::cell::CellSlice;
use crate::error::DecodeError;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

pub const OP_TRANSFER: u32 = 0x5fcc3d14;
pub const OP_OWNERSHIP_ASSIGNED: u32 = 0x05138d91;

pub fn operations() -> Vec<Arc<dyn OperationDecoder>> {
    vec![
        FnOperation::tagged("NftTransfer", OP_TRANSFER, transfer),
        FnOperation::tagged("NftOwnershipAssigned", OP_OWNERSHIP_ASSIGNED, ownership_assigned),
    ]
}

#[derive(Debug, Serialize)]
struct Transfer {
    query_id: u64,
    new_owner: Option<String>,
    response_destination: Option<String>,
    custom_payload: Option<String>,
    forward_amount: String,
    forward_payload: String,
}

#[derive(Debug, Serialize)]
struct OwnershipAssigned {
    query_id: u64,
    prev_owner: Option<String>,
    forward_payload: String,
}

fn transfer(slice: &mut CellSlice<'_>) -> Result<Value, DecodeError> {
    let value = Transfer {
        query_id: slice.load_u64()?,
        new_owner: address(slice)?,
        response_destination: address(slice)?,
        custom_payload: maybe_cell(slice)?,
        forward_amount: coins(slice)?,
        forward_payload: either_cell(slice)?,
    };
    finish("NftTransfer", slice, value)
}

fn ownership_assigned(slice: &mut CellSlice<'_>) -> Result<Value, DecodeError> {
    let value = OwnershipAssigned {
        query_id: slice.load_u64()?,
        prev_owner: address(slice)?,
        forward_payload: either_cell(slice)?,
    };
    finish("NftOwnershipAssigned", slice, value)
}
