// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Fungible token (jetton) wallet messages.

use super::common::{address, coins, either_cell, finish, maybe_cell};
use super::{FnOperation, OperationDecoder};
use crate::cell::CellSlice;
use crate::error::DecodeError;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

pub const OP_TRANSFER: u32 = 0x0f8a7ea5;
pub const OP_INTERNAL_TRANSFER: u32 = 0x178d4519;
pub const OP_NOTIFY: u32 = 0x7362d09c;
pub const OP_BURN: u32 = 0x595f07bc;
pub const OP_EXCESS: u32 = 0xd53276db;

pub fn operations() -> Vec<Arc<dyn OperationDecoder>> {
    vec![
        FnOperation::tagged("JettonTransfer", OP_TRANSFER, transfer),
        FnOperation::tagged("JettonInternalTransfer", OP_INTERNAL_TRANSFER, internal_transfer),
        FnOperation::tagged("JettonNotify", OP_NOTIFY, notify),
        FnOperation::tagged("JettonBurn", OP_BURN, burn),
        FnOperation::tagged("Excess", OP_EXCESS, excess),
    ]
}

#[derive(Debug, Serialize)]
struct Transfer {
    query_id: u64,
    amount: String,
    destination: Option<String>,
    response_destination: Option<String>,
    custom_payload: Option<String>,
    forward_ton_amount: String,
    forward_payload: String,
}

#[derive(Debug, Serialize)]
struct InternalTransfer {
    query_id: u64,
    amount: String,
    from: Option<String>,
    response_address: Option<String>,
    forward_ton_amount: String,
    forward_payload: String,
}

#[derive(Debug, Serialize)]
struct Notify {
    query_id: u64,
    amount: String,
    sender: Option<String>,
    forward_payload: String,
}

#[derive(Debug, Serialize)]
struct Burn {
    query_id: u64,
    amount: String,
    response_destination: Option<String>,
    custom_payload: Option<String>,
}

#[derive(Debug, Serialize)]
struct Excess {
    query_id: u64,
}

fn transfer(slice: &mut CellSlice<'_>) -> Result<Value, DecodeError> {
    let value = Transfer {
        query_id: slice.load_u64()?,
        amount: coins(slice)?,
        destination: address(slice)?,
        response_destination: address(slice)?,
        custom_payload: maybe_cell(slice)?,
        forward_ton_amount: coins(slice)?,
        forward_payload: either_cell(slice)?,
    };
    finish("JettonTransfer", slice, value)
}

fn internal_transfer(slice: &mut CellSlice<'_>) -> Result<Value, DecodeError> {
    let value = InternalTransfer {
        query_id: slice.load_u64()?,
        amount: coins(slice)?,
        from: address(slice)?,
        response_address: address(slice)?,
        forward_ton_amount: coins(slice)?,
        forward_payload: either_cell(slice)?,
    };
    finish("JettonInternalTransfer", slice, value)
}

fn notify(slice: &mut CellSlice<'_>) -> Result<Value, DecodeError> {
    let value = Notify {
        query_id: slice.load_u64()?,
        amount: coins(slice)?,
        sender: address(slice)?,
        forward_payload: either_cell(slice)?,
    };
    finish("JettonNotify", slice, value)
}

fn burn(slice: &mut CellSlice<'_>) -> Result<Value, DecodeError> {
    let value = Burn {
        query_id: slice.load_u64()?,
        amount: coins(slice)?,
        response_destination: address(slice)?,
        custom_payload: maybe_cell(slice)?,
    };
    finish("JettonBurn", slice, value)
}

fn excess(slice: &mut CellSlice<'_>) -> Result<Value, DecodeError> {
    let value = Excess {
        query_id: slice.load_u64()?,
    };
    finish("Excess", slice, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::{BodyDecodeResult, DEFAULT_INTERNAL_REGISTRY};
    use crate::cell::testing::{store_bit, store_coins, store_std_address};
    use crate::cell::{Cell, CellBuilder};
    use num_bigint::BigUint;

    fn std_address(builder: &mut CellBuilder, byte: u8) {
        store_std_address(builder, 0, &[byte; 32]);
    }

    #[test]
    fn test_transfer_through_default_registry() {
        let mut builder = CellBuilder::new();
        builder
            .store_u32(32, OP_TRANSFER)
            .unwrap()
            .store_u64(64, 7)
            .unwrap();
        store_coins(&mut builder, &BigUint::from(5_000_000u32));
        std_address(&mut builder, 0x01);
        std_address(&mut builder, 0x02);
        store_bit(&mut builder, false);
        store_coins(&mut builder, &BigUint::from(1u8));
        store_bit(&mut builder, false);
        let body = builder.build().unwrap();

        let result = DEFAULT_INTERNAL_REGISTRY.decode(&body).unwrap();
        let decoded = result.decoded().unwrap();
        assert_eq!(result.tag(), Some(OP_TRANSFER));
        assert_eq!(decoded.operation, "JettonTransfer");
        assert_eq!(decoded.value["query_id"], 7);
        assert_eq!(decoded.value["amount"], "5000000");
        assert_eq!(
            decoded.value["destination"],
            "0:0101010101010101010101010101010101010101010101010101010101010101"
        );
        assert_eq!(decoded.value["custom_payload"], Value::Null);
        assert_eq!(decoded.value["forward_ton_amount"], "1");
    }

    #[test]
    fn test_excess_with_trailing_data_is_malformed() {
        let mut builder = CellBuilder::new();
        builder
            .store_u32(32, OP_EXCESS)
            .unwrap()
            .store_u64(64, 1)
            .unwrap()
            .store_u8(8, 0xff)
            .unwrap();
        let body = builder.build().unwrap();

        let result = DEFAULT_INTERNAL_REGISTRY.decode(&body);
        assert!(matches!(
            result,
            Err(DecodeError::Malformed {
                operation: "Excess",
                ..
            })
        ));
    }

    #[test]
    fn test_excess() {
        let mut builder = CellBuilder::new();
        builder.store_u32(32, OP_EXCESS).unwrap().store_u64(64, 99).unwrap();
        let body: Cell = builder.build().unwrap();

        match DEFAULT_INTERNAL_REGISTRY.decode(&body).unwrap() {
            BodyDecodeResult::Matched { body, .. } => {
                assert_eq!(body.operation, "Excess");
                assert_eq!(body.value["query_id"], 99);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
