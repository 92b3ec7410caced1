// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Field readers shared by the built-in interfaces.

use crate::cell::{to_boc, Cell, CellSlice};
use crate::error::DecodeError;
use crate::tlb::{CurrencyCollection, MsgAddress, StateInit};
use serde::Serialize;
use serde_json::Value;

/// Reject leftover data, then serialize the decoded record.
pub(super) fn finish<T: Serialize>(
    operation: &'static str,
    slice: &CellSlice<'_>,
    value: T,
) -> Result<Value, DecodeError> {
    if !slice.is_exhausted() {
        return Err(DecodeError::TrailingData(operation));
    }
    Ok(serde_json::to_value(value)?)
}

/// Display form of an address: raw for internal, `ext:<hex>` for external.
pub(super) fn address(slice: &mut CellSlice<'_>) -> Result<Option<String>, DecodeError> {
    Ok(match MsgAddress::load(slice)? {
        MsgAddress::None => None,
        MsgAddress::Std { address } => Some(address.to_raw()),
        MsgAddress::External { address, .. } => Some(format!("ext:{}", hex::encode(address))),
        MsgAddress::Var {
            workchain, address, ..
        } => Some(format!("{}:{}", workchain, hex::encode(address))),
    })
}

pub(super) fn coins(slice: &mut CellSlice<'_>) -> Result<String, DecodeError> {
    Ok(slice.load_coins()?.to_string())
}

pub(super) fn boc_hex(cell: &Cell) -> Result<String, DecodeError> {
    Ok(hex::encode(to_boc(cell)?))
}

/// `Maybe ^Cell` as an optional hex BOC.
pub(super) fn maybe_cell(slice: &mut CellSlice<'_>) -> Result<Option<String>, DecodeError> {
    slice.load_maybe_reference()?.map(|cell| boc_hex(cell)).transpose()
}

/// `Either Cell ^Cell` as a hex BOC.
pub(super) fn either_cell(slice: &mut CellSlice<'_>) -> Result<String, DecodeError> {
    boc_hex(&slice.load_either_cell()?)
}

/// Header and payload of a `MessageRelaxed` queued by a wallet.
#[derive(Debug, Serialize)]
pub(super) struct RelaxedMessage {
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    pub value: String,
    #[serde(skip_serializing_if = "std::collections::BTreeMap::is_empty")]
    pub extra_value: std::collections::BTreeMap<u32, String>,
    pub bounce: bool,
    pub has_init: bool,
    pub body: String,
}

/// `MessageRelaxed Any` from its own cell.
pub(super) fn relaxed_message(cell: &Cell) -> Result<RelaxedMessage, DecodeError> {
    let mut slice = CellSlice::new(cell);

    let message = if !slice.load_bit()? {
        // int_msg_info$0
        let _ihr_disabled = slice.load_bit()?;
        let bounce = slice.load_bit()?;
        let _bounced = slice.load_bit()?;
        MsgAddress::load(&mut slice)?;
        let destination = address(&mut slice)?;
        let value = CurrencyCollection::load(&mut slice)?;
        slice.load_coins()?;
        slice.load_coins()?;
        slice.skip_bits(64 + 32)?;
        let (has_init, body) = init_and_body(&mut slice)?;
        RelaxedMessage {
            kind: "internal",
            destination,
            value: value.grams.to_string(),
            extra_value: value.other.iter().map(|(k, v)| (*k, v.to_string())).collect(),
            bounce,
            has_init,
            body,
        }
    } else if slice.load_bit()? {
        // ext_out_msg_info$11
        MsgAddress::load(&mut slice)?;
        let destination = address(&mut slice)?;
        slice.skip_bits(64 + 32)?;
        let (has_init, body) = init_and_body(&mut slice)?;
        RelaxedMessage {
            kind: "external_out",
            destination,
            value: "0".to_string(),
            extra_value: Default::default(),
            bounce: false,
            has_init,
            body,
        }
    } else {
        return Err(DecodeError::InvalidValue {
            field: "out_msg",
            reason: "external inbound header in an outbound message".to_string(),
        });
    };

    if !slice.is_exhausted() {
        return Err(DecodeError::TrailingData("MessageRelaxed"));
    }
    Ok(message)
}

/// `init:(Maybe (Either StateInit ^StateInit)) body:(Either X ^X)`
fn init_and_body(slice: &mut CellSlice<'_>) -> Result<(bool, String), DecodeError> {
    let has_init = slice.load_bit()?;
    if has_init {
        if slice.load_bit()? {
            let init = slice.load_reference()?;
            let mut init_slice = CellSlice::new(init);
            StateInit::load(&mut init_slice)?;
        } else {
            StateInit::load(slice)?;
        }
    }
    let body = either_cell(slice)?;
    Ok((has_init, body))
}
