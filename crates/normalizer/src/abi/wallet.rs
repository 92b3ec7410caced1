// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Wallet contract requests.
//!
//! V5R1 requests are tagged. V4 and V3 external requests carry no tag and are
//! recognized purely by layout, so they sit after V5R1 in the registry.

use super::common::{self, RelaxedMessage, boc_hex, finish};
use super::{FnOperation, OperationDecoder};
use crate::cell::{is_empty, Cell, CellSlice};
use crate::error::DecodeError;
use crate::tlb::CurrencyCollection;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

pub const OP_SIGNED_EXTERNAL_V5R1: u32 = 0x7369676e;
pub const OP_SIGNED_INTERNAL_V5R1: u32 = 0x73696e74;
pub const OP_EXTENSION_ACTION_V5R1: u32 = 0x6578746e;

const ACTION_SEND_MSG: u32 = 0x0ec3c86d;
const ACTION_SET_CODE: u32 = 0xad4de08e;
const ACTION_RESERVE_CURRENCY: u32 = 0x36e6b809;
const ACTION_CHANGE_LIBRARY: u32 = 0x26fa1dd4;

const EXT_ACTION_ADD_EXTENSION: u8 = 0x02;
const EXT_ACTION_DELETE_EXTENSION: u8 = 0x03;
const EXT_ACTION_SET_SIGNATURE_AUTH: u8 = 0x04;

pub fn v5r1() -> Vec<Arc<dyn OperationDecoder>> {
    vec![
        FnOperation::tagged("WalletSignedExternalV5R1", OP_SIGNED_EXTERNAL_V5R1, |s| {
            signed_v5r1("WalletSignedExternalV5R1", s)
        }),
        FnOperation::tagged("WalletSignedInternalV5R1", OP_SIGNED_INTERNAL_V5R1, |s| {
            signed_v5r1("WalletSignedInternalV5R1", s)
        }),
        FnOperation::tagged("WalletExtensionActionV5R1", OP_EXTENSION_ACTION_V5R1, extension_v5r1),
    ]
}

pub fn v4() -> Vec<Arc<dyn OperationDecoder>> {
    vec![FnOperation::untagged("WalletSignedV4", signed_v4)]
}

pub fn v3() -> Vec<Arc<dyn OperationDecoder>> {
    vec![FnOperation::untagged("WalletSignedV3", signed_v3)]
}

// ================================================================================================
// Out actions
// ================================================================================================

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum OutAction {
    SendMsg { mode: u8, message: RelaxedMessage },
    SetCode { code: String },
    ReserveCurrency { mode: u8, amount: String },
    ChangeLibrary { mode: u8, library: String },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ExtendedAction {
    AddExtension { address: Option<String> },
    DeleteExtension { address: Option<String> },
    SetSignatureAuthAllowed { allowed: bool },
}

/// `OutList n`, returned oldest action first.
fn out_list(head: &Cell) -> Result<Vec<OutAction>, DecodeError> {
    let mut actions = Vec::new();
    let mut current = head;

    while !is_empty(current) {
        let mut slice = CellSlice::new(current);
        let prev = slice.load_reference()?;
        let action = match slice.load_u32()? {
            ACTION_SEND_MSG => {
                let mode = slice.load_u8()?;
                let message = common::relaxed_message(slice.load_reference()?)?;
                OutAction::SendMsg { mode, message }
            }
            ACTION_SET_CODE => OutAction::SetCode {
                code: boc_hex(slice.load_reference()?)?,
            },
            ACTION_RESERVE_CURRENCY => {
                let mode = slice.load_u8()?;
                let amount = CurrencyCollection::load(&mut slice)?;
                OutAction::ReserveCurrency {
                    mode,
                    amount: amount.grams.to_string(),
                }
            }
            ACTION_CHANGE_LIBRARY => {
                let mode = slice.load_uint(7)? as u8;
                let library = if slice.load_bit()? {
                    boc_hex(slice.load_reference()?)?
                } else {
                    hex::encode(slice.load_bytes::<32>()?)
                };
                OutAction::ChangeLibrary { mode, library }
            }
            other => {
                return Err(DecodeError::InvalidValue {
                    field: "out_action",
                    reason: format!("unknown action tag {:#010x}", other),
                });
            }
        };
        if !slice.is_exhausted() {
            return Err(DecodeError::TrailingData("OutAction"));
        }
        actions.push(action);
        current = prev.as_ref();
    }

    actions.reverse();
    Ok(actions)
}

/// Chain of extended actions: `action prev:(Maybe ^ActionList)`.
fn extended_actions(slice: &mut CellSlice<'_>) -> Result<Vec<ExtendedAction>, DecodeError> {
    let mut actions = vec![extended_action(slice)?];
    let mut next = slice.load_maybe_reference()?;
    while let Some(cell) = next {
        let mut inner = CellSlice::new(cell);
        actions.push(extended_action(&mut inner)?);
        next = inner.load_maybe_reference()?;
        if !inner.is_exhausted() {
            return Err(DecodeError::TrailingData("ExtendedAction"));
        }
    }
    Ok(actions)
}

fn extended_action(slice: &mut CellSlice<'_>) -> Result<ExtendedAction, DecodeError> {
    match slice.load_u8()? {
        EXT_ACTION_ADD_EXTENSION => Ok(ExtendedAction::AddExtension {
            address: common::address(slice)?,
        }),
        EXT_ACTION_DELETE_EXTENSION => Ok(ExtendedAction::DeleteExtension {
            address: common::address(slice)?,
        }),
        EXT_ACTION_SET_SIGNATURE_AUTH => Ok(ExtendedAction::SetSignatureAuthAllowed {
            allowed: slice.load_bit()?,
        }),
        other => Err(DecodeError::InvalidValue {
            field: "extended_action",
            reason: format!("unknown extended action {:#04x}", other),
        }),
    }
}

// ================================================================================================
// V5R1
// ================================================================================================

#[derive(Debug, Serialize)]
struct SignedRequestV5R1 {
    wallet_id: u32,
    valid_until: u32,
    seqno: u32,
    actions: Vec<OutAction>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    extended_actions: Vec<ExtendedAction>,
    signature: String,
}

#[derive(Debug, Serialize)]
struct ExtensionRequestV5R1 {
    query_id: u64,
    actions: Vec<OutAction>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    extended_actions: Vec<ExtendedAction>,
}

/// `out_actions:(Maybe ^OutList) has_other_actions:(Maybe ActionList)`
fn inner_request(slice: &mut CellSlice<'_>) -> Result<(Vec<OutAction>, Vec<ExtendedAction>), DecodeError> {
    let actions = match slice.load_maybe_reference()? {
        Some(head) => out_list(head)?,
        None => Vec::new(),
    };
    let extended = if slice.load_bit()? {
        extended_actions(slice)?
    } else {
        Vec::new()
    };
    Ok((actions, extended))
}

fn signed_v5r1(operation: &'static str, slice: &mut CellSlice<'_>) -> Result<Value, DecodeError> {
    let wallet_id = slice.load_u32()?;
    let valid_until = slice.load_u32()?;
    let seqno = slice.load_u32()?;
    let (actions, extended_actions) = inner_request(slice)?;
    let signature = hex::encode(slice.load_bytes::<64>()?);

    finish(
        operation,
        slice,
        SignedRequestV5R1 {
            wallet_id,
            valid_until,
            seqno,
            actions,
            extended_actions,
            signature,
        },
    )
}

fn extension_v5r1(slice: &mut CellSlice<'_>) -> Result<Value, DecodeError> {
    let query_id = slice.load_u64()?;
    let (actions, extended_actions) = inner_request(slice)?;

    finish(
        "WalletExtensionActionV5R1",
        slice,
        ExtensionRequestV5R1 {
            query_id,
            actions,
            extended_actions,
        },
    )
}

// ================================================================================================
// V4 / V3
// ================================================================================================

#[derive(Debug, Serialize)]
struct SendMessage {
    mode: u8,
    message: RelaxedMessage,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum PluginRequest {
    DeployAndInstall {
        workchain: i8,
        amount: String,
        state_init: String,
        body: String,
    },
    Install {
        plugin: String,
        amount: String,
        query_id: u64,
    },
    Remove {
        plugin: String,
        amount: String,
        query_id: u64,
    },
}

#[derive(Debug, Serialize)]
struct SignedRequestV4 {
    signature: String,
    subwallet_id: u32,
    valid_until: u32,
    seqno: u32,
    op: u8,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    messages: Vec<SendMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    plugin: Option<PluginRequest>,
}

#[derive(Debug, Serialize)]
struct SignedRequestV3 {
    signature: String,
    subwallet_id: u32,
    valid_until: u32,
    seqno: u32,
    messages: Vec<SendMessage>,
}

/// `[mode:uint8 ^MessageRelaxed]*` until the slice is empty.
fn send_messages(slice: &mut CellSlice<'_>) -> Result<Vec<SendMessage>, DecodeError> {
    let mut messages = Vec::new();
    while !slice.is_exhausted() {
        let mode = slice.load_u8()?;
        let message = common::relaxed_message(slice.load_reference()?)?;
        messages.push(SendMessage { mode, message });
    }
    Ok(messages)
}

fn plugin_target(slice: &mut CellSlice<'_>) -> Result<(String, String, u64), DecodeError> {
    let workchain = slice.load_i8()?;
    let hash = slice.load_bytes::<32>()?;
    let amount = common::coins(slice)?;
    let query_id = slice.load_u64()?;
    Ok((format!("{}:{}", workchain, hex::encode(hash)), amount, query_id))
}

fn signed_v4(slice: &mut CellSlice<'_>) -> Result<Value, DecodeError> {
    let signature = hex::encode(slice.load_bytes::<64>()?);
    let subwallet_id = slice.load_u32()?;
    let valid_until = slice.load_u32()?;
    let seqno = slice.load_u32()?;
    let op = slice.load_u8()?;

    let (messages, plugin) = match op {
        0 => (send_messages(slice)?, None),
        1 => {
            let workchain = slice.load_i8()?;
            let amount = common::coins(slice)?;
            let state_init = boc_hex(slice.load_reference()?)?;
            let body = boc_hex(slice.load_reference()?)?;
            let request = PluginRequest::DeployAndInstall {
                workchain,
                amount,
                state_init,
                body,
            };
            (Vec::new(), Some(request))
        }
        2 | 3 => {
            let (plugin, amount, query_id) = plugin_target(slice)?;
            let request = if op == 2 {
                PluginRequest::Install {
                    plugin,
                    amount,
                    query_id,
                }
            } else {
                PluginRequest::Remove {
                    plugin,
                    amount,
                    query_id,
                }
            };
            (Vec::new(), Some(request))
        }
        other => {
            return Err(DecodeError::InvalidValue {
                field: "op",
                reason: format!("unknown wallet v4 op {}", other),
            });
        }
    };

    finish(
        "WalletSignedV4",
        slice,
        SignedRequestV4 {
            signature,
            subwallet_id,
            valid_until,
            seqno,
            op,
            messages,
            plugin,
        },
    )
}

fn signed_v3(slice: &mut CellSlice<'_>) -> Result<Value, DecodeError> {
    let signature = hex::encode(slice.load_bytes::<64>()?);
    let subwallet_id = slice.load_u32()?;
    let valid_until = slice.load_u32()?;
    let seqno = slice.load_u32()?;
    let messages = send_messages(slice)?;

    finish(
        "WalletSignedV3",
        slice,
        SignedRequestV3 {
            signature,
            subwallet_id,
            valid_until,
            seqno,
            messages,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::testing::{store_bit, store_coins, store_std_address};
    use crate::cell::{ArcCell, CellBuilder};

    fn empty_internal_message() -> ArcCell {
        let mut builder = CellBuilder::new();
        builder
            .store_u8(4, 0b0110) // int, ihr_disabled, bounce, !bounced
            .unwrap()
            .store_u8(2, 0b00) // src none
            .unwrap();
        store_std_address(&mut builder, 0, &[0x42; 32]);
        store_coins(&mut builder, &1_000u32.into());
        store_bit(&mut builder, false);
        builder
            .store_u8(8, 0) // ihr_fee, fwd_fee
            .unwrap()
            .store_u64(64, 0)
            .unwrap()
            .store_u32(32, 0)
            .unwrap()
            .store_u8(2, 0) // no init, inline body
            .unwrap();
        ArcCell::new(builder.build().unwrap())
    }

    fn v3_body(messages: usize) -> Cell {
        let mut builder = CellBuilder::new();
        builder
            .store_slice(&[0u8; 64])
            .unwrap()
            .store_u32(32, 698983191)
            .unwrap()
            .store_u32(32, 0xffffffff)
            .unwrap()
            .store_u32(32, 7)
            .unwrap();
        for _ in 0..messages {
            builder
                .store_u8(8, 3)
                .unwrap()
                .store_reference(&empty_internal_message())
                .unwrap();
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_v3_with_two_messages() {
        let body = v3_body(2);
        let value = signed_v3(&mut CellSlice::new(&body)).unwrap();

        assert_eq!(value["seqno"], 7);
        let messages = value["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["message"]["value"], "1000");
        assert_eq!(messages[0]["message"]["bounce"], true);
        assert_eq!(
            messages[0]["message"]["destination"],
            "0:4242424242424242424242424242424242424242424242424242424242424242"
        );
    }

    #[test]
    fn test_v4_rejects_v3_layout_with_nonzero_mode() {
        // the v3 mode byte lands in the v4 op field; op 3 wants a plugin target
        let body = v3_body(1);
        assert!(signed_v4(&mut CellSlice::new(&body)).is_err());
    }

    #[test]
    fn test_out_list_order_is_oldest_first() {
        let empty = ArcCell::new(Cell::default());

        let mut first = CellBuilder::new();
        first
            .store_reference(&empty)
            .unwrap()
            .store_u32(32, ACTION_SEND_MSG)
            .unwrap()
            .store_u8(8, 1)
            .unwrap()
            .store_reference(&empty_internal_message())
            .unwrap();
        let first = ArcCell::new(first.build().unwrap());

        let mut second = CellBuilder::new();
        second
            .store_reference(&first)
            .unwrap()
            .store_u32(32, ACTION_SET_CODE)
            .unwrap()
            .store_reference(&empty)
            .unwrap();
        let head = second.build().unwrap();

        let actions = out_list(&head).unwrap();
        assert_eq!(actions.len(), 2);
        assert!(matches!(actions[0], OutAction::SendMsg { mode: 1, .. }));
        assert!(matches!(actions[1], OutAction::SetCode { .. }));
    }

    #[test]
    fn test_extension_request_with_extended_action() {
        let mut builder = CellBuilder::new();
        builder.store_u64(64, 42).unwrap();
        store_bit(&mut builder, false); // no out actions
        store_bit(&mut builder, true); // extended actions follow
        builder.store_u8(8, EXT_ACTION_SET_SIGNATURE_AUTH).unwrap();
        store_bit(&mut builder, false);
        store_bit(&mut builder, false); // no further actions
        let body = builder.build().unwrap();

        let value = extension_v5r1(&mut CellSlice::new(&body)).unwrap();
        assert_eq!(value["query_id"], 42);
        assert_eq!(value["extended_actions"][0]["type"], "set_signature_auth_allowed");
        assert_eq!(value["extended_actions"][0]["allowed"], false);
    }
}
