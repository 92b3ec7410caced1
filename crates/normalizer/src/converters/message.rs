// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{GRAMS_MAX_BITS, Normalizer};
use crate::abi::{BodyDecodeResult, OperationRegistry};
use crate::cell::{to_boc, Cell, CellSlice};
use crate::error::DecodeError;
use crate::models::{DecodedMessageBody, Message, MessageInit, MessageType};
use crate::tlb::{CommonMsgInfo, MessageRecord};
use crate::utils::check_width;
use num_bigint::BigUint;

pub(super) fn convert(
    normalizer: &Normalizer<'_>,
    record: &MessageRecord,
    tx_lt: u64,
) -> Result<Message, DecodeError> {
    let init = match &record.init {
        Some(init) => Some(MessageInit {
            code: init.code.as_ref().map(to_boc).transpose()?,
            data: init.data.as_ref().map(to_boc).transpose()?,
        }),
        None => None,
    };

    let mut message = Message {
        hash: record.hash,
        msg_type: MessageType::IntMsg,
        created_lt: 0,
        created_at: 0,
        source: None,
        destination: None,
        source_extern: None,
        destination_extern: None,
        value: BigUint::default(),
        fwd_fee: BigUint::default(),
        ihr_fee: BigUint::default(),
        import_fee: BigUint::default(),
        bounce: false,
        bounced: false,
        init,
        raw_body: to_boc(&record.body)?,
        op_code: None,
        decoded_body: None,
    };

    let registry = match &record.info {
        CommonMsgInfo::IntMsg {
            bounce,
            bounced,
            src,
            dest,
            value,
            ihr_fee,
            fwd_fee,
            created_lt,
            created_at,
            ..
        } => {
            check_width("value", &value.grams, GRAMS_MAX_BITS)?;
            check_width("fwd_fee", fwd_fee, GRAMS_MAX_BITS)?;
            check_width("ihr_fee", ihr_fee, GRAMS_MAX_BITS)?;
            message.source = src.account_id();
            message.destination = dest.account_id();
            message.value = value.grams.clone();
            message.fwd_fee = fwd_fee.clone();
            message.ihr_fee = ihr_fee.clone();
            message.bounce = *bounce;
            message.bounced = *bounced;
            message.created_lt = *created_lt;
            message.created_at = *created_at;
            Some(normalizer.internal_registry())
        }
        CommonMsgInfo::ExtInMsg {
            src,
            dest,
            import_fee,
        } => {
            check_width("import_fee", import_fee, GRAMS_MAX_BITS)?;
            message.msg_type = MessageType::ExtInMsg;
            message.source_extern = src.external();
            message.destination = dest.account_id();
            message.import_fee = import_fee.clone();
            message.created_lt = tx_lt;
            Some(normalizer.ext_in_registry())
        }
        CommonMsgInfo::ExtOutMsg {
            src,
            dest,
            created_lt,
            created_at,
        } => {
            message.msg_type = MessageType::ExtOutMsg;
            message.source = src.account_id();
            message.destination_extern = dest.external();
            message.created_lt = *created_lt;
            message.created_at = *created_at;
            None
        }
    };

    let (op_code, decoded_body) = match registry {
        Some(registry) => classify(registry, record),
        None => (leading_opcode(&record.body), None),
    };
    message.op_code = op_code;
    message.decoded_body = decoded_body;

    Ok(message)
}

/// Fail-soft body classification: a body that cannot be decoded still yields a message.
fn classify(registry: &OperationRegistry, record: &MessageRecord) -> (Option<u32>, Option<DecodedMessageBody>) {
    match registry.decode(&record.body) {
        Ok(BodyDecodeResult::Matched { tag, body }) => (tag, Some(body)),
        Ok(BodyDecodeResult::NoMatch { tag }) => (Some(tag), None),
        Err(DecodeError::BodyTooShort { .. }) => (None, None),
        Err(err) => {
            tracing::debug!(message = %record.hash, error = %err, "Message body not decoded");
            (leading_opcode(&record.body), None)
        }
    }
}

fn leading_opcode(body: &Cell) -> Option<u32> {
    CellSlice::new(body).preload_u32().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::{FnOperation, OperationRegistry};
    use crate::cell::testing::cell;
    use crate::cell::{from_boc_hex, CellBuilder};
    use crate::converters::convert_message;
    use crate::tlb::{CurrencyCollection, MsgAddress, StateInit};
    use crate::types::{AccountId, Bits256};
    use serde_json::{Value, json};

    const V5R1_EXT_BODY: &str = "b5ee9c720101040100950001a17369676e7fffff11ffffffff00000000a151e8192f8651c72c4825350f18e31510044897899b761dc2e9606283f358e58b742d7c8e6baf4ca68d0e2d5ad7f62d80688f166ec0c720a5ac59efa1041143a001020a0ec3c86d0302030000006862005304a75fe829b8489154323ea3f1577055dcce862eb7aa8cbec7e892909fc6a3a02faf080000000000000000000000000000";

    fn wallet() -> AccountId {
        "0:de9dda22ade30314cb9f394ce4a8da4521acbcdc69e3576b6018c6c0eb8c00de"
            .parse()
            .unwrap()
    }

    fn body(bits: &[(usize, u64)]) -> Cell {
        let mut builder = CellBuilder::new();
        for (width, value) in bits {
            builder.store_u64(*width, *value).unwrap();
        }
        builder.build().unwrap()
    }

    fn internal(body: Cell) -> MessageRecord {
        MessageRecord {
            hash: Bits256([0x07; 32]),
            info: CommonMsgInfo::IntMsg {
                ihr_disabled: true,
                bounce: true,
                bounced: false,
                src: MsgAddress::Std { address: wallet() },
                dest: MsgAddress::Std {
                    address: AccountId::new(0, [0x42; 32]),
                },
                value: CurrencyCollection::from_grams(1_000_000u32),
                ihr_fee: BigUint::default(),
                fwd_fee: BigUint::from(266669u32),
                created_lt: 100,
                created_at: 1700000000,
            },
            init: None,
            body,
        }
    }

    #[test]
    fn test_external_in_uses_transaction_lt() {
        let record = MessageRecord {
            hash: Bits256([0x01; 32]),
            info: CommonMsgInfo::ExtInMsg {
                src: MsgAddress::None,
                dest: MsgAddress::Std { address: wallet() },
                import_fee: BigUint::default(),
            },
            init: None,
            body: from_boc_hex(V5R1_EXT_BODY).unwrap(),
        };

        let message = convert_message(&record, 31236013000006).unwrap();
        assert_eq!(message.msg_type, MessageType::ExtInMsg);
        assert_eq!(message.created_lt, 31236013000006);
        assert_eq!(message.destination, Some(wallet()));
        assert_eq!(message.op_code, Some(0x7369676e));
        assert_eq!(
            message.decoded_body.as_ref().map(|b| b.operation.as_str()),
            Some("WalletSignedExternalV5R1")
        );
        assert_eq!(hex::encode(&message.raw_body), V5R1_EXT_BODY);
    }

    #[test]
    fn test_internal_text_comment() {
        let mut builder = CellBuilder::new();
        builder.store_u32(32, 0).unwrap().store_slice(b"thanks").unwrap();
        let record = internal(builder.build().unwrap());

        let message = convert_message(&record, 200).unwrap();
        assert_eq!(message.created_lt, 100);
        assert_eq!(message.source, Some(wallet()));
        assert_eq!(message.value, BigUint::from(1_000_000u32));
        assert!(message.bounce);
        assert_eq!(message.op_code, Some(0));
        let decoded = message.decoded_body.unwrap();
        assert_eq!(decoded.operation, "TextComment");
        assert_eq!(decoded.value, json!({ "text": "thanks" }));
    }

    #[test]
    fn test_unknown_opcode_kept_without_decoding() {
        let record = internal(body(&[(32, 0xcafebabe), (64, 1)]));
        let message = convert_message(&record, 200).unwrap();

        assert_eq!(message.op_code, Some(0xcafebabe));
        assert!(message.decoded_body.is_none());
    }

    #[test]
    fn test_malformed_body_is_fail_soft() {
        // jetton excess tag with a truncated query id
        let record = internal(body(&[(32, 0xd53276db), (16, 1)]));
        let message = convert_message(&record, 200).unwrap();

        assert_eq!(message.op_code, Some(0xd53276db));
        assert!(message.decoded_body.is_none());
    }

    #[test]
    fn test_empty_body() {
        let record = internal(Cell::default());
        let message = convert_message(&record, 200).unwrap();

        assert_eq!(message.op_code, None);
        assert!(message.decoded_body.is_none());
        let json = serde_json::to_value(&message).unwrap();
        assert!(json.get("opCode").is_none());
    }

    #[test]
    fn test_external_out_is_not_decoded() {
        let record = MessageRecord {
            hash: Bits256([0x02; 32]),
            info: CommonMsgInfo::ExtOutMsg {
                src: MsgAddress::Std { address: wallet() },
                dest: MsgAddress::External {
                    bits: 8,
                    address: vec![0x99],
                },
                created_lt: 55,
                created_at: 66,
            },
            init: None,
            body: body(&[(32, 0)]),
        };

        let message = convert_message(&record, 1).unwrap();
        assert_eq!(message.msg_type, MessageType::ExtOutMsg);
        assert_eq!(message.destination_extern, Some("99".to_string()));
        assert_eq!(message.op_code, Some(0));
        assert!(message.decoded_body.is_none());
    }

    #[test]
    fn test_init_blobs() {
        let mut record = internal(Cell::default());
        record.init = Some(StateInit {
            code: Some(cell(&[0xab], 8, &[])),
            ..Default::default()
        });

        let message = convert_message(&record, 1).unwrap();
        let init = message.init.unwrap();
        assert!(init.code.is_some());
        assert!(init.data.is_none());
    }

    #[test]
    fn test_custom_registry() {
        fn anything(_: &mut CellSlice<'_>) -> Result<Value, DecodeError> {
            Ok(json!(null))
        }
        let internal_registry = OperationRegistry::new(vec![FnOperation::untagged("Anything", anything)]);
        let ext_in_registry = OperationRegistry::default();
        let normalizer = Normalizer::new(&ext_in_registry, &internal_registry);

        let message = normalizer.message(&internal(Cell::default()), 1).unwrap();
        assert_eq!(
            message.decoded_body.map(|b| b.operation),
            Some("Anything".to_string())
        );
        assert_eq!(message.op_code, None);
    }
}
