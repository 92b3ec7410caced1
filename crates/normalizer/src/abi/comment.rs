// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Plain and encrypted text comments.

use super::common::finish;
use super::{FnOperation, OperationDecoder};
use crate::cell::CellSlice;
use crate::error::DecodeError;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

pub const OP_TEXT_COMMENT: u32 = 0x00000000;
pub const OP_ENCRYPTED_TEXT_COMMENT: u32 = 0x2167da4b;

pub fn operations() -> Vec<Arc<dyn OperationDecoder>> {
    vec![
        FnOperation::tagged("TextComment", OP_TEXT_COMMENT, text),
        FnOperation::tagged("EncryptedTextComment", OP_ENCRYPTED_TEXT_COMMENT, encrypted),
    ]
}

#[derive(Debug, Serialize)]
struct TextComment {
    text: String,
}

#[derive(Debug, Serialize)]
struct EncryptedTextComment {
    cipher_text: String,
}

fn text(slice: &mut CellSlice<'_>) -> Result<Value, DecodeError> {
    let bytes = slice.load_snake_bytes()?;
    let text = String::from_utf8(bytes).map_err(|e| DecodeError::InvalidValue {
        field: "text",
        reason: e.to_string(),
    })?;
    finish("TextComment", slice, TextComment { text })
}

fn encrypted(slice: &mut CellSlice<'_>) -> Result<Value, DecodeError> {
    let cipher_text = hex::encode(slice.load_snake_bytes()?);
    finish("EncryptedTextComment", slice, EncryptedTextComment { cipher_text })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::DEFAULT_INTERNAL_REGISTRY;
    use crate::cell::testing::arc;
    use crate::cell::CellBuilder;

    #[test]
    fn test_text_comment_spanning_cells() {
        let tail = arc(b" world", 48);
        let mut builder = CellBuilder::new();
        builder
            .store_u32(32, OP_TEXT_COMMENT)
            .unwrap()
            .store_slice(b"hello")
            .unwrap()
            .store_reference(&tail)
            .unwrap();
        let body = builder.build().unwrap();

        let result = DEFAULT_INTERNAL_REGISTRY.decode(&body).unwrap();
        let decoded = result.decoded().unwrap();
        assert_eq!(result.tag(), Some(0));
        assert_eq!(decoded.operation, "TextComment");
        assert_eq!(decoded.value["text"], "hello world");
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let mut builder = CellBuilder::new();
        builder.store_slice(&[0xff, 0xfe]).unwrap();
        let body = builder.build().unwrap();
        assert!(text(&mut CellSlice::new(&body)).is_err());
    }
}
