// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Message body classification.
//!
//! A body is matched against an ordered registry of operation decoders:
//! - tagged decoders claim bodies whose first 32 bits equal their opcode and
//!   decode the remainder after the tag
//! - tag-less decoders (legacy wallets) try every body from its first bit
//! - the first successful decode wins; registry order is the only tie-break
//!
//! Registries are immutable once built and are shared freely across threads.

mod common;
pub mod comment;
pub mod jetton;
pub mod nft;
pub mod wallet;

use crate::cell::{Cell, CellSlice};
use crate::error::DecodeError;
use crate::models::DecodedMessageBody;
use crate::utils::format::opt_opcode;
use lazy_static::lazy_static;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Interface names accepted by [`OperationRegistry::from_interfaces`], and the
/// default registry orders. Shared with the config crate so validation agrees.
pub use ton_normalizer_config::decoder::{
    DEFAULT_EXT_IN_INTERFACES, DEFAULT_INTERNAL_INTERFACES, KNOWN_INTERFACES,
};

lazy_static! {
    pub static ref DEFAULT_EXT_IN_REGISTRY: OperationRegistry =
        OperationRegistry::new(interfaces_in_order(DEFAULT_EXT_IN_INTERFACES));
    pub static ref DEFAULT_INTERNAL_REGISTRY: OperationRegistry =
        OperationRegistry::new(interfaces_in_order(DEFAULT_INTERNAL_INTERFACES));
}

fn interfaces_in_order(names: &[&str]) -> Vec<Arc<dyn OperationDecoder>> {
    names
        .iter()
        .filter_map(|name| interface(name))
        .flatten()
        .collect()
}

// ================================================================================================
// Decoder trait
// ================================================================================================

/// One contract operation shape.
pub trait OperationDecoder: Send + Sync {
    /// Operation name reported on a match.
    fn name(&self) -> &'static str;

    /// The 32-bit tag this operation starts with, if any.
    fn opcode(&self) -> Option<u32>;

    /// Whether this decoder should be tried for a body starting with `tag`.
    fn recognizes(&self, tag: Option<u32>) -> bool {
        match self.opcode() {
            Some(opcode) => tag == Some(opcode),
            None => true,
        }
    }

    /// Decode the body. Tagged decoders receive a slice positioned after the tag.
    ///
    /// Implementations must consume the whole slice; leftover data is a failure.
    fn decode(&self, body: &mut CellSlice<'_>) -> Result<Value, DecodeError>;
}

/// A decoder backed by a plain function.
pub struct FnOperation {
    name: &'static str,
    opcode: Option<u32>,
    decode: fn(&mut CellSlice<'_>) -> Result<Value, DecodeError>,
}

impl FnOperation {
    pub fn tagged(
        name: &'static str,
        opcode: u32,
        decode: fn(&mut CellSlice<'_>) -> Result<Value, DecodeError>,
    ) -> Arc<dyn OperationDecoder> {
        Arc::new(Self {
            name,
            opcode: Some(opcode),
            decode,
        })
    }

    pub fn untagged(
        name: &'static str,
        decode: fn(&mut CellSlice<'_>) -> Result<Value, DecodeError>,
    ) -> Arc<dyn OperationDecoder> {
        Arc::new(Self {
            name,
            opcode: None,
            decode,
        })
    }
}

impl OperationDecoder for FnOperation {
    fn name(&self) -> &'static str {
        self.name
    }

    fn opcode(&self) -> Option<u32> {
        self.opcode
    }

    fn decode(&self, body: &mut CellSlice<'_>) -> Result<Value, DecodeError> {
        (self.decode)(body)
    }
}

/// Decoders of a built-in interface, in registry order.
pub fn interface(name: &str) -> Option<Vec<Arc<dyn OperationDecoder>>> {
    match name {
        "wallet_v5r1" => Some(wallet::v5r1()),
        "wallet_v4" => Some(wallet::v4()),
        "wallet_v3" => Some(wallet::v3()),
        "jetton" => Some(jetton::operations()),
        "nft" => Some(nft::operations()),
        "comment" => Some(comment::operations()),
        _ => None,
    }
}

// ================================================================================================
// Registry
// ================================================================================================

/// Outcome of a body classification that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyDecodeResult {
    /// A decoder accepted the body. `tag` is set only for tagged decoders.
    Matched {
        tag: Option<u32>,
        body: DecodedMessageBody,
    },
    /// The body starts with `tag` but no decoder claimed it.
    NoMatch { tag: u32 },
}

impl BodyDecodeResult {
    pub fn tag(&self) -> Option<u32> {
        match self {
            BodyDecodeResult::Matched { tag, .. } => *tag,
            BodyDecodeResult::NoMatch { tag } => Some(*tag),
        }
    }

    pub fn decoded(&self) -> Option<&DecodedMessageBody> {
        match self {
            BodyDecodeResult::Matched { body, .. } => Some(body),
            BodyDecodeResult::NoMatch { .. } => None,
        }
    }
}

/// Serialized as `{ "opCode": "0x........", "decodedBody": {...} }`, the same
/// shape a converted message uses; absent parts are omitted.
impl Serialize for BodyDecodeResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Repr<'a> {
            #[serde(skip_serializing_if = "Option::is_none", with = "opt_opcode")]
            op_code: Option<u32>,
            #[serde(skip_serializing_if = "Option::is_none")]
            decoded_body: Option<&'a DecodedMessageBody>,
        }

        Repr {
            op_code: self.tag(),
            decoded_body: self.decoded(),
        }
        .serialize(serializer)
    }
}

/// Ordered, immutable collection of operation decoders.
#[derive(Clone, Default)]
pub struct OperationRegistry {
    decoders: Vec<Arc<dyn OperationDecoder>>,
}

impl fmt::Debug for OperationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl OperationRegistry {
    pub fn new(decoders: Vec<Arc<dyn OperationDecoder>>) -> Self {
        Self { decoders }
    }

    /// Build a registry from built-in interface names, in the given order.
    pub fn from_interfaces<S: AsRef<str>>(names: &[S]) -> Result<Self, DecodeError> {
        let mut seen = HashSet::new();
        let mut decoders = Vec::new();
        for name in names {
            let name = name.as_ref().trim();
            if !seen.insert(name) {
                return Err(DecodeError::Unsupported(format!(
                    "interface '{}' listed twice",
                    name
                )));
            }
            let ops = interface(name)
                .ok_or_else(|| DecodeError::Unsupported(format!("unknown interface '{}'", name)))?;
            decoders.extend(ops);
        }
        Ok(Self::new(decoders))
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }

    /// Operation names in registry order.
    pub fn names(&self) -> Vec<&'static str> {
        self.decoders.iter().map(|d| d.name()).collect()
    }

    /// Classify and decode `body`.
    ///
    /// - `Ok(Matched)` for the first decoder that accepts the body
    /// - `Ok(NoMatch)` when the body has a tag nobody accepted and no tagged
    ///   decoder claimed it
    /// - `Err(Malformed)` when a tagged decoder claimed the tag, failed, and
    ///   no later decoder succeeded
    /// - `Err(BodyTooShort)` when the body is shorter than a tag and no
    ///   tag-less decoder accepted it
    pub fn decode(&self, body: &Cell) -> Result<BodyDecodeResult, DecodeError> {
        let bits = body.bit_len();
        let tag = if bits >= 32 {
            Some(CellSlice::new(body).preload_u32()?)
        } else {
            None
        };

        let mut claim_error: Option<(&'static str, DecodeError)> = None;

        for decoder in &self.decoders {
            if !decoder.recognizes(tag) {
                continue;
            }

            let tagged = decoder.opcode().is_some();
            let mut slice = CellSlice::new(body);
            if tagged {
                slice.skip_bits(32)?;
            }

            tracing::trace!(operation = decoder.name(), tagged, "Trying operation decoder");

            match decoder.decode(&mut slice) {
                Ok(value) => {
                    return Ok(BodyDecodeResult::Matched {
                        tag: if tagged { tag } else { None },
                        body: DecodedMessageBody {
                            operation: decoder.name().to_string(),
                            value,
                        },
                    });
                }
                Err(err) if tagged => {
                    tracing::trace!(operation = decoder.name(), error = %err, "Claimed body failed to decode");
                    if claim_error.is_none() {
                        claim_error = Some((decoder.name(), err));
                    }
                }
                Err(err) => {
                    tracing::trace!(operation = decoder.name(), error = %err, "Tag-less decoder did not match");
                }
            }
        }

        if let Some((operation, source)) = claim_error {
            return Err(DecodeError::Malformed {
                operation,
                source: Box::new(source),
            });
        }

        match tag {
            Some(tag) => Ok(BodyDecodeResult::NoMatch { tag }),
            None => Err(DecodeError::BodyTooShort { bits }),
        }
    }
}
