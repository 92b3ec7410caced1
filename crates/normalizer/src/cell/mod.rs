// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Cell trees as used by the ledger records.
//!
//! Cells, Bag-of-Cells (de)serialization and dictionaries come from
//! `tonlib_core`. This module adds:
//! - `CellSlice` - a read cursor that tracks consumed bits and references
//! - single-root BOC helpers and their hex serde adapters
//! - extra-currency dictionary reading in `dict`

pub mod dict;
pub mod slice;

pub use slice::CellSlice;
pub use tonlib_core::cell::{ArcCell, BagOfCells, Cell, CellBuilder, TonCellError};

use thiserror::Error;

const BOC_GENERIC_MAGIC: [u8; 4] = [0xb5, 0xee, 0x9c, 0x72];

/// Every serialized cell takes at least its two descriptor bytes.
const MIN_CELL_BYTES: usize = 2;

// ================================================================================================
// Error Types
// ================================================================================================

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CellError {
    #[error("Cell operation failed: {0}")]
    Ton(String),

    #[error("Invalid BOC: {0}")]
    InvalidBoc(String),

    #[error("Cell underflow: wanted {wanted} bits, {remaining} remaining")]
    Underflow { wanted: usize, remaining: usize },

    #[error("No more references in cell")]
    NoMoreRefs,

    #[error("Cannot read {0} bits into a fixed-width integer")]
    WidthTooLarge(usize),

    #[error("Invalid hex encoding: {0}")]
    Hex(String),
}

impl From<TonCellError> for CellError {
    fn from(err: TonCellError) -> Self {
        CellError::Ton(err.to_string())
    }
}

impl From<hex::FromHexError> for CellError {
    fn from(err: hex::FromHexError) -> Self {
        CellError::Hex(err.to_string())
    }
}

// ================================================================================================
// Bag of cells
// ================================================================================================

/// Deserialize a BOC that must contain exactly one root.
pub fn from_boc(bytes: &[u8]) -> Result<Cell, CellError> {
    check_declared_cells(bytes)?;
    let boc = BagOfCells::parse(bytes)?;
    let root = boc.single_root()?;
    Ok(root.as_ref().clone())
}

/// Deserialize a hex-encoded single-root BOC.
pub fn from_boc_hex(hex_str: &str) -> Result<Cell, CellError> {
    let bytes = hex::decode(hex_str.trim())?;
    from_boc(&bytes)
}

/// Serialize `cell` as a single-root BOC without index or checksum.
pub fn to_boc(cell: &Cell) -> Result<Vec<u8>, CellError> {
    Ok(BagOfCells::from_root(cell.clone()).serialize(false)?)
}

/// Reject a header whose cell count cannot fit in the input before anything is allocated for it.
fn check_declared_cells(bytes: &[u8]) -> Result<(), CellError> {
    if bytes.len() < 6 {
        return Err(CellError::InvalidBoc(format!("{} bytes is too short", bytes.len())));
    }
    let size_bytes = if bytes[..4] == BOC_GENERIC_MAGIC {
        (bytes[4] & 0x07) as usize
    } else {
        bytes[4] as usize
    };
    if size_bytes == 0 || size_bytes > 4 {
        return Err(CellError::InvalidBoc(format!("invalid reference size {}", size_bytes)));
    }

    // magic, flags, offset size, then the cell count
    let count_start = 6;
    let count_end = count_start + size_bytes;
    let count = bytes
        .get(count_start..count_end)
        .ok_or_else(|| CellError::InvalidBoc("header ends before the cell count".to_string()))?
        .iter()
        .fold(0usize, |acc, b| (acc << 8) | *b as usize);

    let available = (bytes.len() - count_end) / MIN_CELL_BYTES;
    if count > available {
        return Err(CellError::InvalidBoc(format!(
            "declares {} cells but only {} bytes follow the header",
            count,
            bytes.len() - count_end
        )));
    }
    Ok(())
}

// ================================================================================================
// Construction helpers
// ================================================================================================

/// Build an ordinary cell from `bits` left-aligned data bits and child references.
pub fn build_cell(data: &[u8], bits: usize, references: &[ArcCell]) -> Result<Cell, CellError> {
    let whole = bits / 8;
    let rest = bits % 8;
    let needed = bits.div_ceil(8);
    if data.len() < needed {
        return Err(CellError::Underflow {
            wanted: bits,
            remaining: data.len() * 8,
        });
    }

    let mut builder = CellBuilder::new();
    if whole > 0 {
        builder.store_slice(&data[..whole])?;
    }
    if rest > 0 {
        builder.store_u8(rest, data[whole] >> (8 - rest))?;
    }
    for reference in references {
        builder.store_reference(reference)?;
    }
    Ok(builder.build()?)
}

/// True when the cell carries neither data nor references.
pub fn is_empty(cell: &Cell) -> bool {
    cell.bit_len() == 0 && cell.references().is_empty()
}

// ================================================================================================
// Serde
// ================================================================================================

/// Cells travel through JSON as hex-encoded single-root BOCs.
pub mod boc_hex {
    use super::*;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(cell: &Cell, serializer: S) -> Result<S::Ok, S::Error> {
        let boc = to_boc(cell).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&hex::encode(boc))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Cell, D::Error> {
        let s = String::deserialize(deserializer)?;
        from_boc_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// `Option<Cell>` as an optional hex BOC.
pub mod opt_boc_hex {
    use super::*;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(cell: &Option<Cell>, serializer: S) -> Result<S::Ok, S::Error> {
        match cell {
            Some(cell) => {
                let boc = to_boc(cell).map_err(serde::ser::Error::custom)?;
                serializer.serialize_some(&hex::encode(boc))
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Cell>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|s| from_boc_hex(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use num_bigint::BigUint;

    /// `VarUInteger n` with a `len_bits`-wide byte count.
    pub fn store_var_uint(builder: &mut CellBuilder, len_bits: usize, value: &BigUint) {
        let bytes = if value.bits() == 0 { 0 } else { value.to_bytes_be().len() };
        builder.store_u8(len_bits, bytes as u8).unwrap();
        if bytes > 0 {
            builder.store_uint(bytes * 8, value).unwrap();
        }
    }

    pub fn store_coins(builder: &mut CellBuilder, value: &BigUint) {
        store_var_uint(builder, 4, value);
    }

    pub fn store_bit(builder: &mut CellBuilder, bit: bool) {
        builder.store_u8(1, bit as u8).unwrap();
    }

    /// `addr_std$10 anycast:nothing workchain_id:int8 address:bits256`
    pub fn store_std_address(builder: &mut CellBuilder, workchain: i8, hash: &[u8; 32]) {
        builder
            .store_u8(2, 0b10)
            .unwrap()
            .store_u8(1, 0)
            .unwrap()
            .store_u8(8, workchain as u8)
            .unwrap()
            .store_slice(hash)
            .unwrap();
    }

    pub fn cell(data: &[u8], bits: usize, references: &[ArcCell]) -> Cell {
        build_cell(data, bits, references).unwrap()
    }

    pub fn arc(data: &[u8], bits: usize) -> ArcCell {
        ArcCell::new(cell(data, bits, &[]))
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{arc, cell};
    use super::*;

    /// External V5R1 signed body with one send-message action.
    const V5R1_BODY: &str = "b5ee9c720101040100950001a17369676e7fffff11ffffffff00000000a151e8192f8651c72c4825350f18e31510044897899b761dc2e9606283f358e58b742d7c8e6baf4ca68d0e2d5ad7f62d80688f166ec0c720a5ac59efa1041143a001020a0ec3c86d0302030000006862005304a75fe829b8489154323ea3f1577055dcce862eb7aa8cbec7e892909fc6a3a02faf080000000000000000000000000000";

    #[test]
    fn test_from_boc_hex_reads_real_body() {
        let root = from_boc_hex(V5R1_BODY).unwrap();
        assert_eq!(root.bit_len(), 642);
        assert_eq!(root.references().len(), 1);
        assert_eq!(&root.data()[..4], &[0x73, 0x69, 0x67, 0x6e]);

        let out_list = &root.references()[0];
        assert_eq!(out_list.bit_len(), 40);
        assert_eq!(out_list.references().len(), 2);
        assert!(is_empty(&out_list.references()[0]));
        assert_eq!(out_list.references()[1].bit_len(), 416);
    }

    #[test]
    fn test_to_boc_round_trips() {
        let child = arc(&[0xde, 0xad], 16);
        let root = cell(&[0x80], 1, &[child]);

        let boc = to_boc(&root).unwrap();
        assert_eq!(&boc[..4], &BOC_GENERIC_MAGIC);
        assert_eq!(from_boc(&boc).unwrap(), root);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(from_boc(&[0xde, 0xad, 0xbe, 0xef, 0x01, 0x01, 0x01]).is_err());
        assert!(from_boc_hex("not hex").is_err());

        let bytes = hex::decode(V5R1_BODY).unwrap();
        assert!(from_boc(&bytes[..bytes.len() - 10]).is_err());
    }

    #[test]
    fn test_huge_declared_cell_count_is_an_error() {
        // ref size 4, offset size 1, 0xffffffff cells in a 23-byte input
        let bytes = [
            0xb5, 0xee, 0x9c, 0x72, 0x04, 0x01, 0xff, 0xff, 0xff, 0xff, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0,
            0, 0, 0,
        ];
        match from_boc(&bytes) {
            Err(CellError::InvalidBoc(reason)) => assert!(reason.contains("4294967295 cells")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_build_cell_keeps_partial_byte() {
        let built = cell(&[0xff, 0xf0], 12, &[]);
        assert_eq!(built.bit_len(), 12);
        assert_eq!(built.data(), &[0xff, 0xf0]);

        assert!(build_cell(&[0x01], 9, &[]).is_err());
    }

    #[test]
    fn test_serde_as_hex_boc() {
        #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
        struct Holder {
            #[serde(with = "boc_hex")]
            body: Cell,
            #[serde(default, with = "opt_boc_hex")]
            code: Option<Cell>,
        }

        let holder = Holder {
            body: cell(&[0x80], 1, &[arc(&[0xde, 0xad], 16)]),
            code: None,
        };
        let json = serde_json::to_value(&holder).unwrap();
        assert!(json["body"].as_str().unwrap().starts_with("b5ee9c72"));
        assert!(json["code"].is_null());

        let back: Holder = serde_json::from_value(json).unwrap();
        assert_eq!(back, holder);
    }
}
