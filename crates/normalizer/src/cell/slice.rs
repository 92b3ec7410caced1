// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{build_cell, ArcCell, Cell, CellError};
use num_bigint::BigUint;
use tonlib_core::cell::CellParser;

/// A read cursor over one cell's bits and references.
///
/// Every `load_*` call advances the cursor; `preload_*` calls peek. A read
/// that would run past the end fails without moving the cursor.
#[derive(Debug, Clone)]
pub struct CellSlice<'a> {
    cell: &'a Cell,
    bit_pos: usize,
    ref_pos: usize,
}

impl<'a> CellSlice<'a> {
    pub fn new(cell: &'a Cell) -> Self {
        Self {
            cell,
            bit_pos: 0,
            ref_pos: 0,
        }
    }

    pub fn cell(&self) -> &'a Cell {
        self.cell
    }

    pub fn remaining_bits(&self) -> usize {
        self.cell.bit_len() - self.bit_pos
    }

    pub fn remaining_refs(&self) -> usize {
        self.cell.references().len() - self.ref_pos
    }

    /// True when every bit and reference has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.remaining_bits() == 0 && self.remaining_refs() == 0
    }

    fn ensure_bits(&self, wanted: usize) -> Result<(), CellError> {
        let remaining = self.remaining_bits();
        if wanted > remaining {
            return Err(CellError::Underflow { wanted, remaining });
        }
        Ok(())
    }

    /// A parser positioned at the cursor, after checking `wanted` bits are left.
    fn parser(&self, wanted: usize) -> Result<CellParser<'a>, CellError> {
        self.ensure_bits(wanted)?;
        let mut parser = self.cell.parser();
        if self.bit_pos > 0 {
            parser.load_uint(self.bit_pos)?;
        }
        Ok(parser)
    }

    pub fn skip_bits(&mut self, bits: usize) -> Result<(), CellError> {
        self.ensure_bits(bits)?;
        self.bit_pos += bits;
        Ok(())
    }

    pub fn load_bit(&mut self) -> Result<bool, CellError> {
        let bit = self.parser(1)?.load_u8(1)? == 1;
        self.bit_pos += 1;
        Ok(bit)
    }

    /// Read `bits` (at most 64) as a big-endian unsigned integer without advancing.
    pub fn preload_uint(&self, bits: usize) -> Result<u64, CellError> {
        if bits > 64 {
            return Err(CellError::WidthTooLarge(bits));
        }
        let mut parser = self.parser(bits)?;
        if bits == 0 {
            return Ok(0);
        }
        let value = parser.load_uint(bits)?;
        u64::try_from(&value).map_err(|_| CellError::WidthTooLarge(bits))
    }

    pub fn load_uint(&mut self, bits: usize) -> Result<u64, CellError> {
        let value = self.preload_uint(bits)?;
        self.bit_pos += bits;
        Ok(value)
    }

    /// Read `bits` (at most 64) as a two's complement signed integer.
    pub fn load_int(&mut self, bits: usize) -> Result<i64, CellError> {
        let raw = self.load_uint(bits)?;
        if bits == 0 || bits == 64 {
            return Ok(raw as i64);
        }
        let shift = 64 - bits;
        Ok(((raw << shift) as i64) >> shift)
    }

    pub fn load_u8(&mut self) -> Result<u8, CellError> {
        Ok(self.load_uint(8)? as u8)
    }

    pub fn load_i8(&mut self) -> Result<i8, CellError> {
        Ok(self.load_int(8)? as i8)
    }

    pub fn load_u32(&mut self) -> Result<u32, CellError> {
        Ok(self.load_uint(32)? as u32)
    }

    pub fn preload_u32(&self) -> Result<u32, CellError> {
        Ok(self.preload_uint(32)? as u32)
    }

    pub fn load_i32(&mut self) -> Result<i32, CellError> {
        Ok(self.load_int(32)? as i32)
    }

    pub fn load_u64(&mut self) -> Result<u64, CellError> {
        self.load_uint(64)
    }

    /// Read `bits` into a left-aligned byte vector.
    pub fn load_bits(&mut self, bits: usize) -> Result<Vec<u8>, CellError> {
        let mut parser = self.parser(bits)?;
        let whole = bits / 8;
        let rest = bits % 8;
        let mut out = vec![0u8; bits.div_ceil(8)];
        if whole > 0 {
            parser.load_slice(&mut out[..whole])?;
        }
        if rest > 0 {
            out[whole] = parser.load_u8(rest)? << (8 - rest);
        }
        self.bit_pos += bits;
        Ok(out)
    }

    pub fn load_bytes<const N: usize>(&mut self) -> Result<[u8; N], CellError> {
        let bits = self.load_bits(N * 8)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&bits);
        Ok(out)
    }

    /// Read an arbitrary-width unsigned integer.
    pub fn load_big_uint(&mut self, bits: usize) -> Result<BigUint, CellError> {
        let mut parser = self.parser(bits)?;
        if bits == 0 {
            return Ok(BigUint::default());
        }
        let value = parser.load_uint(bits)?;
        self.bit_pos += bits;
        Ok(value)
    }

    /// `VarUInteger n`: a `len_bits`-wide byte count followed by that many bytes.
    pub fn load_var_uint(&mut self, len_bits: usize) -> Result<BigUint, CellError> {
        let start = self.bit_pos;
        let len = self.load_uint(len_bits)? as usize;
        match self.load_big_uint(len * 8) {
            Ok(value) => Ok(value),
            Err(err) => {
                self.bit_pos = start;
                Err(err)
            }
        }
    }

    /// `Grams` / `Coins` (`VarUInteger 16`).
    pub fn load_coins(&mut self) -> Result<BigUint, CellError> {
        self.load_var_uint(4)
    }

    pub fn load_reference(&mut self) -> Result<&'a ArcCell, CellError> {
        let references: &'a [ArcCell] = self.cell.references();
        let child = references.get(self.ref_pos).ok_or(CellError::NoMoreRefs)?;
        self.ref_pos += 1;
        Ok(child)
    }

    /// `Maybe ^X`
    pub fn load_maybe_reference(&mut self) -> Result<Option<&'a ArcCell>, CellError> {
        if self.load_bit()? {
            Ok(Some(self.load_reference()?))
        } else {
            Ok(None)
        }
    }

    /// Copy everything not yet consumed into a fresh cell and exhaust the slice.
    pub fn load_remainder(&mut self) -> Result<Cell, CellError> {
        let bits = self.remaining_bits();
        let data = self.load_bits(bits)?;
        let references = &self.cell.references()[self.ref_pos..];
        let rest = build_cell(&data, bits, references)?;
        self.ref_pos = self.cell.references().len();
        Ok(rest)
    }

    /// `Either X ^X`: inline remainder when the flag is clear, the next reference otherwise.
    pub fn load_either_cell(&mut self) -> Result<Cell, CellError> {
        if self.load_bit()? {
            Ok(self.load_reference()?.as_ref().clone())
        } else {
            self.load_remainder()
        }
    }

    /// Snake-encoded bytes: whole bytes in this cell, continued in the first reference.
    pub fn load_snake_bytes(&mut self) -> Result<Vec<u8>, CellError> {
        let mut out = Vec::new();
        let mut next = self.load_snake_chunk(&mut out)?;
        while let Some(cell) = next {
            next = CellSlice::new(cell.as_ref()).load_snake_chunk(&mut out)?;
        }
        Ok(out)
    }

    fn load_snake_chunk(&mut self, out: &mut Vec<u8>) -> Result<Option<&'a ArcCell>, CellError> {
        let bits = self.remaining_bits();
        if bits % 8 != 0 {
            return Err(CellError::Underflow {
                wanted: bits.div_ceil(8) * 8,
                remaining: bits,
            });
        }
        let refs = self.remaining_refs();
        if refs > 1 {
            return Err(CellError::InvalidBoc(format!(
                "snake data cell has {} references",
                refs
            )));
        }
        out.extend(self.load_bits(bits)?);
        if refs == 1 {
            Ok(Some(self.load_reference()?))
        } else {
            Ok(None)
        }
    }
}
