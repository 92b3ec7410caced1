// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Reader for `Hashmap n X` dictionaries with keys up to 64 bits.

use super::{ArcCell, Cell, CellError};
use tonlib_core::cell::dict::predefined_readers::{key_reader_uint, val_reader_cell};

/// Collect every `(key, value)` of a dictionary rooted at `root`.
///
/// Values are the cells holding the unread remainder of each leaf, in
/// ascending key order.
pub fn load_dict(root: &Cell, key_bits: usize) -> Result<Vec<(u64, ArcCell)>, CellError> {
    if key_bits > 64 {
        return Err(CellError::WidthTooLarge(key_bits));
    }
    let entries = root
        .parser()
        .load_dict_data(key_bits, key_reader_uint, val_reader_cell)?;

    let mut out = entries
        .into_iter()
        .map(|(key, value)| {
            u64::try_from(&key)
                .map(|key| (key, ArcCell::new(value)))
                .map_err(|_| CellError::WidthTooLarge(key_bits))
        })
        .collect::<Result<Vec<_>, _>>()?;
    out.sort_by_key(|(key, _)| *key);
    Ok(out)
}
