// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Common value types shared by schema records and domain entities.
//!
//! This module contains newtype wrappers around fixed-size ledger identifiers
//! to provide consistent formatting and serialization across the crate.

pub mod address;
pub mod hash;

pub use address::{AccountId, AddressParseError};
pub use hash::Bits256;
