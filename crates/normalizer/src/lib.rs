// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod abi;
pub mod addressbook;
pub mod cell;
pub mod converters;
pub mod error;
pub mod logging;
pub mod models;
pub mod tlb;
pub mod types;
pub mod utils;

pub use converters::Normalizer;
pub use error::DecodeError;
