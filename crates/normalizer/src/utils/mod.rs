// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod format;
pub mod numeric;

pub use format::hex_with_prefix;
pub use numeric::{check_width, check_width_opt};
