// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Domain entities produced by the converters.
//!
//! All entities serialize with camelCase keys. Arbitrary-precision integers are
//! written as decimal strings and binary blobs as lowercase hex, so output is
//! stable enough to compare against golden files.

pub mod account;
pub mod directory;
pub mod message;
pub mod transaction;

pub use account::{Account, AccountLibrary, AccountStatus, StorageInfo};
pub use directory::{AttachedAccount, KnownAddress, KnownCollection, KnownJetton, TFPoolInfo};
pub use message::{DecodedMessageBody, Message, MessageInit, MessageType};
pub use transaction::{
    ActionPhase, BlockId, BouncePhase, ComputePhase, CreditPhase, StatusChange, StoragePhase,
    Transaction, TransactionType,
};
