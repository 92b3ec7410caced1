// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Address directory access with a local wallet-classification override.
//!
//! `SimpleAddressBook` answers `is_wallet` from a caller-supplied map first and
//! only falls back to the wrapped directory for addresses it does not know.
//! Every other lookup goes straight to the wrapped directory.

use crate::models::{AttachedAccount, KnownAddress, KnownCollection, KnownJetton, TFPoolInfo};
use crate::types::AccountId;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use thiserror::Error;

// ================================================================================================
// Error Types
// ================================================================================================

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Address directory unavailable: {0}")]
    Unavailable(String),

    #[error("Address directory lookup failed: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Debug, Error)]
pub enum OverrideLoadError {
    #[error("Failed to read wallet overrides from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse wallet overrides: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid address '{address}' in wallet overrides: {reason}")]
    InvalidAddress { address: String, reason: String },
}

// ================================================================================================
// Directory trait
// ================================================================================================

/// Read-only view of the external address directory.
pub trait AddressBook: Send + Sync {
    fn is_wallet(&self, account: &AccountId) -> Result<bool, LookupError>;
    fn get_address_info_by_address(&self, account: &AccountId) -> Option<KnownAddress>;
    fn get_collection_info_by_address(&self, account: &AccountId) -> Option<KnownCollection>;
    fn get_jetton_info_by_address(&self, account: &AccountId) -> Option<KnownJetton>;
    fn get_tf_pool_info(&self, account: &AccountId) -> Option<TFPoolInfo>;
    fn get_known_jettons(&self) -> HashMap<AccountId, KnownJetton>;
    fn get_known_collections(&self) -> HashMap<AccountId, KnownCollection>;
    fn search_attached_accounts_by_prefix(&self, prefix: &str) -> Vec<AttachedAccount>;
}

/// Directory wrapper whose wallet classification can be overridden per address.
#[derive(Debug, Clone)]
pub struct SimpleAddressBook<B> {
    wallets: HashMap<AccountId, bool>,
    fallback: B,
}

impl<B: AddressBook> SimpleAddressBook<B> {
    pub fn new(wallets: HashMap<AccountId, bool>, fallback: B) -> Self {
        Self { wallets, fallback }
    }

    pub fn overrides(&self) -> &HashMap<AccountId, bool> {
        &self.wallets
    }

    pub fn fallback(&self) -> &B {
        &self.fallback
    }
}

impl<B: AddressBook> AddressBook for SimpleAddressBook<B> {
    fn is_wallet(&self, account: &AccountId) -> Result<bool, LookupError> {
        if let Some(is_wallet) = self.wallets.get(account) {
            return Ok(*is_wallet);
        }
        self.fallback.is_wallet(account)
    }

    fn get_address_info_by_address(&self, account: &AccountId) -> Option<KnownAddress> {
        self.fallback.get_address_info_by_address(account)
    }

    fn get_collection_info_by_address(&self, account: &AccountId) -> Option<KnownCollection> {
        self.fallback.get_collection_info_by_address(account)
    }

    fn get_jetton_info_by_address(&self, account: &AccountId) -> Option<KnownJetton> {
        self.fallback.get_jetton_info_by_address(account)
    }

    fn get_tf_pool_info(&self, account: &AccountId) -> Option<TFPoolInfo> {
        self.fallback.get_tf_pool_info(account)
    }

    fn get_known_jettons(&self) -> HashMap<AccountId, KnownJetton> {
        self.fallback.get_known_jettons()
    }

    fn get_known_collections(&self) -> HashMap<AccountId, KnownCollection> {
        self.fallback.get_known_collections()
    }

    fn search_attached_accounts_by_prefix(&self, prefix: &str) -> Vec<AttachedAccount> {
        self.fallback.search_attached_accounts_by_prefix(prefix)
    }
}

/// Directory with no backend. Every wallet query is [`LookupError::Unavailable`]
/// and every metadata query is empty, so only overrides answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineAddressBook;

impl AddressBook for OfflineAddressBook {
    fn is_wallet(&self, account: &AccountId) -> Result<bool, LookupError> {
        Err(LookupError::Unavailable(format!(
            "no directory configured for {}",
            account
        )))
    }

    fn get_address_info_by_address(&self, _account: &AccountId) -> Option<KnownAddress> {
        None
    }

    fn get_collection_info_by_address(&self, _account: &AccountId) -> Option<KnownCollection> {
        None
    }

    fn get_jetton_info_by_address(&self, _account: &AccountId) -> Option<KnownJetton> {
        None
    }

    fn get_tf_pool_info(&self, _account: &AccountId) -> Option<TFPoolInfo> {
        None
    }

    fn get_known_jettons(&self) -> HashMap<AccountId, KnownJetton> {
        HashMap::new()
    }

    fn get_known_collections(&self) -> HashMap<AccountId, KnownCollection> {
        HashMap::new()
    }

    fn search_attached_accounts_by_prefix(&self, _prefix: &str) -> Vec<AttachedAccount> {
        Vec::new()
    }
}

/// Parse a JSON object of `{ "<address>": <bool> }` into an override map.
///
/// Addresses may be raw or user-friendly. When two keys name the same account,
/// the one that sorts last wins.
pub fn parse_wallet_overrides(json: &str) -> Result<HashMap<AccountId, bool>, OverrideLoadError> {
    let entries: BTreeMap<String, bool> = serde_json::from_str(json)?;
    entries
        .into_iter()
        .map(|(address, is_wallet)| {
            let account = address
                .parse::<AccountId>()
                .map_err(|e| OverrideLoadError::InvalidAddress {
                    address: address.clone(),
                    reason: e.to_string(),
                })?;
            Ok((account, is_wallet))
        })
        .collect()
}

/// Load wallet overrides from a JSON file.
pub fn load_wallet_overrides(path: impl AsRef<Path>) -> Result<HashMap<AccountId, bool>, OverrideLoadError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| OverrideLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let overrides = parse_wallet_overrides(&content)?;
    tracing::info!(path = %path.display(), count = overrides.len(), "Loaded wallet overrides");
    Ok(overrides)
}
