// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use anyhow::Context;
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::path::Path;
use ton_normalizer::abi::OperationRegistry;
use ton_normalizer::addressbook::{self, AddressBook, LookupError, OfflineAddressBook, SimpleAddressBook};
use ton_normalizer::cell;
use ton_normalizer::converters::{Normalizer, convert_account};
use ton_normalizer::logging::{self, LoggingConfig};
use ton_normalizer::tlb::{ShardAccount, TransactionRecord};
use ton_normalizer::types::AccountId;
use ton_normalizer_config::{Args, BodyKind, Command, NormalizerConfig};

fn main() -> anyhow::Result<()> {
    let args = Args::parse_args();
    let config = NormalizerConfig::from_env_file(&args.env_file)?;

    logging::init_with_config(LoggingConfig {
        level: &config.log.level,
        json_format: config.log.json,
        strip_ansi: config.log.strip_ansi,
        write_to_file: config.log.write,
        write_path: &config.log.write_path,
        write_max_file_size: config.log.write_max_file_size,
        write_max_files: config.log.write_max_files,
    })?;

    tracing::debug!(
        ext_in = ?config.decoder.ext_in_interfaces,
        internal = ?config.decoder.internal_interfaces,
        "Building operation registries"
    );
    let ext_in = OperationRegistry::from_interfaces(&config.decoder.ext_in_interfaces)?;
    let internal = OperationRegistry::from_interfaces(&config.decoder.internal_interfaces)?;
    let normalizer = Normalizer::new(&ext_in, &internal);

    match args.command {
        Command::Account { address, file } => {
            let account: AccountId = address
                .parse()
                .with_context(|| format!("invalid account address '{}'", address))?;
            let shard: ShardAccount = read_json(&file)?;
            print_json(&convert_account(account, &shard)?)
        }
        Command::Transaction { file, bias } => {
            let input: Value = read_json(&file)?;
            if input.is_array() {
                let records: Vec<TransactionRecord> = serde_json::from_value(input)?;
                tracing::info!(count = records.len(), bias, "Converting transaction batch");
                print_json(&normalizer.transactions(bias, &records)?)
            } else {
                let record: TransactionRecord = serde_json::from_value(input)?;
                print_json(&normalizer.transaction(bias, &record)?)
            }
        }
        Command::DecodeBody { kind, body } => {
            let root = cell::from_boc_hex(body.trim()).context("body is not a valid bag of cells")?;
            let registry = match kind {
                BodyKind::ExtIn => normalizer.ext_in_registry(),
                BodyKind::Internal => normalizer.internal_registry(),
            };
            print_json(&registry.decode(&root)?)
        }
        Command::IsWallet { address } => {
            let account: AccountId = address
                .parse()
                .with_context(|| format!("invalid account address '{}'", address))?;
            let book = SimpleAddressBook::new(load_overrides(config.overrides.wallets_path.as_deref())?, OfflineAddressBook);
            match book.is_wallet(&account) {
                Ok(is_wallet) => print_json(&json!({ "address": account.to_raw(), "isWallet": is_wallet })),
                Err(LookupError::Unavailable(reason)) => {
                    tracing::warn!(account = %account, reason = %reason, "Wallet status unknown");
                    print_json(&json!({ "address": account.to_raw(), "isWallet": Value::Null }))
                }
                Err(e) => Err(e.into()),
            }
        }
    }
}

fn load_overrides(path: Option<&str>) -> anyhow::Result<HashMap<AccountId, bool>> {
    match path {
        Some(path) => Ok(addressbook::load_wallet_overrides(path)?),
        None => Ok(HashMap::new()),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
