// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::config::{CaseKind, RegistryKind, TestCase, TestConfig};
use crate::fixtures::FixtureLoader;
use crate::utils::compare_json;
use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::Value;
use ton_normalizer::Normalizer;
use ton_normalizer::cell;
use ton_normalizer::converters::convert_account;
use ton_normalizer::tlb::{ShardAccount, TransactionRecord};
use ton_normalizer::types::AccountId;

/// Runs fixture cases through the converters with the default registries
pub struct CaseRunner {
    config: TestConfig,
    fixture_loader: FixtureLoader,
    normalizer: Normalizer<'static>,
}

#[derive(Debug, Default)]
pub struct TestResults {
    pub passed: usize,
    pub failed: usize,
    pub failures: Vec<Failure>,
}

#[derive(Debug)]
pub struct Failure {
    pub name: String,
    pub description: Option<String>,
    pub error: String,
}

impl TestResults {
    /// Print failures and fail when there are any
    pub fn assert_all_passed(&self) {
        for failure in &self.failures {
            println!(
                "\n{} {}{}\n{}",
                "✗".red().bold(),
                failure.name.yellow(),
                failure
                    .description
                    .as_deref()
                    .map(|d| format!(" ({})", d))
                    .unwrap_or_default(),
                failure.error
            );
        }
        assert_eq!(
            self.failed, 0,
            "{} of {} cases failed",
            self.failed,
            self.passed + self.failed
        );
    }
}

impl CaseRunner {
    pub fn new(config: TestConfig, fixture_loader: FixtureLoader) -> Self {
        Self {
            config,
            fixture_loader,
            normalizer: Normalizer::default(),
        }
    }

    /// Runner over the crate's own case list and fixtures
    pub fn from_manifest_dir() -> Result<Self> {
        let manifest_dir = env!("CARGO_MANIFEST_DIR");
        let config = TestConfig::from_file(format!(
            "{}/{}",
            manifest_dir,
            crate::constants::CONFIG_PATH
        ))?;
        let fixture_loader =
            FixtureLoader::new(format!("{}/{}", manifest_dir, crate::constants::FIXTURES_DIR));
        Ok(Self::new(config, fixture_loader))
    }

    pub fn config(&self) -> &TestConfig {
        &self.config
    }

    pub fn fixture_loader(&self) -> &FixtureLoader {
        &self.fixture_loader
    }

    /// Run every case of `kind`
    pub fn run_all(&self, kind: CaseKind) -> TestResults {
        let cases = self.config.cases_of(kind);
        println!(
            "\n{} {} {:?} cases\n",
            "Running".cyan().bold(),
            cases.len(),
            kind
        );

        let mut results = TestResults::default();
        for case in cases {
            match self.run_case(case) {
                Ok(()) => {
                    results.passed += 1;
                    println!("{} {}", "✓".green().bold(), case.name);
                }
                Err(e) => {
                    results.failed += 1;
                    println!("{} {} - {}", "✗".red().bold(), case.name, e);
                    results.failures.push(Failure {
                        name: case.name.clone(),
                        description: case.description.clone(),
                        error: format!("{:?}", e),
                    });
                }
            }
        }
        results
    }

    /// Run one case against its fixture or expected error
    pub fn run_case(&self, case: &TestCase) -> Result<()> {
        tracing::debug!(case = %case.name, kind = ?case.kind, "Running case");
        let outcome = self.convert(case);

        if let Some(expected_error) = &case.expect_error {
            return match outcome {
                Ok(_) => anyhow::bail!("Expected an error containing '{}'", expected_error),
                Err(e) => {
                    let message = format!("{:#}", e);
                    if message.contains(expected_error.as_str()) {
                        Ok(())
                    } else {
                        anyhow::bail!(
                            "Error '{}' does not contain '{}'",
                            message,
                            expected_error
                        )
                    }
                }
            };
        }

        let actual = outcome?;
        let fixture_path = case
            .fixture_path
            .as_ref()
            .context("Case has no fixture_path")?;
        let expected = self
            .fixture_loader
            .load(fixture_path)
            .context(format!("Failed to load fixture: {:?}", fixture_path))?;

        let ignore_fields: Vec<&str> = case.ignore_fields.iter().map(String::as_str).collect();
        let comparison = compare_json(&actual, &expected, &ignore_fields);
        if !comparison.is_match() {
            anyhow::bail!("Output mismatch:{}", comparison.format_diff());
        }
        Ok(())
    }

    /// Convert a case's input into the JSON the converter produces
    pub fn convert(&self, case: &TestCase) -> Result<Value> {
        let input = self
            .fixture_loader
            .load(&case.input_path)
            .context(format!("Failed to load input: {:?}", case.input_path))?;

        let output = match case.kind {
            CaseKind::Account => {
                let address = case.address.as_deref().context("Account case needs an address")?;
                let account: AccountId = address
                    .parse()
                    .context(format!("Invalid address: {}", address))?;
                let shard: ShardAccount = serde_json::from_value(input)?;
                serde_json::to_value(convert_account(account, &shard)?)?
            }
            CaseKind::Transaction if input.is_array() => {
                let records: Vec<TransactionRecord> = serde_json::from_value(input)?;
                serde_json::to_value(self.normalizer.transactions(case.bias, &records)?)?
            }
            CaseKind::Transaction => {
                let record: TransactionRecord = serde_json::from_value(input)?;
                serde_json::to_value(self.normalizer.transaction(case.bias, &record)?)?
            }
            CaseKind::MessageBody => {
                let body = input["body"].as_str().context("Input has no body string")?;
                let root = cell::from_boc_hex(body)?;
                let registry = match case.registry {
                    RegistryKind::ExtIn => self.normalizer.ext_in_registry(),
                    RegistryKind::Internal => self.normalizer.internal_registry(),
                };
                serde_json::to_value(registry.decode(&root)?)?
            }
        };
        Ok(output)
    }
}
