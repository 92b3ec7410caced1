// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Which converter a case exercises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseKind {
    Account,
    Transaction,
    MessageBody,
}

/// Registry used for message body cases
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryKind {
    ExtIn,
    #[default]
    Internal,
}

/// A single converter case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    /// Unique case name
    pub name: String,
    pub kind: CaseKind,
    /// Path to the input record, relative to the fixtures directory
    pub input_path: PathBuf,
    /// Path to the expected output, relative to the fixtures directory
    #[serde(default)]
    pub fixture_path: Option<PathBuf>,
    /// Substring the conversion error must contain; the case must fail when set
    #[serde(default)]
    pub expect_error: Option<String>,
    /// Account address for account cases
    #[serde(default)]
    pub address: Option<String>,
    /// Batch order bias for transaction cases
    #[serde(default)]
    pub bias: u64,
    #[serde(default)]
    pub registry: RegistryKind,
    /// Extra fields to skip when comparing
    #[serde(default)]
    pub ignore_fields: Vec<String>,
    /// Optional description of the test case
    pub description: Option<String>,
}

/// Test configuration loaded from file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestConfig {
    pub cases: Vec<TestCase>,
}

impl TestConfig {
    /// Load test configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read test config: {:?}", path))?;
        let config: TestConfig = serde_json::from_str(&content)
            .context(format!("Failed to parse test config: {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Cases of one kind, in file order
    pub fn cases_of(&self, kind: CaseKind) -> Vec<&TestCase> {
        self.cases.iter().filter(|case| case.kind == kind).collect()
    }

    fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for case in &self.cases {
            if !names.insert(case.name.as_str()) {
                anyhow::bail!("Duplicate test case name: {}", case.name);
            }
            if case.fixture_path.is_none() && case.expect_error.is_none() {
                anyhow::bail!(
                    "Test case {} needs a fixture_path or an expect_error",
                    case.name
                );
            }
            if case.kind == CaseKind::Account && case.address.is_none() {
                anyhow::bail!("Account test case {} needs an address", case.name);
            }
        }
        Ok(())
    }
}
