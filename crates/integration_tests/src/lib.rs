pub mod config;
pub mod fixtures;
pub mod runner;
pub mod utils;

pub use config::{CaseKind, RegistryKind, TestCase, TestConfig};
pub use fixtures::FixtureLoader;
pub use runner::{CaseRunner, TestResults};
pub use utils::*;

/// Test configuration constants
pub mod constants {
    /// Default location of the case list, relative to the crate root
    pub const CONFIG_PATH: &str = "tests/config/test_config.json";

    /// Default fixtures directory, relative to the crate root
    pub const FIXTURES_DIR: &str = "tests/fixtures";
}
