mod args;
pub mod decoder;
mod error;
mod log;
mod overrides;

pub use args::{Args, BodyKind, Command};
pub use decoder::DecoderConfig;
pub use error::ConfigError;
pub use log::LogConfig;
pub use overrides::OverridesConfig;

use serde::Deserialize;

/// Flat view of the `TNZ_` environment, split into sections by `NormalizerConfig`.
#[derive(Debug, Deserialize)]
struct EnvConfig {
    #[serde(default = "log::default_level")]
    log_level: String,
    #[serde(default)]
    log_json: bool,
    #[serde(default)]
    log_strip_ansi: bool,
    #[serde(default)]
    log_write: bool,
    #[serde(default = "log::default_write_path")]
    log_write_path: String,
    #[serde(default = "log::default_write_max_file_size")]
    log_write_max_file_size: u64,
    #[serde(default = "log::default_write_max_files")]
    log_write_max_files: usize,

    #[serde(default = "decoder::default_ext_in_interfaces")]
    decoder_ext_in_interfaces: Vec<String>,
    #[serde(default = "decoder::default_internal_interfaces")]
    decoder_internal_interfaces: Vec<String>,

    #[serde(default)]
    overrides_wallets_path: Option<String>,
}

impl From<EnvConfig> for NormalizerConfig {
    fn from(env: EnvConfig) -> Self {
        Self {
            log: LogConfig {
                level: env.log_level,
                json: env.log_json,
                strip_ansi: env.log_strip_ansi,
                write: env.log_write,
                write_path: env.log_write_path,
                write_max_file_size: env.log_write_max_file_size,
                write_max_files: env.log_write_max_files,
            },
            decoder: DecoderConfig {
                ext_in_interfaces: trim_all(env.decoder_ext_in_interfaces),
                internal_interfaces: trim_all(env.decoder_internal_interfaces),
            },
            overrides: OverridesConfig {
                wallets_path: env.overrides_wallets_path,
            },
        }
    }
}

fn trim_all(names: Vec<String>) -> Vec<String> {
    names
        .into_iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct NormalizerConfig {
    pub log: LogConfig,
    pub decoder: DecoderConfig,
    pub overrides: OverridesConfig,
}

impl NormalizerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let env = envy::prefixed("TNZ_").from_env::<EnvConfig>()?;
        let config = Self::from(env);
        config.validate()?;
        Ok(config)
    }

    /// Load `path` into the process environment if it exists, then read the config.
    pub fn from_env_file(path: &str) -> Result<Self, ConfigError> {
        if std::path::Path::new(path).exists() {
            dotenv::from_filename(path).map_err(|e| ConfigError::EnvFileError {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        }
        Self::from_env()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.log.validate()?;
        self.decoder.validate()?;
        self.overrides.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    const VARS: &[&str] = &[
        "TNZ_LOG_LEVEL",
        "TNZ_LOG_JSON",
        "TNZ_LOG_WRITE",
        "TNZ_DECODER_EXT_IN_INTERFACES",
        "TNZ_DECODER_INTERNAL_INTERFACES",
        "TNZ_OVERRIDES_WALLETS_PATH",
    ];

    fn clear_env() {
        for var in VARS {
            unsafe { std::env::remove_var(var) };
        }
    }

    #[test]
    fn test_default_config() {
        let config = NormalizerConfig::default();
        assert_eq!(config.log.level, "info");
        assert_eq!(config.decoder.internal_interfaces.len(), 4);
        assert!(config.overrides.wallets_path.is_none());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = NormalizerConfig::from_env().unwrap();
        assert_eq!(config.log.level, "info");
        assert_eq!(
            config.decoder.ext_in_interfaces,
            vec!["wallet_v5r1", "wallet_v4", "wallet_v3"]
        );
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        unsafe {
            std::env::set_var("TNZ_LOG_LEVEL", "debug");
            std::env::set_var("TNZ_LOG_JSON", "true");
            std::env::set_var("TNZ_DECODER_INTERNAL_INTERFACES", "comment, jetton");
            std::env::set_var("TNZ_OVERRIDES_WALLETS_PATH", "/etc/tnz/wallets.json");
        }

        let config = NormalizerConfig::from_env().unwrap();
        assert_eq!(config.log.level, "debug");
        assert!(config.log.json);
        assert_eq!(config.decoder.internal_interfaces, vec!["comment", "jetton"]);
        assert_eq!(
            config.overrides.wallets_path.as_deref(),
            Some("/etc/tnz/wallets.json")
        );
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_unknown_interface() {
        clear_env();
        unsafe { std::env::set_var("TNZ_DECODER_EXT_IN_INTERFACES", "wallet_v5r1,wallet_v1") };

        let result = NormalizerConfig::from_env();
        assert!(matches!(result, Err(ConfigError::ValidateError(_))));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_file() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "TNZ_LOG_LEVEL=warn").unwrap();

        let config = NormalizerConfig::from_env_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.log.level, "warn");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_missing_env_file_is_ignored() {
        clear_env();
        let config = NormalizerConfig::from_env_file("/nonexistent/.env").unwrap();
        assert_eq!(config.log.level, "info");
    }
}
