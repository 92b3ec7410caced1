use crate::ConfigError;
use std::collections::HashSet;

/// Interface names the operation decoder knows how to build.
pub const KNOWN_INTERFACES: &[&str] = &["wallet_v5r1", "wallet_v4", "wallet_v3", "jetton", "nft", "comment"];

/// Registry order for external inbound bodies.
pub const DEFAULT_EXT_IN_INTERFACES: &[&str] = &["wallet_v5r1", "wallet_v4", "wallet_v3"];

/// Registry order for internal bodies.
pub const DEFAULT_INTERNAL_INTERFACES: &[&str] = &["wallet_v5r1", "jetton", "nft", "comment"];

#[derive(Debug, Clone)]
pub struct DecoderConfig {
    /// Interfaces tried on external inbound message bodies, in order
    ///
    /// Env: TNZ_DECODER_EXT_IN_INTERFACES
    /// Format: comma-separated interface names
    /// Default: wallet_v5r1,wallet_v4,wallet_v3
    pub ext_in_interfaces: Vec<String>,

    /// Interfaces tried on internal message bodies, in order
    ///
    /// Env: TNZ_DECODER_INTERNAL_INTERFACES
    /// Format: comma-separated interface names
    /// Default: wallet_v5r1,jetton,nft,comment
    pub internal_interfaces: Vec<String>,
}

pub(crate) fn default_ext_in_interfaces() -> Vec<String> {
    DEFAULT_EXT_IN_INTERFACES.iter().map(|s| s.to_string()).collect()
}

pub(crate) fn default_internal_interfaces() -> Vec<String> {
    DEFAULT_INTERNAL_INTERFACES.iter().map(|s| s.to_string()).collect()
}

impl DecoderConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        Self::validate_list("ext_in_interfaces", &self.ext_in_interfaces)?;
        Self::validate_list("internal_interfaces", &self.internal_interfaces)?;
        Ok(())
    }

    fn validate_list(setting: &str, names: &[String]) -> Result<(), ConfigError> {
        if names.is_empty() {
            return Err(ConfigError::ValidateError(format!(
                "Decoder {} cannot be empty",
                setting
            )));
        }

        let mut seen = HashSet::new();
        for name in names {
            if !KNOWN_INTERFACES.contains(&name.as_str()) {
                return Err(ConfigError::ValidateError(format!(
                    "Unknown interface '{}' in decoder {}. Must be one of: {}",
                    name,
                    setting,
                    KNOWN_INTERFACES.join(", ")
                )));
            }
            if !seen.insert(name) {
                return Err(ConfigError::ValidateError(format!(
                    "Duplicate interface '{}' in decoder {}",
                    name, setting
                )));
            }
        }

        Ok(())
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            ext_in_interfaces: default_ext_in_interfaces(),
            internal_interfaces: default_internal_interfaces(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_decoder_config() {
        let config = DecoderConfig::default();
        assert_eq!(config.ext_in_interfaces, names(&["wallet_v5r1", "wallet_v4", "wallet_v3"]));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty() {
        let config = DecoderConfig {
            internal_interfaces: vec![],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_unknown() {
        let config = DecoderConfig {
            ext_in_interfaces: names(&["wallet_v5r1", "wallet_v9"]),
            ..Default::default()
        };
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("wallet_v9"));
    }

    #[test]
    fn test_validate_duplicate() {
        let config = DecoderConfig {
            internal_interfaces: names(&["jetton", "comment", "jetton"]),
            ..Default::default()
        };
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("Duplicate"));
    }
}
