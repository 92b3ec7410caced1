use crate::ConfigError;

#[derive(Debug, Clone, Default)]
pub struct OverridesConfig {
    /// JSON file mapping addresses to a forced wallet classification
    ///
    /// Env: TNZ_OVERRIDES_WALLETS_PATH
    /// Format: { "<address>": true | false }
    /// Default: none
    pub wallets_path: Option<String>,
}

impl OverridesConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.wallets_path
            && path.trim().is_empty()
        {
            return Err(ConfigError::ValidateError(
                "Wallet overrides path cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_path() {
        let config = OverridesConfig::default();
        assert!(config.wallets_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_path_rejected() {
        let config = OverridesConfig {
            wallets_path: Some("  ".to_string()),
        };
        assert!(config.validate().is_err());
    }
}
