use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration from environment: {0}")]
    EnvError(#[from] envy::Error),

    #[error("Failed to load env file '{path}': {reason}")]
    EnvFileError { path: String, reason: String },

    #[error("Invalid configuration: {0}")]
    ValidateError(String),
}
