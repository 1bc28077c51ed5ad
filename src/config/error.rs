//! Configuration error types.

use thiserror::Error;

/// Launch configuration loading error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadFile(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("unknown variant: {0} (expected full, migrations or minimal)")]
    UnknownVariant(String),
}
