//! Settings error types.

use thiserror::Error;

/// Error interpreting a descriptor's environment.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("{key}: toggle must be \"0\" or \"1\", got {value:?}")]
    InvalidToggle { key: &'static str, value: String },
    #[error("{key}: invalid number {value:?}")]
    InvalidNumber { key: &'static str, value: String },
}
