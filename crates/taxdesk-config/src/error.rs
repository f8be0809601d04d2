use thiserror::Error;

/// Startup configuration failures. None of these are recoverable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {var} is not set or is empty")]
    MissingSigningKey { var: &'static str },

    #[error("environment variable {var} has an invalid value: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}
