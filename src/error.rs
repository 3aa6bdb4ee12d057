//! Errors raised while resolving fixture settings from the environment.

use thiserror::Error;

/// Errors that can occur while reading fixture configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is missing.
    #[error("Missing required configuration: {key}. {hint}")]
    MissingRequired {
        /// Environment variable name.
        key: String,
        /// What the user should do about it.
        hint: String,
    },

    /// An environment variable is set but cannot be used.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue {
        /// Environment variable name.
        key: String,
        /// Why the value was rejected.
        message: String,
    },
}
