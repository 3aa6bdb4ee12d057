//! Fixture settings read from the process environment.
//!
//! | Variable                         | Default                               |
//! |----------------------------------|---------------------------------------|
//! | `IGNITION_TEST_IMAGE`            | `inductiveautomation/ignition:8.1.43` |
//! | `IGNITION_TEST_ACCEPT_EULA`      | `false`                               |
//! | `IGNITION_TEST_LICENSE_KEY`      | unset                                 |
//! | `IGNITION_TEST_ACTIVATION_TOKEN` | unset                                 |
//!
//! A `.env` file in the working directory is loaded first when present.

pub(crate) mod helpers;

use std::env::VarError;

use secrecy::{ExposeSecret, SecretString};

use crate::config::helpers::{optional_env, parse_bool_env};
use crate::error::ConfigError;
use crate::ignition::config::LaunchConfiguration;
use crate::ignition::error::IgnitionError;
use crate::ignition::image::{DEFAULT_TAG, IGNITION_IMAGE};

pub const IMAGE_ENV: &str = "IGNITION_TEST_IMAGE";
pub const ACCEPT_EULA_ENV: &str = "IGNITION_TEST_ACCEPT_EULA";
pub const LICENSE_KEY_ENV: &str = "IGNITION_TEST_LICENSE_KEY";
pub const ACTIVATION_TOKEN_ENV: &str = "IGNITION_TEST_ACTIVATION_TOKEN";

/// Settings that vary between machines running the gateway tests.
#[derive(Clone)]
pub struct FixtureConfig {
    /// Image reference, `repository:tag`.
    pub image: String,
    pub accept_eula: bool,
    pub license_key: Option<SecretString>,
    pub activation_token: Option<SecretString>,
}

impl std::fmt::Debug for FixtureConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixtureConfig")
            .field("image", &self.image)
            .field("accept_eula", &self.accept_eula)
            .field(
                "license_key",
                &self.license_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field(
                "activation_token",
                &self.activation_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            image: format!("{IGNITION_IMAGE}:{DEFAULT_TAG}"),
            accept_eula: false,
            license_key: None,
            activation_token: None,
        }
    }
}

impl FixtureConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn resolve() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env");
        }
        Self::resolve_from(|key| std::env::var(key))
    }

    /// Read settings through `lookup`, which behaves like [`std::env::var`].
    pub fn resolve_from<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let defaults = Self::default();

        let config = Self {
            image: optional_env(&lookup, IMAGE_ENV)?.unwrap_or(defaults.image),
            accept_eula: parse_bool_env(&lookup, ACCEPT_EULA_ENV, defaults.accept_eula)?,
            license_key: optional_env(&lookup, LICENSE_KEY_ENV)?.map(SecretString::from),
            activation_token: optional_env(&lookup, ACTIVATION_TOKEN_ENV)?
                .map(SecretString::from),
        };

        if !config.accept_eula && (config.license_key.is_some() || config.activation_token.is_some())
        {
            return Err(ConfigError::MissingRequired {
                key: ACCEPT_EULA_ENV.to_string(),
                hint: "A licensed gateway only starts once the EULA is accepted; set it to 'true'."
                    .to_string(),
            });
        }

        Ok(config)
    }

    /// Copy the licensing settings onto a launch configuration.
    pub fn apply(&self, config: &mut LaunchConfiguration) -> Result<(), IgnitionError> {
        if self.accept_eula {
            config.accept_license()?;
        }
        if let Some(key) = &self.license_key {
            config.with_license_key(key.expose_secret())?;
        }
        if let Some(token) = &self.activation_token {
            config.with_activation_token(token.expose_secret())?;
        }
        Ok(())
    }
}
