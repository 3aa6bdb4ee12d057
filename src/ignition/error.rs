//! Error types for the Ignition fixture.

use testcontainers::TestcontainersError;
use thiserror::Error;

use crate::error::ConfigError;

/// Result type for Ignition fixture operations.
pub type Result<T> = std::result::Result<T, IgnitionError>;

/// Errors that can occur while configuring or launching an Ignition gateway.
#[derive(Debug, Error)]
pub enum IgnitionError {
    /// A setter was called after the container was started.
    #[error("setters can only be called before the container is started")]
    ConfigurationFrozen,

    /// The gateway backup file does not exist.
    #[error("gateway backup '{path}' does not exist")]
    GatewayBackupNotFound {
        /// Path exactly as supplied by the caller.
        path: String,
    },

    /// A third-party module file does not exist.
    #[error("module '{path}' does not exist")]
    ModuleNotFound {
        /// Path exactly as supplied by the caller.
        path: String,
    },

    /// A third-party module path has no file name to install it under.
    #[error("module '{path}' does not name a file")]
    InvalidModulePath {
        /// Path exactly as supplied by the caller.
        path: String,
    },

    /// The image reference is not an Ignition image.
    #[error("image '{image}' is not compatible with {expected}")]
    IncompatibleImage {
        /// Image reference as supplied.
        image: String,
        /// Repository the image must match.
        expected: &'static str,
    },

    /// A mapped port was requested for a port the container never exposed.
    #[error("container port {port} is not exposed")]
    PortNotExposed {
        /// Container-side port.
        port: u16,
    },

    /// The container runtime failed to start or inspect the container.
    #[error(transparent)]
    Launch(#[from] TestcontainersError),

    /// Fixture settings could not be resolved from the environment.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_errors_echo_the_supplied_path() {
        let err = IgnitionError::GatewayBackupNotFound {
            path: "./src/test/resources/not-a-valid-backup.gwbk".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "gateway backup './src/test/resources/not-a-valid-backup.gwbk' does not exist"
        );

        let err = IgnitionError::ModuleNotFound {
            path: "modules/Missing.modl".to_string(),
        };
        assert_eq!(err.to_string(), "module 'modules/Missing.modl' does not exist");
    }

    #[test]
    fn test_config_error_is_transparent() {
        let err: IgnitionError = ConfigError::InvalidValue {
            key: "IGNITION_TEST_ACCEPT_EULA".to_string(),
            message: "must be 'true' or 'false'".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Invalid value for IGNITION_TEST_ACCEPT_EULA: must be 'true' or 'false'"
        );
    }
}
