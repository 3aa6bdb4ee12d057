//! Testcontainers fixture for the Inductive Automation Ignition gateway.
//!
//! Configure a gateway with [`LaunchConfiguration`], start it through
//! [`IgnitionContainer`] and reach it through the returned
//! [`IgnitionGateway`]. Settings that differ between machines (image, license)
//! can come from the environment, see [`config`].

pub mod config;
pub mod error;
pub mod ignition;
pub mod testing;

pub use config::FixtureConfig;
pub use error::ConfigError;
pub use ignition::{
    EamConfig, EamRole, GatewayEdition, GatewayModule, GatewayNetworkConfig, IgnitionContainer,
    IgnitionError, IgnitionGateway, IgnitionImage, ImageName, LaunchConfiguration, LaunchPlan,
    OutgoingConnection, Result, RetentionUnit, SecurityPolicy, StagedFile,
};
