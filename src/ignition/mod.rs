//! Ignition gateway fixture.
//!
//! A [`LaunchConfiguration`] collects the gateway settings, validating file
//! paths as they are attached. Launching freezes it and serializes it into a
//! [`LaunchPlan`], which [`IgnitionImage`] hands to testcontainers.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                         IgnitionContainer                            │
//! │                                                                      │
//! │   config_mut().with_*()          start()                             │
//! │         │                           │                                │
//! │         ▼                           ▼                                │
//! │   ┌──────────────────┐      ┌──────────────┐      ┌───────────────┐  │
//! │   │ LaunchConfig     │─────▶│ freeze()     │─────▶│ LaunchPlan    │  │
//! │   │ (validate paths) │      │              │      │ env/args/     │  │
//! │   └──────────────────┘      └──────────────┘      │ files/ports   │  │
//! │                                                   └───────────────┘  │
//! │                                                          │           │
//! │                                                          ▼           │
//! │                         ┌──────────────────┐     ┌───────────────┐   │
//! │                         │ IgnitionGateway  │◀────│ IgnitionImage │   │
//! │                         │ (ports, URLs)    │     │ (Image impl)  │   │
//! │                         └──────────────────┘     └───────────────┘   │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use testcontainers_ignition::{GatewayModule, IgnitionContainer};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut container = IgnitionContainer::new("inductiveautomation/ignition:8.1.43")?;
//! container
//!     .config_mut()?
//!     .accept_license()?
//!     .with_modules([GatewayModule::OpcUa, GatewayModule::Perspective])?;
//!
//! let gateway = container.start().await?;
//! println!("gateway at {}", gateway.gateway_url().await?);
//! gateway.stop().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod container;
pub mod eam;
pub mod edition;
pub mod error;
pub mod image;
pub mod module;
pub mod network;
pub mod plan;
pub mod validate;

pub use config::LaunchConfiguration;
pub use container::{IgnitionContainer, IgnitionGateway};
pub use eam::{EamConfig, EamRole, RetentionUnit};
pub use edition::GatewayEdition;
pub use error::{IgnitionError, Result};
pub use image::{IgnitionImage, ImageName};
pub use module::GatewayModule;
pub use network::{GatewayNetworkConfig, OutgoingConnection, SecurityPolicy};
pub use plan::{LaunchPlan, StagedFile};
pub use validate::{NotFound, validate_path};
