//! Launching an Ignition gateway and talking to it once it runs.

use secrecy::SecretString;
use testcontainers::ContainerAsync;
use testcontainers::core::{ContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;

use crate::config::FixtureConfig;
use crate::ignition::config::LaunchConfiguration;
use crate::ignition::error::{IgnitionError, Result};
use crate::ignition::image::{IgnitionImage, ImageName};
use crate::ignition::plan::{DEBUG_PORT, GAN_PORT, GATEWAY_PORT, GATEWAY_SSL_PORT, OPCUA_PORT};

/// An Ignition gateway container that has not been started yet.
///
/// Configure it through [`config_mut`](Self::config_mut), then call
/// [`start`](Self::start). Once started (or prepared) `config_mut` and every
/// setter fail with [`IgnitionError::ConfigurationFrozen`].
#[derive(Debug, Clone)]
pub struct IgnitionContainer {
    image: ImageName,
    config: LaunchConfiguration,
    ready_conditions: Vec<WaitFor>,
}

impl Default for IgnitionContainer {
    fn default() -> Self {
        Self::with_configuration(ImageName::default(), LaunchConfiguration::new())
    }
}

impl IgnitionContainer {
    /// Container for the given image reference, e.g.
    /// `inductiveautomation/ignition:8.1.33`.
    pub fn new(image: &str) -> Result<Self> {
        let image = ImageName::parse_compatible(image)?;
        Ok(Self::with_configuration(image, LaunchConfiguration::new()))
    }

    pub fn with_configuration(image: ImageName, config: LaunchConfiguration) -> Self {
        Self {
            image,
            config,
            ready_conditions: vec![WaitFor::healthcheck()],
        }
    }

    /// Container described by the `IGNITION_TEST_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let fixture = FixtureConfig::resolve()?;
        let mut container = Self::new(&fixture.image)?;
        fixture.apply(container.config_mut()?)?;
        Ok(container)
    }

    pub fn image(&self) -> &ImageName {
        &self.image
    }

    pub fn config(&self) -> &LaunchConfiguration {
        &self.config
    }

    /// Mutable access to the configuration, only before launch.
    pub fn config_mut(&mut self) -> Result<&mut LaunchConfiguration> {
        self.config.check_not_running()?;
        Ok(&mut self.config)
    }

    /// Replace the readiness condition. Defaults to the image's health check.
    pub fn waiting_for(&mut self, condition: WaitFor) -> Result<&mut Self> {
        self.config.check_not_running()?;
        self.ready_conditions = vec![condition];
        Ok(self)
    }

    /// Freeze the configuration and build the image handed to the runtime.
    ///
    /// Can only succeed once; [`start`](Self::start) calls it.
    pub fn prepare(&mut self) -> Result<IgnitionImage> {
        self.config.freeze()?;
        let plan = self.config.plan();

        if self.config.eam_without_module() {
            tracing::warn!(
                modules = %plan.env("GATEWAY_MODULES_ENABLED").unwrap_or_default(),
                "EAM settings configured but the enterprise-administration module is not enabled"
            );
        }

        tracing::debug!(
            image = %self.image,
            env_vars = plan.env.len(),
            args = %plan.command_line(),
            files = plan.files.len(),
            "Prepared Ignition launch plan"
        );

        Ok(IgnitionImage::new(
            self.image.clone(),
            plan,
            self.ready_conditions.clone(),
        ))
    }

    /// Start the gateway and wait until it reports ready.
    pub async fn start(&mut self) -> Result<IgnitionGateway> {
        let image = self.prepare()?;
        let exposed = image.plan().exposed_ports.clone();

        let container = image.start().await?;
        let host = container.get_host().await?.to_string();

        let gateway = IgnitionGateway {
            container,
            host,
            http_port: self.config.http_port().unwrap_or(GATEWAY_PORT),
            https_port: self.config.https_port().unwrap_or(GATEWAY_SSL_PORT),
            gan_port: self.config.gan_port().unwrap_or(GAN_PORT),
            exposed,
            username: self.config.username().to_string(),
            password: self.config.password().clone(),
        };

        let url = gateway.gateway_url().await?;
        tracing::info!(image = %self.image, url = %url, "Ignition gateway ready");

        Ok(gateway)
    }
}

/// A running gateway. Dropping it removes the container.
pub struct IgnitionGateway {
    container: ContainerAsync<IgnitionImage>,
    host: String,
    http_port: u16,
    https_port: u16,
    gan_port: u16,
    exposed: Vec<u16>,
    username: String,
    password: SecretString,
}

impl std::fmt::Debug for IgnitionGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IgnitionGateway")
            .field("id", &self.container.id())
            .field("host", &self.host)
            .field("exposed", &self.exposed)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl IgnitionGateway {
    /// Host the mapped ports are reachable on.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Host port mapped to an exposed container port.
    pub async fn mapped_port(&self, port: u16) -> Result<u16> {
        if !self.exposed.contains(&port) {
            return Err(IgnitionError::PortNotExposed { port });
        }
        Ok(self
            .container
            .get_host_port_ipv4(ContainerPort::Tcp(port))
            .await?)
    }

    pub async fn mapped_gateway_port(&self) -> Result<u16> {
        self.mapped_port(self.http_port).await
    }

    pub async fn mapped_gateway_ssl_port(&self) -> Result<u16> {
        self.mapped_port(self.https_port).await
    }

    pub async fn mapped_gan_port(&self) -> Result<u16> {
        self.mapped_port(self.gan_port).await
    }

    /// Only available in debug mode.
    pub async fn mapped_debug_port(&self) -> Result<u16> {
        self.mapped_port(DEBUG_PORT).await
    }

    /// Only available with the OPC UA module enabled.
    pub async fn mapped_opc_ua_port(&self) -> Result<u16> {
        self.mapped_port(OPCUA_PORT).await
    }

    pub async fn gateway_url(&self) -> Result<String> {
        self.gateway_url_with(false).await
    }

    pub async fn gateway_url_with(&self, ssl: bool) -> Result<String> {
        let port = if ssl {
            self.mapped_gateway_ssl_port().await?
        } else {
            self.mapped_gateway_port().await?
        };
        Ok(http_url(&self.host, port, ssl))
    }

    pub async fn opc_ua_url(&self) -> Result<String> {
        let port = self.mapped_opc_ua_port().await?;
        Ok(opc_ua_url(&self.host, port))
    }

    pub async fn opc_ua_discovery_url(&self) -> Result<String> {
        Ok(format!("{}/discovery", self.opc_ua_url().await?))
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &SecretString {
        &self.password
    }

    pub fn container(&self) -> &ContainerAsync<IgnitionImage> {
        &self.container
    }

    /// Stop and remove the container now instead of on drop.
    pub async fn stop(self) -> Result<()> {
        let id = self.container.id().to_string();
        self.container.rm().await?;
        tracing::debug!(container = %id, "Removed Ignition gateway");
        Ok(())
    }
}

fn http_url(host: &str, port: u16, ssl: bool) -> String {
    let scheme = if ssl { "https" } else { "http" };
    format!("{scheme}://{host}:{port}")
}

fn opc_ua_url(host: &str, port: u16) -> String {
    format!("opc.tcp://{host}:{port}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        assert_eq!(http_url("localhost", 32768, false), "http://localhost:32768");
        assert_eq!(http_url("localhost", 32769, true), "https://localhost:32769");
        assert_eq!(opc_ua_url("127.0.0.1", 32770), "opc.tcp://127.0.0.1:32770");
    }

    #[test]
    fn test_new_rejects_foreign_image() {
        let err = IgnitionContainer::new("redis:7").unwrap_err();
        assert!(matches!(err, IgnitionError::IncompatibleImage { .. }));
    }

    #[test]
    fn test_prepare_freezes_configuration() {
        let mut container = IgnitionContainer::new("inductiveautomation/ignition:8.1.33").unwrap();
        container
            .config_mut()
            .unwrap()
            .with_gateway_name("frozen")
            .unwrap();

        let image = container.prepare().unwrap();
        assert_eq!(image.plan().args, vec!["-n", "frozen"]);
        assert!(container.config().is_frozen());

        assert!(matches!(
            container.config_mut(),
            Err(IgnitionError::ConfigurationFrozen)
        ));
        assert!(matches!(
            container.waiting_for(WaitFor::seconds(1)),
            Err(IgnitionError::ConfigurationFrozen)
        ));
        assert!(matches!(
            container.prepare(),
            Err(IgnitionError::ConfigurationFrozen)
        ));
        assert_eq!(container.config().gateway_name(), Some("frozen"));
    }

    #[test]
    fn test_configuration_cannot_be_swapped_after_launch() {
        let mut container = IgnitionContainer::default();
        container.prepare().unwrap();

        if let Ok(config) = container.config_mut() {
            *config = LaunchConfiguration::new();
        }

        assert!(container.config().is_frozen());
        assert!(matches!(
            container.prepare(),
            Err(IgnitionError::ConfigurationFrozen)
        ));
    }

    #[test]
    fn test_default_container_uses_pinned_image() {
        let container = IgnitionContainer::default();
        assert_eq!(container.image().to_string(), "inductiveautomation/ignition:8.1.43");
        assert!(!container.config().is_frozen());
    }
}
